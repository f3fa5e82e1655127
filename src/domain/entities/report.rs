use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::engine::filter::union_variants;

macro_rules! labelled_enum {
    (@display $name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };

    // Closed set: any other label is an error.
    (strict $(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        labelled_enum!(@display $name);

        impl FromStr for $name {
            type Err = String;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let trimmed = raw.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| format!("unknown {} '{}'", stringify!($name), trimmed))
            }
        }
    };

    // Open set: labels outside the known list are kept verbatim in `Other`.
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Other(raw) => raw.as_str(),
                }
            }

            /// Case-insensitive match against the known labels.
            pub fn from_label(raw: &str) -> Self {
                let trimmed = raw.trim();
                $name::ALL
                    .iter()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(trimmed))
                    .cloned()
                    .unwrap_or_else(|| $name::Other(trimmed.to_string()))
            }
        }

        labelled_enum!(@display $name);

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                Ok($name::from_label(raw))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Ok($name::from_label(&raw))
            }
        }
    };
}

labelled_enum!(
    strict
    /// Product line. Enumeration order is the order product splits are unioned in.
    Product {
        Por => "POR",
        R360 => "R360",
    }
);

labelled_enum!(Region {
    Amer => "AMER",
    Emea => "EMEA",
    Apac => "APAC",
});

labelled_enum!(Category {
    NewLogo => "NEW LOGO",
    Strategic => "STRATEGIC",
    Expansion => "EXPANSION",
    Migration => "MIGRATION",
    Renewal => "RENEWAL",
});

labelled_enum!(Source {
    Inbound => "INBOUND",
    Outbound => "OUTBOUND",
    AeSourced => "AE SOURCED",
    AmSourced => "AM SOURCED",
    Tradeshow => "TRADESHOW",
    Partnerships => "PARTNERSHIPS",
});

labelled_enum!(RagStatus {
    Green => "GREEN",
    Yellow => "YELLOW",
    Red => "RED",
});

labelled_enum!(PipelineHealth {
    Healthy => "HEALTHY",
    Adequate => "ADEQUATE",
    AtRisk => "AT_RISK",
});

labelled_enum!(Severity {
    Critical => "CRITICAL",
    High => "HIGH",
    Medium => "MEDIUM",
    Low => "LOW",
});

/// Warehouse exports emit `null` for empty aggregates.
fn zero_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttainmentRow {
    pub product: Product,
    pub region: Region,
    pub category: Category,
    #[serde(default)]
    pub fy_target: Option<f64>,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub q1_target: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub qtd_target: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub qtd_acv: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub qtd_attainment_pct: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub qtd_gap: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub pipeline_acv: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub pipeline_coverage_x: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub win_rate_pct: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub qtd_lost_deals: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub qtd_lost_acv: f64,
    pub rag_status: RagStatus,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceAttainmentRow {
    pub region: Region,
    pub source: Source,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub q1_target: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub qtd_target: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub qtd_acv: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub attainment_pct: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub gap: f64,
    pub rag_status: RagStatus,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PipelineRcaRow {
    pub product: Product,
    pub region: Region,
    pub category: Category,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub pipeline_acv: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub pipeline_coverage_x: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub pipeline_avg_age_days: f64,
    #[serde(default)]
    pub pipeline_health: Option<PipelineHealth>,
    #[serde(default)]
    pub rca_commentary: String,
    #[serde(default)]
    pub recommended_action: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LossReasonRow {
    pub product: Product,
    pub region: Region,
    pub loss_reason: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub deal_count: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub lost_acv: f64,
    pub severity: Severity,
}

/// Won, lost or still open; derived from the two closed/won flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealStatus {
    Won,
    Lost,
    Open,
}

impl DealStatus {
    pub const LABELS: &'static [&'static str] = &["WON", "LOST", "OPEN"];

    pub fn as_str(self) -> &'static str {
        match self {
            DealStatus::Won => "WON",
            DealStatus::Lost => "LOST",
            DealStatus::Open => "OPEN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DealDetail {
    pub opportunity_id: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub opportunity_name: String,
    pub product: Product,
    #[serde(default)]
    pub region: Option<Region>,
    pub category: Category,
    #[serde(default)]
    pub deal_type: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub acv: f64,
    #[serde(default)]
    pub close_date: String,
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub is_won: bool,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub loss_reason: Option<String>,
    pub source: Source,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub salesforce_url: String,
}

impl DealDetail {
    pub fn status(&self) -> DealStatus {
        match (self.is_closed, self.is_won) {
            (_, true) => DealStatus::Won,
            (true, false) => DealStatus::Lost,
            (false, false) => DealStatus::Open,
        }
    }
}

/// A report section split into one array per product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ByProduct<T> {
    #[serde(rename = "POR", default)]
    pub por: Vec<T>,
    #[serde(rename = "R360", default)]
    pub r360: Vec<T>,
}

impl<T> Default for ByProduct<T> {
    fn default() -> Self {
        Self {
            por: Vec::new(),
            r360: Vec::new(),
        }
    }
}

impl<T: Clone> ByProduct<T> {
    pub fn rows(&self, product: Product) -> &[T] {
        match product {
            Product::Por => &self.por,
            Product::R360 => &self.r360,
        }
    }

    pub fn push(&mut self, product: Product, row: T) {
        match product {
            Product::Por => self.por.push(row),
            Product::R360 => self.r360.push(row),
        }
    }

    /// `"ALL"` concatenates POR then R360; a product key returns that split.
    pub fn select(&self, selected: &str) -> Cow<'_, [T]> {
        let variants: Vec<(&str, &[T])> = Product::ALL
            .iter()
            .map(|product| (product.as_str(), self.rows(*product)))
            .collect();
        union_variants(&variants, selected)
    }

    pub fn len(&self) -> usize {
        self.por.len() + self.r360.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Period {
    #[serde(default)]
    pub as_of_date: String,
    #[serde(default)]
    pub quarter_pct_complete: f64,
    #[serde(default)]
    pub days_elapsed: i64,
    #[serde(default)]
    pub total_days: i64,
}

/// The batch job's report. Sections this viewer does not render are
/// ignored on load.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportData {
    pub report_date: String,
    pub query_version: String,
    pub period: Period,
    pub attainment_detail: ByProduct<AttainmentRow>,
    pub source_attainment: ByProduct<SourceAttainmentRow>,
    pub pipeline_rca: ByProduct<PipelineRcaRow>,
    pub loss_reason_rca: ByProduct<LossReasonRow>,
    pub won_deals: ByProduct<DealDetail>,
    pub lost_deals: ByProduct<DealDetail>,
    pub pipeline_deals: ByProduct<DealDetail>,
}

impl ReportData {
    /// Won, lost and open deals in that order, each unioned across products.
    pub fn all_deals(&self) -> Vec<DealDetail> {
        [&self.won_deals, &self.lost_deals, &self.pipeline_deals]
            .into_iter()
            .flat_map(|section| section.select(crate::engine::ALL).into_owned())
            .collect()
    }

    pub fn has_deals(&self) -> bool {
        !(self.won_deals.is_empty() && self.lost_deals.is_empty() && self.pipeline_deals.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category.clone()));
        }
        assert_eq!("ae sourced".parse::<Source>(), Ok(Source::AeSourced));
        assert_eq!(Region::from_label(" LATAM "), Region::Other("LATAM".to_string()));
        assert_eq!(Region::from_label("LATAM").as_str(), "LATAM");
        assert!("ACME".parse::<Product>().is_err());
    }

    #[test]
    fn unknown_and_missing_labels_still_deserialize() {
        let json = r#"{
            "product": "POR", "region": "AMER", "category": "OTHER",
            "pipeline_acv": 500, "pipeline_health": null
        }"#;
        let row: PipelineRcaRow = serde_json::from_str(json).expect("pipeline row should parse");
        assert_eq!(row.category, Category::Other("OTHER".to_string()));
        assert_eq!(row.pipeline_health, None);

        let json = r#"{
            "opportunity_id": "006B", "product": "POR", "region": null,
            "category": "MIGRATION", "source": "N/A", "acv": 100
        }"#;
        let deal: DealDetail = serde_json::from_str(json).expect("deal should parse");
        assert_eq!(deal.region, None);
        assert_eq!(deal.source, Source::Other("N/A".to_string()));
        assert_eq!(deal.status(), DealStatus::Open);
    }

    #[test]
    fn product_split_deserializes_from_upper_case_keys() {
        let json = r#"{
            "report_date": "2026-01-15",
            "attainment_detail": {
                "POR": [{
                    "product": "POR", "region": "AMER", "category": "NEW LOGO",
                    "q1_target": 1000, "qtd_target": 400, "qtd_acv": null,
                    "qtd_attainment_pct": 0, "qtd_gap": -400,
                    "pipeline_acv": 900, "pipeline_coverage_x": 0.9,
                    "win_rate_pct": 25, "qtd_lost_deals": 2, "qtd_lost_acv": 150,
                    "rag_status": "RED"
                }]
            },
            "funnel_by_category": {"POR": [], "R360": []}
        }"#;

        let report: ReportData = serde_json::from_str(json).expect("report should parse");

        assert_eq!(report.attainment_detail.por.len(), 1);
        assert!(report.attainment_detail.r360.is_empty());
        let row = &report.attainment_detail.por[0];
        assert_eq!(row.qtd_acv, 0.0);
        assert_eq!(row.fy_target, None);
        assert_eq!(row.rag_status, RagStatus::Red);
        assert!(!report.has_deals());
    }

    #[test]
    fn select_unions_products_in_order() {
        let mut split: ByProduct<&str> = ByProduct::default();
        split.push(Product::R360, "r1");
        split.push(Product::Por, "p1");
        split.push(Product::Por, "p2");

        assert_eq!(split.select("ALL").as_ref(), ["p1", "p2", "r1"]);
        assert_eq!(split.select("R360").as_ref(), ["r1"]);
        assert!(split.select("OTHER").is_empty());
        assert_eq!(split.len(), 3);
    }

    #[test]
    fn deal_status_follows_flags() {
        let json = r#"{
            "opportunity_id": "006A", "product": "R360", "region": "EMEA",
            "category": "EXPANSION", "source": "OUTBOUND",
            "is_won": false, "is_closed": true, "loss_reason": "Price"
        }"#;

        let deal: DealDetail = serde_json::from_str(json).expect("deal should parse");

        assert_eq!(deal.status(), DealStatus::Lost);
        assert_eq!(deal.loss_reason.as_deref(), Some("Price"));
    }
}
