//! Binds the report records to the view engine.

use std::cmp::Ordering;

use crate::domain::entities::report::{
    AttainmentRow, DealDetail, LossReasonRow, PipelineHealth, PipelineRcaRow, Region,
    SourceAttainmentRow,
};
use crate::engine::sort::locale_compare;
use crate::engine::{TableRow, Value};

impl TableRow for AttainmentRow {
    fn dimensions() -> &'static [&'static str] {
        &["product", "region", "category", "rag_status"]
    }

    fn value(&self, column: &str) -> Value {
        match column {
            "product" => self.product.as_str().into(),
            "region" => self.region.as_str().into(),
            "category" => self.category.as_str().into(),
            "fy_target" => self.fy_target.into(),
            "q1_target" => self.q1_target.into(),
            "qtd_target" => self.qtd_target.into(),
            "qtd_acv" => self.qtd_acv.into(),
            "qtd_attainment_pct" => self.qtd_attainment_pct.into(),
            "qtd_gap" => self.qtd_gap.into(),
            "pipeline_acv" => self.pipeline_acv.into(),
            "pipeline_coverage_x" => self.pipeline_coverage_x.into(),
            "win_rate_pct" => self.win_rate_pct.into(),
            "qtd_lost_deals" => self.qtd_lost_deals.into(),
            "qtd_lost_acv" => self.qtd_lost_acv.into(),
            "rag_status" => self.rag_status.as_str().into(),
            _ => Value::Null,
        }
    }
}

impl TableRow for SourceAttainmentRow {
    fn dimensions() -> &'static [&'static str] {
        &["region", "source", "rag_status"]
    }

    fn value(&self, column: &str) -> Value {
        match column {
            "region" => self.region.as_str().into(),
            "source" => self.source.as_str().into(),
            "q1_target" => self.q1_target.into(),
            "qtd_target" => self.qtd_target.into(),
            "qtd_acv" => self.qtd_acv.into(),
            "attainment_pct" => self.attainment_pct.into(),
            "gap" => self.gap.into(),
            "rag_status" => self.rag_status.as_str().into(),
            _ => Value::Null,
        }
    }
}

impl TableRow for PipelineRcaRow {
    fn dimensions() -> &'static [&'static str] {
        &["product", "region", "category", "pipeline_health"]
    }

    fn value(&self, column: &str) -> Value {
        match column {
            "product" => self.product.as_str().into(),
            "region" => self.region.as_str().into(),
            "category" => self.category.as_str().into(),
            "pipeline_acv" => self.pipeline_acv.into(),
            "pipeline_coverage_x" => self.pipeline_coverage_x.into(),
            "pipeline_avg_age_days" => self.pipeline_avg_age_days.into(),
            "pipeline_health" => self
                .pipeline_health
                .as_ref()
                .map(PipelineHealth::as_str)
                .into(),
            "rca_commentary" => self.rca_commentary.as_str().into(),
            "recommended_action" => self.recommended_action.as_str().into(),
            _ => Value::Null,
        }
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.rca_commentary.as_str()),
            Some(self.recommended_action.as_str()),
        ]
    }
}

impl TableRow for LossReasonRow {
    fn dimensions() -> &'static [&'static str] {
        &["product", "region", "severity"]
    }

    fn value(&self, column: &str) -> Value {
        match column {
            "product" => self.product.as_str().into(),
            "region" => self.region.as_str().into(),
            "loss_reason" => self.loss_reason.as_str().into(),
            "deal_count" => self.deal_count.into(),
            "lost_acv" => self.lost_acv.into(),
            "severity" => self.severity.as_str().into(),
            _ => Value::Null,
        }
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.loss_reason.as_str())]
    }
}

impl TableRow for DealDetail {
    fn dimensions() -> &'static [&'static str] {
        &["product", "region", "category", "status"]
    }

    fn value(&self, column: &str) -> Value {
        match column {
            "opportunity_id" => self.opportunity_id.as_str().into(),
            "account_name" => self.account_name.as_str().into(),
            "opportunity_name" => self.opportunity_name.as_str().into(),
            "product" => self.product.as_str().into(),
            "region" => self.region.as_ref().map(Region::as_str).into(),
            "category" => self.category.as_str().into(),
            "deal_type" => self.deal_type.as_str().into(),
            "acv" => self.acv.into(),
            "close_date" => Value::date_or_text(&self.close_date),
            "stage" => self.stage.as_str().into(),
            "status" => self.status().as_str().into(),
            "loss_reason" => self.loss_reason.as_deref().into(),
            "source" => self.source.as_str().into(),
            "owner_name" => self.owner_name.as_str().into(),
            _ => Value::Null,
        }
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.account_name.as_str()),
            Some(self.opportunity_name.as_str()),
            Some(self.owner_name.as_str()),
            self.loss_reason.as_deref(),
        ]
    }
}

/// Worst attainment first.
pub fn attainment_default_order(a: &AttainmentRow, b: &AttainmentRow) -> Ordering {
    a.qtd_attainment_pct.total_cmp(&b.qtd_attainment_pct)
}

pub fn source_default_order(a: &SourceAttainmentRow, b: &SourceAttainmentRow) -> Ordering {
    a.attainment_pct.total_cmp(&b.attainment_pct)
}

/// Alphabetical by region, then product, then category label.
pub fn pipeline_default_order(a: &PipelineRcaRow, b: &PipelineRcaRow) -> Ordering {
    locale_compare(a.region.as_str(), b.region.as_str())
        .then_with(|| locale_compare(a.product.as_str(), b.product.as_str()))
        .then_with(|| locale_compare(a.category.as_str(), b.category.as_str()))
}

/// Biggest losses first.
pub fn loss_reason_default_order(a: &LossReasonRow, b: &LossReasonRow) -> Ordering {
    b.lost_acv.total_cmp(&a.lost_acv)
}

pub fn deal_default_order(a: &DealDetail, b: &DealDetail) -> Ordering {
    b.acv.total_cmp(&a.acv)
}
