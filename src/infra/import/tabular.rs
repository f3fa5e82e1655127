use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use crate::domain::entities::report::{
    AttainmentRow, ByProduct, Category, Product, RagStatus, Region, ReportData,
};

const REQUIRED_COLUMNS: &[&str] = &["product", "region", "category", "rag_status"];

pub fn parse_f64(value: &str) -> f64 {
    value.trim().replace(',', "").parse::<f64>().unwrap_or(0.0)
}

fn parse_optional_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(parse_f64(trimmed))
    }
}

pub fn row_value(row: &[String], idx: usize) -> String {
    row.get(idx).cloned().unwrap_or_default()
}

/// Header name to column index, matched case-insensitively.
struct HeaderIndex(HashMap<String, usize>);

impl HeaderIndex {
    fn new(headers: &[String]) -> Self {
        Self(
            headers
                .iter()
                .enumerate()
                .map(|(idx, name)| (name.trim().to_lowercase(), idx))
                .collect(),
        )
    }

    fn get(&self, row: &[String], column: &str) -> String {
        self.0
            .get(column)
            .map(|idx| row_value(row, *idx))
            .unwrap_or_default()
    }

    fn number(&self, row: &[String], column: &str) -> f64 {
        parse_f64(&self.get(row, column))
    }
}

fn parse_label<T>(raw: &str, line: usize) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    if raw.trim().is_empty() {
        return Err(anyhow!("missing value on line {line}"));
    }
    raw.parse::<T>()
        .map_err(|err| anyhow!("{err}"))
        .with_context(|| format!("invalid value on line {line}"))
}

/// Builds a report from a flat attainment export: one header row, one row
/// per product/region/category. Rows are split by their `product` column.
pub fn attainment_report(headers: &[String], rows: &[Vec<String>]) -> Result<ReportData> {
    let index = HeaderIndex::new(headers);
    for column in REQUIRED_COLUMNS {
        if !index.0.contains_key(*column) {
            anyhow::bail!("missing required column: {column}");
        }
    }

    let mut attainment_detail = ByProduct::default();
    for (row_idx, row) in rows.iter().enumerate() {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        // Header is line 1.
        let line = row_idx + 2;
        let product: Product = parse_label(&index.get(row, "product"), line)?;
        let attainment = AttainmentRow {
            product,
            region: parse_label::<Region>(&index.get(row, "region"), line)?,
            category: parse_label::<Category>(&index.get(row, "category"), line)?,
            fy_target: parse_optional_f64(&index.get(row, "fy_target")),
            q1_target: index.number(row, "q1_target"),
            qtd_target: index.number(row, "qtd_target"),
            qtd_acv: index.number(row, "qtd_acv"),
            qtd_attainment_pct: index.number(row, "qtd_attainment_pct"),
            qtd_gap: index.number(row, "qtd_gap"),
            pipeline_acv: index.number(row, "pipeline_acv"),
            pipeline_coverage_x: index.number(row, "pipeline_coverage_x"),
            win_rate_pct: index.number(row, "win_rate_pct"),
            qtd_lost_deals: index.number(row, "qtd_lost_deals"),
            qtd_lost_acv: index.number(row, "qtd_lost_acv"),
            rag_status: parse_label::<RagStatus>(&index.get(row, "rag_status"), line)?,
        };
        attainment_detail.push(product, attainment);
    }
    debug!(
        por = attainment_detail.por.len(),
        r360 = attainment_detail.r360.len(),
        "parsed attainment export"
    );

    Ok(ReportData {
        report_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        attainment_detail,
        ..ReportData::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parse_f64_accepts_thousands_separators() {
        assert_eq!(parse_f64(" 1,250.5 "), 1250.5);
        assert_eq!(parse_f64("n/a"), 0.0);
        assert_eq!(parse_optional_f64(""), None);
    }

    #[test]
    fn rows_split_by_product_and_headers_ignore_case() {
        let headers = strings(&["Product", "REGION", "category", "qtd_acv", "rag_status"]);
        let rows = vec![
            strings(&["R360", "EMEA", "EXPANSION", "1,000", "GREEN"]),
            strings(&["", "", "", "", ""]),
            strings(&["POR", "AMER", "NEW LOGO", "250", "red"]),
        ];

        let report = attainment_report(&headers, &rows).expect("rows should parse");

        assert_eq!(report.attainment_detail.por.len(), 1);
        assert_eq!(report.attainment_detail.r360.len(), 1);
        assert_eq!(report.attainment_detail.r360[0].qtd_acv, 1000.0);
        assert_eq!(report.attainment_detail.por[0].rag_status, RagStatus::Red);
        assert_eq!(report.attainment_detail.por[0].q1_target, 0.0);
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let headers = strings(&["product", "region", "category"]);

        let err = attainment_report(&headers, &[]).expect_err("should require rag_status");

        assert!(err.to_string().contains("rag_status"));
    }

    #[test]
    fn bad_label_reports_line_number() {
        let headers = strings(&["product", "region", "category", "rag_status"]);
        let rows = vec![strings(&["ACME", "AMER", "NEW LOGO", "GREEN"])];

        let err = attainment_report(&headers, &rows).expect_err("ACME is not a product");

        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn unlisted_labels_are_kept_and_blank_ones_rejected() {
        let headers = strings(&["product", "region", "category", "rag_status"]);
        let rows = vec![strings(&["POR", "LATAM", "OTHER", "GREEN"])];

        let report = attainment_report(&headers, &rows).expect("open labels should import");
        let row = &report.attainment_detail.por[0];
        assert_eq!(row.region, Region::Other("LATAM".to_string()));
        assert_eq!(row.category, Category::Other("OTHER".to_string()));

        let rows = vec![
            strings(&["POR", "AMER", "NEW LOGO", "GREEN"]),
            strings(&["R360", "", "NEW LOGO", "GREEN"]),
        ];
        let err = attainment_report(&headers, &rows).expect_err("blank region");
        assert!(format!("{err:#}").contains("missing value on line 3"));
    }
}
