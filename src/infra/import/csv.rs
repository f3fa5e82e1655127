use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::entities::report::ReportData;
use crate::infra::import::tabular::attainment_report;
use crate::usecase::ports::report_source::{ReportError, ReportSource};

pub fn read_csv_rows(csv_path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() {
        anyhow::bail!("csv header is required")
    }

    let header_len = headers.len();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to parse csv record")?;
        rows.push(
            (0..header_len)
                .map(|col_idx| record.get(col_idx).unwrap_or("").to_string())
                .collect(),
        );
    }
    Ok((headers, rows))
}

/// Attainment detail exported as CSV, one row per product/region/category.
pub struct CsvReportSource {
    path: PathBuf,
}

impl CsvReportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSource for CsvReportSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<ReportData, ReportError> {
        std::fs::metadata(&self.path)?;
        let (headers, rows) =
            read_csv_rows(&self.path).map_err(|err| ReportError::parse(&self.path, err))?;
        let report =
            attainment_report(&headers, &rows).map_err(|err| ReportError::parse(&self.path, err))?;
        info!(path = %self.path.display(), rows = rows.len(), "loaded csv report");
        Ok(report)
    }
}
