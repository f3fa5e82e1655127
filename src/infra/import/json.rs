use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::entities::report::ReportData;
use crate::usecase::ports::report_source::{ReportError, ReportSource};

pub fn read_json_report(json_path: &Path) -> Result<ReportData> {
    let text = fs::read_to_string(json_path)
        .with_context(|| format!("failed to read report: {}", json_path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse report json: {}", json_path.display()))
}

/// The batch job's JSON report, product sections keyed `POR` / `R360`.
pub struct JsonReportSource {
    path: PathBuf,
}

impl JsonReportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSource for JsonReportSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<ReportData, ReportError> {
        std::fs::metadata(&self.path)?;
        let report =
            read_json_report(&self.path).map_err(|err| ReportError::parse(&self.path, err))?;
        info!(
            path = %self.path.display(),
            report_date = %report.report_date,
            attainment_rows = report.attainment_detail.len(),
            "loaded json report"
        );
        Ok(report)
    }
}
