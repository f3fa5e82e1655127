use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use tracing::info;

use crate::domain::entities::report::ReportData;
use crate::infra::import::tabular::attainment_report;
use crate::usecase::ports::report_source::{ReportError, ReportSource};

pub const ATTAINMENT_SHEET: &str = "attainment_detail";

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

pub fn xlsx_sheet_names(xlsx_path: &Path) -> Result<Vec<String>> {
    let workbook = open_workbook_auto(xlsx_path)
        .with_context(|| format!("failed to open xlsx: {}", xlsx_path.display()))?;
    Ok(workbook.sheet_names())
}

/// First row is the header; the rest are data rows as display strings.
pub fn read_xlsx_rows(xlsx_path: &Path, sheet: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut workbook = open_workbook_auto(xlsx_path)
        .with_context(|| format!("failed to open xlsx: {}", xlsx_path.display()))?;
    let range = workbook
        .worksheet_range(sheet)
        .with_context(|| format!("failed to read sheet: {sheet}"))?;

    let mut rows = range
        .rows()
        .map(|r| r.iter().map(cell_to_string).collect::<Vec<String>>());
    let headers = rows
        .next()
        .with_context(|| format!("sheet {sheet} has no header row"))?;
    Ok((headers, rows.collect()))
}

/// Workbook export with the attainment detail on its own sheet.
pub struct XlsxReportSource {
    path: PathBuf,
    sheet: String,
}

impl XlsxReportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sheet: ATTAINMENT_SHEET.to_string(),
        }
    }
}

impl ReportSource for XlsxReportSource {
    fn describe(&self) -> String {
        format!("{}#{}", self.path.display(), self.sheet)
    }

    fn load(&self) -> Result<ReportData, ReportError> {
        std::fs::metadata(&self.path)?;
        let sheets =
            xlsx_sheet_names(&self.path).map_err(|err| ReportError::parse(&self.path, err))?;
        if !sheets.iter().any(|name| name == &self.sheet) {
            return Err(ReportError::MissingSheet(self.sheet.clone()));
        }

        let (headers, rows) = read_xlsx_rows(&self.path, &self.sheet)
            .map_err(|err| ReportError::parse(&self.path, err))?;
        let report =
            attainment_report(&headers, &rows).map_err(|err| ReportError::parse(&self.path, err))?;
        info!(
            path = %self.path.display(),
            sheet = %self.sheet,
            rows = rows.len(),
            "loaded xlsx report"
        );
        Ok(report)
    }
}
