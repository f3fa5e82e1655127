pub mod csv;
pub mod json;
pub mod tabular;
pub mod xlsx;

use std::path::Path;
use std::sync::Arc;

use crate::usecase::ports::report_source::{ReportError, ReportSource};

/// Picks a source from the file extension.
pub fn report_source_for(path: &Path) -> Result<Arc<dyn ReportSource>, ReportError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "json" => Ok(Arc::new(self::json::JsonReportSource::new(path))),
        "csv" => Ok(Arc::new(self::csv::CsvReportSource::new(path))),
        "xlsx" | "xls" => Ok(Arc::new(self::xlsx::XlsxReportSource::new(path))),
        _ => Err(ReportError::UnsupportedFormat(path.to_path_buf())),
    }
}
