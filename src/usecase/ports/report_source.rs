use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::report::ReportData;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse report {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported report format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("sheet not found: {0}")]
    MissingSheet(String),

    #[error("no report loaded")]
    NotLoaded,
}

impl ReportError {
    /// Wraps an infrastructure error, keeping its whole context chain.
    pub fn parse(path: &Path, err: anyhow::Error) -> Self {
        ReportError::Parse {
            path: path.to_path_buf(),
            message: format!("{err:#}"),
        }
    }
}

/// Anything that can produce a full report on demand.
pub trait ReportSource: Send + Sync {
    /// Short label for status lines and logs, usually the file path.
    fn describe(&self) -> String;

    fn load(&self) -> Result<ReportData, ReportError>;
}
