//! Error types for export

use thiserror::Error;

/// Errors that can occur while serializing records
#[derive(Error, Debug)]
pub enum ExportError {
    /// Nothing to export
    #[error("No data to export")]
    NoData,

    /// Format name outside {csv, excel, json}
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// CSV serialization failure
    #[error("CSV export failed: {0}")]
    Csv(String),

    /// JSON serialization failure
    #[error("JSON export failed: {0}")]
    Json(String),

    /// Workbook construction failure
    #[error("Workbook export failed: {0}")]
    Workbook(String),
}
