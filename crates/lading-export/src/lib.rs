//! Lading Export
//!
//! Serializes a record sequence to CSV, JSON, or a one-sheet xlsx workbook,
//! with timestamp-based download filenames. The input is an explicit
//! sequence of JSON objects (usually, but not necessarily, the session's
//! current result set), so clients can export a filtered subset.

#![warn(missing_docs)]

mod error;

pub use error::ExportError;

use chrono::Utc;
use lading_domain::schema::FieldSchema;
use serde_json::Value;
use std::str::FromStr;

/// One exportable record: a flat JSON object.
pub type JsonRecord = serde_json::Map<String, Value>;

/// Provenance columns appended after the schema columns.
const PROVENANCE_COLUMNS: &[&str] = &["source_file", "processed_at", "record_id"];

/// Sheet name used in workbook exports.
const SHEET_NAME: &str = "Shipping Data";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values (text payload)
    Csv,
    /// One-sheet xlsx workbook (binary payload)
    Spreadsheet,
    /// Pretty-printed JSON (text payload)
    Json,
}

impl ExportFormat {
    /// File extension for download naming.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Spreadsheet => "xlsx",
            ExportFormat::Json => "json",
        }
    }

    /// MIME type for the payload.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Json => "application/json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    /// Accepts the wire names used by the export endpoint. `excel` is the
    /// historical name for the workbook format.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" => Ok(ExportFormat::Spreadsheet),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Serialized export output.
#[derive(Debug, Clone)]
pub enum ExportPayload {
    /// Text for client-side download (csv, json)
    Text(String),
    /// Binary workbook stream (xlsx)
    Binary(Vec<u8>),
}

/// A finished export: payload plus suggested filename.
#[derive(Debug, Clone)]
pub struct Export {
    /// Suggested download filename, timestamp-based
    pub filename: String,
    /// The serialized data
    pub payload: ExportPayload,
}

/// Serialize `records` in the requested format.
///
/// Fails with [`ExportError::NoData`] on an empty sequence, whatever the
/// format.
pub fn export_records(records: &[JsonRecord], format: ExportFormat) -> Result<Export, ExportError> {
    if records.is_empty() {
        return Err(ExportError::NoData);
    }

    let payload = match format {
        ExportFormat::Csv => ExportPayload::Text(to_csv(records)?),
        ExportFormat::Json => ExportPayload::Text(to_json(records)?),
        ExportFormat::Spreadsheet => ExportPayload::Binary(to_workbook(records)?),
    };

    Ok(Export {
        filename: download_filename(format),
        payload,
    })
}

/// Timestamped download filename, e.g. `shipping_data_20260315_142255.csv`.
pub fn download_filename(format: ExportFormat) -> String {
    format!(
        "shipping_data_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Column order for tabular formats: schema fields first (schema order),
/// then provenance, then whatever else the records carry.
fn column_order(records: &[JsonRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();

    for &field in FieldSchema::fields() {
        if records.iter().any(|r| r.contains_key(field)) {
            columns.push(field.to_string());
        }
    }

    for &field in PROVENANCE_COLUMNS {
        if records.iter().any(|r| r.contains_key(field)) {
            columns.push(field.to_string());
        }
    }

    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }

    columns
}

/// Render a record value as cell text.
fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

fn to_csv(records: &[JsonRecord]) -> Result<String, ExportError> {
    let columns = column_order(records);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&columns)
        .map_err(|e| ExportError::Csv(e.to_string()))?;

    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|col| render_cell(record.get(col)))
            .collect();
        writer
            .write_record(&row)
            .map_err(|e| ExportError::Csv(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Csv(e.to_string()))
}

fn to_json(records: &[JsonRecord]) -> Result<String, ExportError> {
    serde_json::to_string_pretty(records).map_err(|e| ExportError::Json(e.to_string()))
}

fn to_workbook(records: &[JsonRecord]) -> Result<Vec<u8>, ExportError> {
    let columns = column_order(records);

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| ExportError::Workbook(e.to_string()))?;

    for (col, name) in columns.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, name.as_str())
            .map_err(|e| ExportError::Workbook(e.to_string()))?;
    }

    for (row, record) in records.iter().enumerate() {
        for (col, name) in columns.iter().enumerate() {
            let cell = render_cell(record.get(name));
            worksheet
                .write_string((row + 1) as u32, col as u16, cell.as_str())
                .map_err(|e| ExportError::Workbook(e.to_string()))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ExportError::Workbook(e.to_string()))
}
