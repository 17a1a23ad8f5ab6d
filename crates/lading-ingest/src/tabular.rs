//! Spreadsheet and CSV row extraction
//!
//! Both parsers produce the same shape: one JSON object per data row, keyed
//! by the column headers taken from the first row. Cell values are rendered
//! as strings; the record layer treats everything as text anyway.

use crate::error::IngestError;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use serde_json::Value;
use std::io::Cursor;
use tracing::warn;

/// One data row: column header → cell value.
pub type RowMap = serde_json::Map<String, Value>;

/// Parse CSV bytes into row mappings.
///
/// Flexible parsing: rows with fewer cells than headers get empty strings
/// for the missing columns, surplus cells are dropped, and rows the reader
/// cannot decode are skipped with a warning rather than failing the file.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<RowMap>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::Csv(format!("Failed to parse headers: {}", e)))?
        .iter()
        .map(|s| s.to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(IngestError::MissingHeaders);
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping malformed CSV row {}: {}", idx + 2, e);
                continue;
            }
        };

        let mut row = RowMap::new();
        for (col, header) in headers.iter().enumerate() {
            let cell = record.get(col).unwrap_or_default();
            row.insert(header.clone(), Value::String(cell.to_string()));
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Parse an Excel-family workbook into row mappings.
///
/// Reads the first worksheet only; headers come from its first row.
pub fn parse_spreadsheet(bytes: &[u8]) -> Result<Vec<RowMap>, IngestError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| IngestError::Spreadsheet(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(IngestError::NoWorksheet)?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::Spreadsheet(e.to_string()))?;

    let mut row_iter = range.rows();
    let headers: Vec<String> = row_iter
        .next()
        .ok_or(IngestError::MissingHeaders)?
        .iter()
        .map(render_cell)
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(IngestError::MissingHeaders);
    }

    let mut rows = Vec::new();
    for cells in row_iter {
        let mut row = RowMap::new();
        for (col, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let cell = cells.get(col).map(render_cell).unwrap_or_default();
            row.insert(header.clone(), Value::String(cell));
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Render a workbook cell as the string a record will carry.
fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Excel stores most integers as floats; keep "3" over "3.0".
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{:?}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_basic() {
        let bytes = b"container_number,vessel,voyage\nMSCU1234567,Ever Given,25E\nTCLU7654321,Maersk Essen,\n";
        let rows = parse_csv(bytes).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["container_number"], "MSCU1234567");
        assert_eq!(rows[0]["voyage"], "25E");
        assert_eq!(rows[1]["voyage"], "");
    }

    #[test]
    fn test_parse_csv_trims_whitespace() {
        let bytes = b"vessel , voyage\n Ever Given , 25E \n";
        let rows = parse_csv(bytes).unwrap();
        assert_eq!(rows[0]["vessel"], "Ever Given");
    }

    #[test]
    fn test_parse_csv_short_rows_fill_empty() {
        let bytes = b"a,b,c\n1,2\n";
        let rows = parse_csv(bytes).unwrap();
        assert_eq!(rows[0]["c"], "");
    }

    #[test]
    fn test_parse_csv_empty_input_missing_headers() {
        assert!(matches!(parse_csv(b""), Err(IngestError::MissingHeaders)));
    }

    #[test]
    fn test_parse_spreadsheet_round_trip() {
        // Build a small workbook in memory and read it back.
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "container_number").unwrap();
        sheet.write_string(0, 1, "number_of_packages").unwrap();
        sheet.write_string(1, 0, "MSCU1234567").unwrap();
        sheet.write_number(1, 1, 12.0).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = parse_spreadsheet(&bytes).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["container_number"], "MSCU1234567");
        assert_eq!(rows[0]["number_of_packages"], "12");
    }

    #[test]
    fn test_parse_spreadsheet_garbage_fails() {
        let result = parse_spreadsheet(b"not a workbook");
        assert!(matches!(result, Err(IngestError::Spreadsheet(_))));
    }

    #[test]
    fn test_render_cell_float_formats() {
        assert_eq!(render_cell(&Data::Float(3.0)), "3");
        assert_eq!(render_cell(&Data::Float(3.5)), "3.5");
        assert_eq!(render_cell(&Data::Empty), "");
    }
}
