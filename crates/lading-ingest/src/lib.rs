//! Lading Ingest
//!
//! Turns uploaded document bytes into material the extraction pipeline can
//! work with: page-delimited text for PDFs, header-keyed row mappings for
//! spreadsheets and CSV files. Everything operates on in-memory byte
//! buffers; nothing is written to disk.
//!
//! ```text
//! bytes + filename → FileKind → { DocumentContent::Text | DocumentContent::Rows }
//! ```

#![warn(missing_docs)]

mod error;
mod file_type;
mod pdf;
mod tabular;

pub use error::IngestError;
pub use file_type::{is_allowed, FileKind};
pub use pdf::extract_pdf_text;
pub use tabular::{parse_csv, parse_spreadsheet, RowMap};

/// What the ingest layer produced for one file.
#[derive(Debug, Clone)]
pub enum DocumentContent {
    /// Page-delimited text (PDF path); feeds the chunk/merge pipeline.
    Text(String),
    /// Ordered row mappings (spreadsheet/CSV path); map straight to records.
    Rows(Vec<RowMap>),
}

/// Extract the content of one uploaded file.
///
/// The file kind is sniffed from the filename extension. Image kinds are
/// recognized by the upload filter but rejected here until OCR support
/// lands; unrecognized extensions are an error.
pub fn extract_document(bytes: &[u8], filename: &str) -> Result<DocumentContent, IngestError> {
    match FileKind::from_filename(filename) {
        Some(FileKind::Pdf) => Ok(DocumentContent::Text(extract_pdf_text(bytes)?)),
        Some(FileKind::Csv) => Ok(DocumentContent::Rows(parse_csv(bytes)?)),
        Some(FileKind::Spreadsheet) => Ok(DocumentContent::Rows(parse_spreadsheet(bytes)?)),
        Some(FileKind::Image) => Err(IngestError::NotImplemented(
            file_type::extension_of(filename).unwrap_or_default(),
        )),
        None => Err(IngestError::Unrecognized(filename.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_document_rejects_images() {
        let result = extract_document(b"GIF89a", "scan.gif");
        assert!(matches!(result, Err(IngestError::NotImplemented(ext)) if ext == "gif"));
    }

    #[test]
    fn test_extract_document_rejects_unknown_extension() {
        let result = extract_document(b"hello", "notes.txt");
        assert!(matches!(result, Err(IngestError::Unrecognized(_))));
    }

    #[test]
    fn test_extract_document_routes_csv() {
        let csv = b"container_number,vessel\nMSCU1234567,Ever Given\n";
        match extract_document(csv, "manifest.csv").unwrap() {
            DocumentContent::Rows(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0]["vessel"], "Ever Given");
            }
            other => panic!("expected rows, got {:?}", other),
        }
    }
}
