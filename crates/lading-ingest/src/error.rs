//! Error types for document ingestion

use thiserror::Error;

/// Errors that can occur while extracting document content
#[derive(Error, Debug)]
pub enum IngestError {
    /// PDF could not be opened at all
    #[error("Failed to load PDF: {0}")]
    PdfLoad(String),

    /// One page's text extraction failed; the whole file is abandoned
    #[error("Failed to extract text from page {page}: {reason}")]
    PdfPage {
        /// 1-based page number
        page: usize,
        /// Underlying extraction error
        reason: String,
    },

    /// PDF opened but contains no pages
    #[error("PDF contains no pages")]
    EmptyPdf,

    /// Workbook could not be opened or read
    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(String),

    /// Workbook has no worksheets
    #[error("Spreadsheet has no worksheets")]
    NoWorksheet,

    /// First row (column headers) is missing
    #[error("Missing header row")]
    MissingHeaders,

    /// CSV structure error
    #[error("Failed to parse CSV: {0}")]
    Csv(String),

    /// Recognized but unsupported kind (images, until OCR lands)
    #[error("File type {0} processing not implemented yet")]
    NotImplemented(String),

    /// Extension outside the recognized set
    #[error("Unrecognized file type: {0}")]
    Unrecognized(String),
}
