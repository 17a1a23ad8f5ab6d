//! Per-page PDF text extraction

use crate::error::IngestError;
use lading_domain::PAGE_BREAK_MARKER;
use lopdf::Document;
use tracing::debug;

/// Extract the full text of a PDF, page by page, from an in-memory buffer.
///
/// Pages are read in document order and joined with the page-break marker
/// between each page and the next, so the chunker can split the result back
/// into pages. A page whose extraction fails abandons the whole file with
/// the 1-based page number in the error.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, IngestError> {
    let doc = Document::load_mem(bytes).map_err(|e| IngestError::PdfLoad(e.to_string()))?;

    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(IngestError::EmptyPdf);
    }

    let total = pages.len();
    let mut page_texts = Vec::with_capacity(total);

    for &page_num in pages.keys() {
        let text = doc
            .extract_text(&[page_num])
            .map_err(|e| IngestError::PdfPage {
                page: page_num as usize,
                reason: e.to_string(),
            })?;
        debug!(
            "extracted page {}/{}, length: {} chars",
            page_num,
            total,
            text.len()
        );
        page_texts.push(text);
    }

    Ok(join_pages(&page_texts))
}

/// Join per-page texts with the page-break marker between every pair.
fn join_pages(pages: &[String]) -> String {
    pages.join(&format!("\n\n{}\n\n", PAGE_BREAK_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_places_marker_between_pages() {
        let joined = join_pages(&["one".to_string(), "two".to_string(), "three".to_string()]);
        assert_eq!(
            joined,
            "one\n\n=== PAGE BREAK ===\n\ntwo\n\n=== PAGE BREAK ===\n\nthree"
        );
        assert_eq!(joined.matches(PAGE_BREAK_MARKER).count(), 2);
    }

    #[test]
    fn test_join_single_page_has_no_marker() {
        let joined = join_pages(&["only".to_string()]);
        assert_eq!(joined, "only");
    }

    #[test]
    fn test_garbage_bytes_fail_to_load() {
        let result = extract_pdf_text(b"this is not a pdf");
        assert!(matches!(result, Err(IngestError::PdfLoad(_))));
    }
}
