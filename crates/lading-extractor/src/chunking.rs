//! Page-boundary chunking for oversized documents

use lading_domain::PAGE_BREAK_MARKER;

/// One group of consecutive pages destined for a single model call.
#[derive(Debug, Clone)]
pub struct Batch {
    /// 1-based batch number
    pub index: usize,
    /// 1-based page span (first, last) covered by this batch
    pub pages: (usize, usize),
    /// The pages' text, joined with blank lines
    pub text: String,
}

impl Batch {
    /// Whether the batch holds nothing worth sending to the model.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Splits page-delimited text into fixed-size page batches.
pub struct PageChunker {
    pages_per_batch: usize,
}

impl PageChunker {
    /// Create a chunker grouping `pages_per_batch` pages per batch.
    pub fn new(pages_per_batch: usize) -> Self {
        Self { pages_per_batch }
    }

    /// Split document text into per-page segments on the page-break marker.
    pub fn split_pages(text: &str) -> Vec<&str> {
        text.split(PAGE_BREAK_MARKER).collect()
    }

    /// Partition the document's pages into ordered, disjoint batches.
    ///
    /// The last batch may be shorter. Blank batches are kept so callers can
    /// account for them; they are skipped at call time, not here.
    pub fn batches(&self, text: &str) -> Vec<Batch> {
        let pages = Self::split_pages(text);

        pages
            .chunks(self.pages_per_batch)
            .enumerate()
            .map(|(idx, group)| {
                let first = idx * self.pages_per_batch + 1;
                let last = first + group.len() - 1;
                Batch {
                    index: idx + 1,
                    pages: (first, last),
                    text: group
                        .iter()
                        .map(|p| p.trim())
                        .collect::<Vec<_>>()
                        .join("\n\n"),
                }
            })
            .collect()
    }
}
