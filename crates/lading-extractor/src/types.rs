//! Result types for extraction

/// A raw record mapping as the model produced it, before schema
/// normalization. Keys may or may not match the field schema.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Result of extracting one document.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// Merged record mappings, in batch order
    pub records: Vec<RawRecord>,

    /// Model calls the pipeline planned (1 on the direct path)
    pub batches_total: usize,

    /// Batches that failed and contributed nothing
    pub batches_failed: usize,

    /// One entry per failed batch
    pub failures: Vec<BatchFailure>,
}

/// A batch that produced no records, and why.
#[derive(Debug, Clone)]
pub struct BatchFailure {
    /// 1-based batch number
    pub batch_index: usize,

    /// 1-based page span (first, last) the batch covered
    pub pages: (usize, usize),

    /// Failure reason (model error or parse error)
    pub reason: String,
}
