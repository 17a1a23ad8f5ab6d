//! Core extraction pipeline

use crate::chunking::{Batch, PageChunker};
use crate::config::ExtractorConfig;
use crate::error::ExtractError;
use crate::parser::parse_record_payload;
use crate::prompt::PromptBuilder;
use crate::types::{BatchFailure, ExtractionOutcome, RawRecord};
use lading_llm::LlmProvider;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns page-delimited document text into raw record mappings.
///
/// Small documents go out in one full-document call whose failure fails the
/// extraction. Large documents are split into page batches; each batch call
/// stands alone, so one bad batch costs only its own records.
pub struct Extractor {
    provider: Arc<dyn LlmProvider>,
    config: ExtractorConfig,
}

impl Extractor {
    /// Create a new Extractor.
    pub fn new(provider: Arc<dyn LlmProvider>, config: ExtractorConfig) -> Self {
        Self { provider, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract shipment records from document text.
    pub async fn extract(&self, text: &str) -> Result<ExtractionOutcome, ExtractError> {
        let tokens = self.config.estimated_tokens(text);
        debug!("approximate token count: {}", tokens);

        if self.config.fits_direct(text) {
            self.extract_direct(text).await
        } else {
            info!(
                "document estimated at {} tokens, processing in page batches",
                tokens
            );
            self.extract_chunked(text).await
        }
    }

    /// Direct path: one call covering the whole document.
    async fn extract_direct(&self, text: &str) -> Result<ExtractionOutcome, ExtractError> {
        let prompt = PromptBuilder::full_document(text);

        let response = self
            .provider
            .complete(&prompt.instruction, &prompt.content)
            .await?;

        let records = parse_record_payload(&response)?;
        info!("extracted {} shipping records", records.len());

        Ok(ExtractionOutcome {
            records,
            batches_total: 1,
            batches_failed: 0,
            failures: Vec::new(),
        })
    }

    /// Chunked path: page batches, sequential calls, partial yield.
    async fn extract_chunked(&self, text: &str) -> Result<ExtractionOutcome, ExtractError> {
        let chunker = PageChunker::new(self.config.pages_per_batch);
        let batches = chunker.batches(text);
        let total = batches.len();

        info!("split document into {} page batches", total);

        let mut records: Vec<RawRecord> = Vec::new();
        let mut failures: Vec<BatchFailure> = Vec::new();

        for batch in &batches {
            if batch.is_blank() {
                debug!("skipping blank batch {}/{}", batch.index, total);
                continue;
            }

            debug!(
                "processing batch {}/{}, pages {}-{}",
                batch.index, total, batch.pages.0, batch.pages.1
            );

            match self.extract_batch(batch, total).await {
                Ok(batch_records) => {
                    debug!("found {} records in batch {}", batch_records.len(), batch.index);
                    records.extend(batch_records);
                }
                Err(e) => {
                    warn!("batch {}/{} failed: {}", batch.index, total, e);
                    failures.push(BatchFailure {
                        batch_index: batch.index,
                        pages: batch.pages,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "total records found across all batches: {} ({} batch(es) failed)",
            records.len(),
            failures.len()
        );

        Ok(ExtractionOutcome {
            records,
            batches_total: total,
            batches_failed: failures.len(),
            failures,
        })
    }

    async fn extract_batch(
        &self,
        batch: &Batch,
        batch_count: usize,
    ) -> Result<Vec<RawRecord>, ExtractError> {
        let prompt = PromptBuilder::batch(&batch.text, batch.index, batch_count);

        let response = self
            .provider
            .complete(&prompt.instruction, &prompt.content)
            .await?;

        parse_record_payload(&response)
    }
}
