//! Lading Extractor
//!
//! Converts page-delimited document text into shipment record mappings via
//! a generative-model call, chunking oversized documents along page
//! boundaries.
//!
//! # Architecture
//!
//! ```text
//! DocumentText → size estimate → { direct call | page batches → N calls } → merged records
//! ```
//!
//! # Key Behaviors
//!
//! - **Token gate**: text under the configured threshold goes out in a
//!   single full-document call; anything larger is split on page-break
//!   markers and processed in fixed-size page batches.
//! - **Output repair**: model responses are sliced down to the outermost
//!   JSON array before parsing, tolerating prose wrappers.
//! - **Partial yield**: a failing batch is recorded and skipped; the other
//!   batches' records still merge, in batch order.
//!
//! # Example Usage
//!
//! ```no_run
//! use lading_extractor::{Extractor, ExtractorConfig};
//! use lading_llm::MockProvider;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(MockProvider::new("[]"));
//! let extractor = Extractor::new(provider, ExtractorConfig::default());
//!
//! let outcome = extractor.extract("Bill of lading text...").await?;
//! println!("{} records, {} failed batches", outcome.records.len(), outcome.batches_failed);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;

pub use chunking::{Batch, PageChunker};
pub use config::ExtractorConfig;
pub use error::ExtractError;
pub use extractor::Extractor;
pub use parser::{parse_record_payload, repair_json_array};
pub use prompt::{ExtractionPrompt, PromptBuilder};
pub use types::{BatchFailure, ExtractionOutcome, RawRecord};
