//! Lading Domain Layer
//!
//! Core types shared by every other crate in the workspace: the fixed
//! shipment field schema, the extracted `Record` with its provenance
//! attributes, and the page-break marker that stitches multi-page document
//! text together.
//!
//! ## Key Concepts
//!
//! - **FieldSchema**: the fixed, ordered set of fields extracted from every
//!   document. No field is required; a missing value is an empty string.
//! - **Record**: one extracted shipment - schema fields plus `source_file`,
//!   `processed_at`, and a unique `record_id`.
//! - **Page-break marker**: the literal separator between per-page text
//!   segments inside a document's combined text.
//!
//! Infrastructure (model calls, parsing, HTTP) lives in the other crates;
//! this one stays close to dependency-free.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod record;
pub mod schema;

// Re-exports for convenience
pub use record::{Record, RecordId};
pub use schema::{FieldSchema, PAGE_BREAK_MARKER};
