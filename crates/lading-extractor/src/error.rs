//! Error types for the extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Model provider error (direct path; chunked batches absorb these)
    #[error("Model error: {0}")]
    Llm(String),

    /// Response was not a usable JSON payload
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractError {
    fn from(e: serde_json::Error) -> Self {
        ExtractError::JsonParse(e.to_string())
    }
}

impl From<lading_llm::LlmError> for ExtractError {
    fn from(e: lading_llm::LlmError) -> Self {
        ExtractError::Llm(e.to_string())
    }
}
