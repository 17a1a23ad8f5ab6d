//! Lading LLM Provider Layer
//!
//! Pluggable text-generation providers behind one async trait.
//!
//! # Architecture
//!
//! Every provider receives a system-style instruction string and a
//! user-content string and returns the raw text completion. Interpretation
//! of that text (JSON repair, record parsing) belongs to the extractor
//! layer, not here.
//!
//! # Providers
//!
//! - [`MockProvider`]: deterministic mock for testing
//! - [`GeminiClient`]: generateContent API client with an ordered
//!   model-fallback chain
//!
//! # Examples
//!
//! ```
//! use lading_llm::{LlmProvider, MockProvider};
//!
//! # async fn example() {
//! let provider = MockProvider::new("[]");
//! let result = provider.complete("instruction", "content").await.unwrap();
//! assert_eq!(result, "[]");
//! # }
//! ```

#![warn(missing_docs)]

pub mod gemini;

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use gemini::GeminiClient;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// Non-success HTTP response from the API
    #[error("API error (HTTP {status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// Response arrived but the completion text could not be located
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Requested model does not exist at the endpoint
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Every model in the fallback chain failed
    #[error("All models failed: {0}")]
    AllModelsFailed(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Trait for text-generation providers.
///
/// `instruction` is the system-style framing; `content` is the user payload.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a text completion.
    async fn complete(&self, instruction: &str, content: &str) -> Result<String, LlmError>;
}

/// Mock provider for deterministic testing.
///
/// Responses are matched by substring against the user content: the first
/// registered needle found in the content wins, otherwise the default
/// response is returned. `add_error` registers a needle that produces an
/// error instead. No network calls are made.
///
/// # Examples
///
/// ```
/// use lading_llm::{LlmProvider, MockProvider};
///
/// # async fn example() {
/// let mut provider = MockProvider::new("[]");
/// provider.add_response("page two", r#"[{"vessel": "Maersk Essen"}]"#);
///
/// let hit = provider.complete("sys", "text of page two").await.unwrap();
/// assert!(hit.contains("Maersk Essen"));
///
/// let miss = provider.complete("sys", "unrelated").await.unwrap();
/// assert_eq!(miss, "[]");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    // (needle, response); None response means "fail this call"
    responses: Arc<Mutex<Vec<(String, Option<String>)>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a MockProvider with a fixed response for all calls.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Respond with `response` whenever the content contains `needle`.
    ///
    /// Needles are checked in registration order; first match wins.
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push((needle.into(), Some(response.into())));
    }

    /// Fail with an error whenever the content contains `needle`.
    pub fn add_error(&mut self, needle: impl Into<String>) {
        self.responses.lock().unwrap().push((needle.into(), None));
    }

    /// Number of completed `complete` calls so far.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call counter.
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn complete(&self, _instruction: &str, content: &str) -> Result<String, LlmError> {
        *self.call_count.lock().unwrap() += 1;

        let responses = self.responses.lock().unwrap();
        for (needle, response) in responses.iter() {
            if content.contains(needle.as_str()) {
                return match response {
                    Some(text) => Ok(text.clone()),
                    None => Err(LlmError::Other("Mock error".to_string())),
                };
            }
        }

        Ok(self.default_response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.complete("sys", "any content").await.unwrap();
        assert_eq!(result, "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_substring_match() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.complete("s", "say hello there").await.unwrap(), "world");
        assert_eq!(provider.complete("s", "foo fighters").await.unwrap(), "bar");
        assert_eq!(
            provider.complete("s", "unknown").await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_first_match_wins() {
        let mut provider = MockProvider::default();
        provider.add_response("page", "first");
        provider.add_response("page two", "second");

        assert_eq!(provider.complete("s", "page two").await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.complete("s", "one").await.unwrap();
        provider.complete("s", "two").await.unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad batch");

        let result = provider.complete("s", "this bad batch here").await;
        assert!(matches!(result, Err(LlmError::Other(_))));
        // Errors still count as calls
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.complete("s", "x").await.unwrap();
        assert_eq!(provider2.call_count(), 1);
    }
}
