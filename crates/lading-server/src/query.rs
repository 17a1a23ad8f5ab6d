//! Free-text questions over the stored results.
//!
//! The entire ResultSet is serialized to JSON and handed to the model with
//! the question; the answer comes back verbatim. An empty ResultSet never
//! reaches the model.

use lading_domain::Record;
use lading_llm::LlmProvider;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Query failure modes
#[derive(Debug, Error)]
pub enum QueryError {
    /// Session has no extraction results yet
    #[error("No extraction results available. Please upload and process files first.")]
    NoData,

    /// Results could not be serialized for the prompt
    #[error("Failed to serialize results: {0}")]
    Serialize(String),

    /// Model call failed
    #[error("{0}")]
    Llm(String),
}

const QUERY_INSTRUCTION: &str =
    "You are an assistant that answers questions about shipping and logistics information. \
     Use only the provided data to answer questions. Keep your answers concise and focused \
     on the data provided.";

/// Answers questions about a session's extracted records.
pub struct QueryResponder {
    provider: Arc<dyn LlmProvider>,
}

impl QueryResponder {
    /// Create a responder over the given provider.
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Answer `question` from `records`.
    ///
    /// Fails with [`QueryError::NoData`] on an empty record set, before any
    /// model call is made.
    pub async fn answer(&self, question: &str, records: &[Record]) -> Result<String, QueryError> {
        if records.is_empty() {
            return Err(QueryError::NoData);
        }

        let data = serde_json::to_string(records).map_err(|e| QueryError::Serialize(e.to_string()))?;

        debug!(
            "answering question over {} records ({} chars of data)",
            records.len(),
            data.len()
        );

        let content = format!("Here is the shipping data:\n{}\n\nQuestion: {}", data, question);

        self.provider
            .complete(QUERY_INSTRUCTION, &content)
            .await
            .map_err(|e| QueryError::Llm(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lading_llm::MockProvider;
    use serde_json::json;

    fn records() -> Vec<Record> {
        vec![Record::from_raw(
            json!({ "vessel": "Ever Given", "voyage": "25E" })
                .as_object()
                .unwrap(),
            "manifest.pdf",
        )]
    }

    #[tokio::test]
    async fn test_empty_result_set_never_calls_the_model() {
        let provider = MockProvider::new("should not be used");
        let responder = QueryResponder::new(Arc::new(provider.clone()));

        let result = responder.answer("how many shipments?", &[]).await;
        assert!(matches!(result, Err(QueryError::NoData)));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_answer_passes_through_verbatim() {
        let provider = MockProvider::new("There is one shipment on the Ever Given.");
        let responder = QueryResponder::new(Arc::new(provider.clone()));

        let answer = responder
            .answer("how many shipments?", &records())
            .await
            .unwrap();
        assert_eq!(answer, "There is one shipment on the Ever Given.");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_prompt_embeds_data_and_question() {
        let mut provider = MockProvider::new("miss");
        // The content must carry both the serialized records and the question.
        provider.add_response("Ever Given", "saw the data");
        let responder = QueryResponder::new(Arc::new(provider.clone()));

        let answer = responder.answer("which vessel?", &records()).await.unwrap();
        assert_eq!(answer, "saw the data");
    }

    #[tokio::test]
    async fn test_model_failure_is_reported() {
        let mut provider = MockProvider::new("ok");
        provider.add_error("broken");
        let responder = QueryResponder::new(Arc::new(provider));

        let result = responder.answer("broken question", &records()).await;
        assert!(matches!(result, Err(QueryError::Llm(_))));
    }
}
