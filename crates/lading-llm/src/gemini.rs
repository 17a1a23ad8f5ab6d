//! generateContent API client
//!
//! HTTP integration with the Gemini generateContent endpoint.
//!
//! # Features
//!
//! - Async JSON transport via reqwest
//! - Ordered model-fallback chain: models are tried in sequence and the
//!   first success wins; exhaustion surfaces an aggregated failure naming
//!   every model and its error
//! - Configurable endpoint, generation parameters, and request timeout

use crate::{LlmError, LlmProvider};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model chain: primary, then the legacy fallback
pub const DEFAULT_MODELS: &[&str] = &["gemini-2.0-flash", "gemini-pro"];

/// Default request timeout, sized for large extraction prompts
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// generateContent API client.
///
/// One client instance carries one set of generation parameters; create
/// separate instances for workloads that need different temperatures.
pub struct GeminiClient {
    endpoint: String,
    api_key: String,
    models: Vec<String>,
    client: reqwest::Client,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    /// Create a client with an explicit model chain.
    ///
    /// `models` are tried in order on every call. An empty chain is
    /// replaced by [`DEFAULT_MODELS`].
    pub fn new(api_key: impl Into<String>, models: Vec<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        let models = if models.is_empty() {
            DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
        } else {
            models
        };

        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            models,
            client,
            temperature: 0.0,
            max_output_tokens: 8192,
        }
    }

    /// Create a client with the default model chain.
    pub fn default_models(api_key: impl Into<String>) -> Self {
        Self::new(api_key, Vec::new())
    }

    /// Override the API endpoint (tests, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the generation parameters.
    pub fn with_generation(mut self, temperature: f32, max_output_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// The configured model chain, in try order.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Build the generateContent request body.
    fn build_request_body(&self, instruction: &str, content: &str) -> serde_json::Value {
        json!({
            "system_instruction": {
                "parts": [{ "text": instruction }],
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": content }],
            }],
            "generationConfig": {
                "temperature": self.temperature,
                "topP": 0.95,
                "topK": 0,
                "maxOutputTokens": self.max_output_tokens,
            },
        })
    }

    /// One call against one model.
    async fn complete_with_model(
        &self,
        model: &str,
        instruction: &str,
        content: &str,
    ) -> Result<String, LlmError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, model, self.api_key,
        );

        let body = self.build_request_body(instruction, content);

        debug!("generateContent request, model={}", model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(model.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let text = resp["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                LlmError::InvalidResponse(
                    "missing candidates[0].content.parts[0].text".to_string(),
                )
            })?
            .to_string();

        Ok(text)
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn complete(&self, instruction: &str, content: &str) -> Result<String, LlmError> {
        let mut failures = Vec::new();

        for model in &self.models {
            match self.complete_with_model(model, instruction, content).await {
                Ok(text) => {
                    if !failures.is_empty() {
                        warn!(
                            "model {} succeeded after {} failed attempt(s)",
                            model,
                            failures.len()
                        );
                    }
                    return Ok(text);
                }
                Err(e) => {
                    warn!("model {} failed: {}", model, e);
                    failures.push(format!("{}: {}", model, e));
                }
            }
        }

        Err(LlmError::AllModelsFailed(failures.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults() {
        let client = GeminiClient::default_models("key");
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(client.models(), DEFAULT_MODELS);
        assert_eq!(client.temperature, 0.0);
        assert_eq!(client.max_output_tokens, 8192);
    }

    #[test]
    fn test_explicit_model_chain() {
        let client = GeminiClient::new("key", vec!["custom-model".to_string()]);
        assert_eq!(client.models(), &["custom-model".to_string()]);
    }

    #[test]
    fn test_with_generation() {
        let client = GeminiClient::default_models("key").with_generation(0.2, 4096);
        assert!((client.temperature - 0.2).abs() < 1e-6);
        assert_eq!(client.max_output_tokens, 4096);
    }

    #[test]
    fn test_request_body_structure() {
        let client = GeminiClient::default_models("key");
        let body = client.build_request_body("You are helpful.", "Hello");

        assert_eq!(
            body["system_instruction"]["parts"][0]["text"].as_str().unwrap(),
            "You are helpful.",
        );

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[0]["parts"][0]["text"], "Hello");

        let temp = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!(temp.abs() < 1e-6, "temperature should be 0.0, got {temp}");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(body["generationConfig"]["topK"], 0);
    }

    #[tokio::test]
    async fn test_fallback_aggregates_failures() {
        // Unreachable endpoint: every model in the chain fails fast.
        let client = GeminiClient::new(
            "key",
            vec!["model-a".to_string(), "model-b".to_string()],
        )
        .with_endpoint("http://127.0.0.1:1");

        let result = client.complete("sys", "content").await;
        match result {
            Err(LlmError::AllModelsFailed(detail)) => {
                assert!(detail.contains("model-a:"));
                assert!(detail.contains("model-b:"));
            }
            other => panic!("expected AllModelsFailed, got {:?}", other.map(|_| ())),
        }
    }
}
