//! Configuration for the extractor

use serde::{Deserialize, Serialize};

/// Tuning knobs for the chunk/merge pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Estimated-token count above which a document is chunked
    pub token_threshold: usize,

    /// Characters per estimated token (crude but serviceable)
    pub chars_per_token: usize,

    /// Pages grouped into one model call on the chunked path
    pub pages_per_batch: usize,
}

impl ExtractorConfig {
    /// Rough token estimate for a text.
    pub fn estimated_tokens(&self, text: &str) -> usize {
        text.chars().count() / self.chars_per_token
    }

    /// Whether a text is small enough for the direct path.
    pub fn fits_direct(&self, text: &str) -> bool {
        self.estimated_tokens(text) <= self.token_threshold
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.token_threshold == 0 {
            return Err("token_threshold must be greater than 0".to_string());
        }
        if self.chars_per_token == 0 {
            return Err("chars_per_token must be greater than 0".to_string());
        }
        if self.pages_per_batch == 0 {
            return Err("pages_per_batch must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            token_threshold: 30_000,
            chars_per_token: 4,
            pages_per_batch: 3,
        }
    }
}
