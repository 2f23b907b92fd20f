use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Base URL of the Ollama-compatible service.
    pub base_url: String,
    /// Model name passed on every embed call.
    pub model: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_OLLAMA_URL.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
        }
    }
}
