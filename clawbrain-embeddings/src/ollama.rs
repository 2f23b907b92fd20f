//! Ollama embedding provider.
//!
//! Connects to a local Ollama instance for embedding generation.
//! Configurable model; liveness probe via the tags endpoint.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use clawbrain_core::config::EmbeddingConfig;
use clawbrain_core::errors::{ClawbrainResult, EmbeddingError};
use clawbrain_core::traits::IEmbeddingProvider;

/// Ollama embedding provider.
pub struct OllamaProvider {
    http: Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    // Service-native f64 values downcast to the index's storage width here.
    embeddings: Vec<Vec<f32>>,
}

impl OllamaProvider {
    pub fn new(config: &EmbeddingConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }
}

impl IEmbeddingProvider for OllamaProvider {
    async fn embed(&self, text: &str) -> ClawbrainResult<Vec<f32>> {
        let url = format!("{}/api/embed", self.base_url);
        let request = EmbedRequest {
            model: &self.model,
            input: vec![text],
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("HTTP error: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("service returned {status}: {body}"),
            }
            .into());
        }

        let resp: EmbedResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("JSON parse error: {e}"),
                })?;

        let vector = resp
            .embeddings
            .into_iter()
            .next()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| EmbeddingError::EmptyResponse {
                model: self.model.clone(),
            })?;

        debug!(model = %self.model, width = vector.len(), "embedded text");
        Ok(vector)
    }

    async fn health(&self) -> ClawbrainResult<()> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.http.get(&url).send().await.map_err(|e| {
            EmbeddingError::ProviderUnavailable {
                reason: e.to_string(),
            }
        })?;
        if !response.status().is_success() {
            return Err(EmbeddingError::ProviderUnavailable {
                reason: format!("service returned {}", response.status()),
            }
            .into());
        }
        Ok(())
    }

    fn model(&self) -> &str {
        &self.model
    }
}
