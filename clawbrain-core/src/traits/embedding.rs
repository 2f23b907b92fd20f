use crate::errors::ClawbrainResult;

/// Embedding generation provider.
#[allow(async_fn_in_trait)]
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    async fn embed(&self, text: &str) -> ClawbrainResult<Vec<f32>>;

    /// Liveness probe against the backing service.
    async fn health(&self) -> ClawbrainResult<()>;

    /// The model this provider embeds with.
    fn model(&self) -> &str;
}
