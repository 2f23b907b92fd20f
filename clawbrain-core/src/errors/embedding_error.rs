/// Embedding subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("empty embedding response from {model}")]
    EmptyResponse { model: String },

    #[error("provider unavailable: {reason}")]
    ProviderUnavailable { reason: String },
}
