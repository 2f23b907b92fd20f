mod embedding_error;
mod index_error;
mod memory_error;
mod sync_error;

pub use embedding_error::EmbeddingError;
pub use index_error::IndexError;
pub use memory_error::MemoryError;
pub use sync_error::SyncStateError;

/// Top-level error for the Clawbrain workspace.
#[derive(Debug, thiserror::Error)]
pub enum ClawbrainError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    SyncState(#[from] SyncStateError),
}

/// Convenience alias used across the workspace.
pub type ClawbrainResult<T> = Result<T, ClawbrainError>;
