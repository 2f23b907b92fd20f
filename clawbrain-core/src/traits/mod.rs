mod embedding;
mod sync_state;
mod vector_index;

pub use embedding::IEmbeddingProvider;
pub use sync_state::ISyncState;
pub use vector_index::IVectorIndex;
