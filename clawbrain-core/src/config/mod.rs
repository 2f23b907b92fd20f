pub mod defaults;

mod embedding_config;
mod index_config;
mod sync_config;

pub use embedding_config::EmbeddingConfig;
pub use index_config::IndexConfig;
pub use sync_config::SyncStateConfig;
