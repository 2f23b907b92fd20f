//! # clawbrain-core
//!
//! Foundation crate for the Clawbrain memory system.
//! Defines the shared models, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod payload;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{EmbeddingConfig, IndexConfig, SyncStateConfig};
pub use errors::{ClawbrainError, ClawbrainResult};
pub use models::{AddOutcome, Confidence, ForgetOutcome, MemoryPoint, PointFilter, SearchOutcome};
pub use payload::Payload;
pub use traits::{IEmbeddingProvider, ISyncState, IVectorIndex};
