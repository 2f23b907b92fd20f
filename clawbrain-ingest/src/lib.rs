//! # clawbrain-ingest
//!
//! The file-ingestion pipeline: walks markdown sources, chunks and
//! normalizes their text, embeds each chunk through the memory engine
//! (merge-aware, so repeat runs converge), and records per-file sync
//! markers so unchanged sources are never ingested twice.

mod chunker;
mod digest;
mod discovery;
mod ignore;
mod normalize;
mod pipeline;

pub use chunker::chunk_text;
pub use digest::sha256_hex;
pub use discovery::discover_files;
pub use ignore::IgnoreSet;
pub use normalize::normalize;
pub use pipeline::{run_sync, FileReport, SyncOptions, SyncReport};
