//! # clawbrain-sync
//!
//! Sync-state adapter: a minimal RESP client over TCP used to record
//! per-file ingestion markers (`sync:<absolute-path>` keys, optional TTL).
//! The connection and its framed reader are owned by the operation that
//! opened them and released on scope exit.

mod client;
mod resp;

pub use client::RespClient;
pub use resp::Reply;

/// Marker key for an ingested source path.
pub fn sync_key(abs_path: &str) -> String {
    format!("sync:{abs_path}")
}
