//! # clawbrain-index
//!
//! Vector-index adapter over the Qdrant REST API: collection lifecycle,
//! upsert, point reads, cosine queries, filtered scrolls, payload patches.
//! One `QdrantIndex` handle is bound to one collection; reads against an
//! absent collection are empty successes.

mod client;
mod filter;
mod wire;

pub use client::QdrantIndex;
pub use filter::to_index_filter;
