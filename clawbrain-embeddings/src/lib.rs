//! # clawbrain-embeddings
//!
//! Embedding generation against an Ollama-compatible service.
//! One call per fragment; the engine decides what to do with the vector.

mod ollama;

pub use ollama::OllamaProvider;
