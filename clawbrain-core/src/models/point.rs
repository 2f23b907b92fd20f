use serde::{Deserialize, Serialize};

use crate::payload::Payload;

/// One stored record as seen by callers: identity, score, metadata.
///
/// `score` is the cosine similarity for search hits (plus recency boost when
/// enabled) and 0 for point reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryPoint {
    pub id: String,
    pub score: f32,
    pub payload: Payload,
}

impl MemoryPoint {
    pub fn new(id: impl Into<String>, score: f32, payload: Payload) -> Self {
        Self {
            id: id.into(),
            score,
            payload,
        }
    }
}
