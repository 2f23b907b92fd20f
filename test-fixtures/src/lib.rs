//! In-process stand-ins for the external services: a brute-force cosine
//! index, a scripted embedder keyed by exact text, and an in-memory
//! sync-state store. Shared by integration tests across the workspace.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use clawbrain_core::errors::{ClawbrainResult, EmbeddingError, IndexError};
use clawbrain_core::models::{MemoryPoint, PointFilter};
use clawbrain_core::payload::{get_f64, is_pinned, Payload, KEY_LAST_ACCESSED};
use clawbrain_core::traits::{IEmbeddingProvider, ISyncState, IVectorIndex};

#[derive(Default)]
struct IndexState {
    exists: bool,
    width: usize,
    points: HashMap<String, (Vec<f32>, Payload)>,
}

/// Brute-force cosine index with the adapter's absent-collection semantics.
#[derive(Default)]
pub struct FakeIndex {
    state: Mutex<IndexState>,
    /// When set, query() fails; exercises the degradable dedup path.
    pub fail_queries: AtomicBool,
}

impl FakeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.state.lock().unwrap().points.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Payloads of all stored points, for assertions on ingested content.
    pub fn payloads(&self) -> Vec<Payload> {
        self.state
            .lock()
            .unwrap()
            .points
            .values()
            .map(|(_, p)| p.clone())
            .collect()
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na * nb)
}

impl IVectorIndex for FakeIndex {
    async fn ensure_collection(&self, width: usize) -> ClawbrainResult<()> {
        let mut state = self.state.lock().unwrap();
        if !state.exists {
            state.exists = true;
            state.width = width;
        }
        Ok(())
    }

    async fn upsert(&self, id: &str, vector: &[f32], payload: Payload) -> ClawbrainResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .points
            .insert(id.to_string(), (vector.to_vec(), payload));
        Ok(())
    }

    async fn get(&self, id: &str) -> ClawbrainResult<Option<MemoryPoint>> {
        let state = self.state.lock().unwrap();
        if !state.exists {
            return Ok(None);
        }
        Ok(state
            .points
            .get(id)
            .map(|(_, payload)| MemoryPoint::new(id, 0.0, payload.clone())))
    }

    async fn query(
        &self,
        vector: &[f32],
        min_score: f32,
        limit: usize,
    ) -> ClawbrainResult<Vec<MemoryPoint>> {
        if self.fail_queries.load(Ordering::Relaxed) {
            return Err(IndexError::Transport {
                reason: "scripted failure".to_string(),
            }
            .into());
        }
        let state = self.state.lock().unwrap();
        if !state.exists {
            return Ok(Vec::new());
        }
        let mut hits: Vec<MemoryPoint> = state
            .points
            .iter()
            .map(|(id, (v, payload))| MemoryPoint::new(id, cosine(vector, v), payload.clone()))
            .filter(|p| p.score >= min_score)
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.id.cmp(&b.id)));
        hits.truncate(limit);
        Ok(hits)
    }

    async fn scroll_ids(&self, filter: &PointFilter) -> ClawbrainResult<Vec<String>> {
        let state = self.state.lock().unwrap();
        if !state.exists {
            return Ok(Vec::new());
        }
        let mut ids: Vec<String> = state
            .points
            .iter()
            .filter(|(_, (_, payload))| {
                if filter.exclude_pinned && is_pinned(payload) {
                    return false;
                }
                match filter.last_accessed_before {
                    Some(cutoff) => {
                        get_f64(payload, KEY_LAST_ACCESSED).is_some_and(|t| t < cutoff)
                    }
                    None => true,
                }
            })
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn delete(&self, ids: &[String]) -> ClawbrainResult<()> {
        let mut state = self.state.lock().unwrap();
        for id in ids {
            state.points.remove(id);
        }
        Ok(())
    }

    async fn patch_payload(&self, id: &str, partial: Payload) -> ClawbrainResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some((_, payload)) = state.points.get_mut(id) {
            for (k, v) in partial {
                payload.insert(k, v);
            }
        }
        Ok(())
    }

    async fn delete_collection(&self) -> ClawbrainResult<()> {
        let mut state = self.state.lock().unwrap();
        state.exists = false;
        state.points.clear();
        Ok(())
    }

    async fn count(&self) -> ClawbrainResult<u64> {
        let state = self.state.lock().unwrap();
        if !state.exists {
            return Ok(0);
        }
        Ok(state.points.len() as u64)
    }
}

/// Embedder with a fixed text -> vector script.
pub struct FakeEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    fallback: Option<Vec<f32>>,
}

impl FakeEmbedder {
    pub fn new(script: &[(&str, &[f32])]) -> Self {
        Self {
            vectors: script
                .iter()
                .map(|(text, v)| (text.to_string(), v.to_vec()))
                .collect(),
            fallback: None,
        }
    }

    /// Return `vector` for any text missing from the script instead of
    /// failing. Useful when exact chunk contents are not the point.
    pub fn with_fallback(mut self, vector: &[f32]) -> Self {
        self.fallback = Some(vector.to_vec());
        self
    }
}

impl IEmbeddingProvider for FakeEmbedder {
    async fn embed(&self, text: &str) -> ClawbrainResult<Vec<f32>> {
        self.vectors
            .get(text)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| {
                EmbeddingError::InferenceFailed {
                    reason: format!("no scripted vector for {text:?}"),
                }
                .into()
            })
    }

    async fn health(&self) -> ClawbrainResult<()> {
        Ok(())
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// In-memory sync-state store recording TTLs for assertions.
#[derive(Default)]
pub struct FakeSyncState {
    pub entries: HashMap<String, String>,
    pub ttls: HashMap<String, u64>,
}

impl FakeSyncState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ISyncState for FakeSyncState {
    async fn get(&mut self, key: &str) -> ClawbrainResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: &str) -> ClawbrainResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_with_ttl(&mut self, key: &str, value: &str, ttl_secs: u64) -> ClawbrainResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.ttls.insert(key.to_string(), ttl_secs);
        Ok(())
    }

    async fn exists(&mut self, key: &str) -> ClawbrainResult<bool> {
        Ok(self.entries.contains_key(key))
    }
}
