//! The memory engine proper.

use serde_json::{json, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use clawbrain_core::constants::{DEDUP_CANDIDATE_LIMIT, DEDUP_THRESHOLD};
use clawbrain_core::errors::{ClawbrainResult, MemoryError};
use clawbrain_core::models::{
    AddOutcome, Confidence, ForgetOutcome, MemoryPoint, PointFilter, SearchOutcome,
};
use clawbrain_core::payload::{
    self, earliest_created_at, is_pinned, now_ts, text_of, Payload, KEY_CREATED_AT,
    KEY_LAST_ACCESSED, KEY_PINNED,
};
use clawbrain_core::traits::{IEmbeddingProvider, IVectorIndex};

use crate::scoring::apply_recency_boost;

/// Source of the vector for an add.
#[derive(Debug, Clone)]
pub enum AddInput {
    /// Raw text; the engine embeds it and stores it under `text`.
    Text(String),
    /// Externally generated vector; the metadata must carry non-empty `text`.
    Vector(Vec<f32>),
}

/// One add operation.
#[derive(Debug, Clone)]
pub struct AddRequest {
    /// Caller-supplied identity; upserts over an existing entry.
    pub id: Option<String>,
    pub input: AddInput,
    /// Extra metadata merged into the stored payload.
    pub metadata: Payload,
    /// Mark the new entry immune to decay and dedup-merge.
    pub pinned: bool,
    /// Skip near-duplicate merging entirely.
    pub no_merge: bool,
}

/// Source of the vector for a search.
#[derive(Debug, Clone)]
pub enum SearchInput {
    Query(String),
    Vector(Vec<f32>),
}

/// One search operation.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub input: SearchInput,
    pub limit: usize,
    pub min_score: f32,
    /// Recency boost weight; 0 disables the boost.
    pub recency_boost: f64,
    /// Recency half-life in seconds.
    pub recency_scale: f64,
}

/// Orchestrates the vector index and the embedding provider.
///
/// Holds no mutable state between calls; concurrent invocations rely only on
/// the index's own per-point linearisation.
pub struct MemoryEngine<I, E> {
    index: I,
    embedder: E,
}

impl<I: IVectorIndex, E: IEmbeddingProvider> MemoryEngine<I, E> {
    pub fn new(index: I, embedder: E) -> Self {
        Self { index, embedder }
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    /// Store one memory entry.
    ///
    /// Near-duplicates (cosine >= 0.92) are merged away unless `no_merge`:
    /// non-pinned candidates are deleted and the earliest `created_at` among
    /// them survives on the new entry. A failed dedup query degrades to "no
    /// duplicates"; embedding, validation, and upsert failures propagate.
    pub async fn add(&self, request: AddRequest) -> ClawbrainResult<AddOutcome> {
        let AddRequest {
            id,
            input,
            mut metadata,
            pinned,
            no_merge,
        } = request;

        let vector = match input {
            AddInput::Text(text) => {
                let vector = self.embedder.embed(&text).await?;
                metadata.insert(payload::KEY_TEXT.to_string(), Value::String(text));
                vector
            }
            AddInput::Vector(vector) => {
                if vector.is_empty() {
                    return Err(MemoryError::EmptyVector.into());
                }
                if text_of(&metadata).is_none() {
                    return Err(MemoryError::MissingText.into());
                }
                vector
            }
        };

        if pinned && !metadata.contains_key(KEY_PINNED) {
            metadata.insert(KEY_PINNED.to_string(), Value::Bool(true));
        }

        let merged_ids = if no_merge {
            Vec::new()
        } else {
            self.merge_near_duplicates(&vector, &mut metadata).await
        };

        // A caller-supplied identity replaces the entry at that id but keeps
        // its lineage timestamp.
        if let Some(existing_id) = &id {
            match self.index.get(existing_id).await {
                Ok(Some(existing)) => fold_created_at(&mut metadata, &existing.payload),
                Ok(None) => {}
                Err(e) => warn!(id = %existing_id, error = %e, "existing-entry lookup failed"),
            }
        }

        self.index.ensure_collection(vector.len()).await?;

        let now = now_ts();
        metadata.insert(KEY_LAST_ACCESSED.to_string(), json!(now));
        if !metadata.contains_key(KEY_CREATED_AT) {
            metadata.insert(KEY_CREATED_AT.to_string(), json!(now));
        }

        let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
        self.index.upsert(&id, &vector, metadata).await?;
        debug!(%id, merged = merged_ids.len(), "memory stored");

        Ok(AddOutcome { id, merged_ids })
    }

    /// Delete non-pinned near-duplicates of `vector`, folding their earliest
    /// `created_at` into `metadata`. Returns the deleted ids.
    async fn merge_near_duplicates(&self, vector: &[f32], metadata: &mut Payload) -> Vec<String> {
        let candidates = match self
            .index
            .query(vector, DEDUP_THRESHOLD, DEDUP_CANDIDATE_LIMIT)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "dedup query failed, storing without merge");
                return Vec::new();
            }
        };

        let duplicates: Vec<MemoryPoint> = candidates
            .into_iter()
            .filter(|c| !is_pinned(&c.payload))
            .collect();
        if duplicates.is_empty() {
            return Vec::new();
        }

        let ids: Vec<String> = duplicates.iter().map(|d| d.id.clone()).collect();
        if let Err(e) = self.index.delete(&ids).await {
            warn!(error = %e, "near-duplicate delete failed, storing without merge");
            return Vec::new();
        }

        if let Some(earliest) = earliest_created_at(duplicates.iter().map(|d| &d.payload)) {
            let keep = match payload::get_f64(metadata, KEY_CREATED_AT) {
                Some(own) if own <= earliest => own,
                _ => earliest,
            };
            metadata.insert(KEY_CREATED_AT.to_string(), json!(keep));
        }
        ids
    }

    /// Fetch one entry by id. Touches `last_accessed` best-effort after the
    /// response payload has been captured.
    pub async fn get(&self, id: &str) -> ClawbrainResult<Option<MemoryPoint>> {
        let Some(point) = self.index.get(id).await? else {
            return Ok(None);
        };
        self.touch(std::slice::from_ref(&point.id)).await;
        Ok(Some(point))
    }

    /// Cosine recall with optional recency boost.
    pub async fn search(&self, request: SearchRequest) -> ClawbrainResult<SearchOutcome> {
        let vector = match request.input {
            SearchInput::Query(text) => self.embedder.embed(&text).await?,
            SearchInput::Vector(vector) => {
                if vector.is_empty() {
                    return Err(MemoryError::EmptyVector.into());
                }
                vector
            }
        };

        let mut results = self
            .index
            .query(&vector, request.min_score, request.limit)
            .await?;
        apply_recency_boost(
            &mut results,
            request.recency_boost,
            request.recency_scale,
            now_ts(),
        );
        let confidence = Confidence::from_top_score(results.first().map(|p| p.score));

        let ids: Vec<String> = results.iter().map(|p| p.id.clone()).collect();
        self.touch(&ids).await;

        Ok(SearchOutcome { results, confidence })
    }

    /// Remove entries whose `last_accessed` predates `now - ttl_secs` and
    /// which are not pinned. Idempotent; an absent collection deletes 0.
    pub async fn forget(&self, ttl_secs: f64) -> ClawbrainResult<ForgetOutcome> {
        let cutoff = now_ts() - ttl_secs;
        let ids = self.index.scroll_ids(&PointFilter::expired(cutoff)).await?;
        if !ids.is_empty() {
            self.index.delete(&ids).await?;
        }
        debug!(deleted = ids.len(), cutoff, "decay pass complete");
        Ok(ForgetOutcome { deleted: ids.len() })
    }

    /// Explicitly remove one entry. No-op if absent.
    pub async fn delete(&self, id: &str) -> ClawbrainResult<()> {
        self.index.delete(&[id.to_string()]).await
    }

    /// Best-effort `last_accessed` refresh. A recall that returned data is a
    /// successful recall; patch failures are logged, never propagated.
    async fn touch(&self, ids: &[String]) {
        let now = now_ts();
        for id in ids {
            let mut patch = Payload::new();
            patch.insert(KEY_LAST_ACCESSED.to_string(), json!(now));
            if let Err(e) = self.index.patch_payload(id, patch).await {
                warn!(%id, error = %e, "last_accessed patch failed");
            }
        }
    }
}

/// Keep the earliest `created_at` between the new metadata and an existing
/// payload being replaced.
fn fold_created_at(metadata: &mut Payload, existing: &Payload) {
    if let Some(theirs) = payload::get_f64(existing, KEY_CREATED_AT) {
        let keep = match payload::get_f64(metadata, KEY_CREATED_AT) {
            Some(ours) if ours <= theirs => ours,
            _ => theirs,
        };
        metadata.insert(KEY_CREATED_AT.to_string(), json!(keep));
    }
}
