use crate::errors::ClawbrainResult;
use crate::models::{MemoryPoint, PointFilter};
use crate::payload::Payload;

/// Typed operations over an external ANN index with cosine distance.
///
/// An implementation is bound to one collection. Reads against an absent
/// collection are empty successes, never errors.
#[allow(async_fn_in_trait)]
pub trait IVectorIndex: Send + Sync {
    /// Create the collection at the given vector width if absent. Idempotent.
    async fn ensure_collection(&self, width: usize) -> ClawbrainResult<()>;

    /// Replace-or-insert a point. Any existing payload at `id` is discarded.
    async fn upsert(&self, id: &str, vector: &[f32], payload: Payload) -> ClawbrainResult<()>;

    /// Fetch one point by id. `None` when the id or collection is absent.
    async fn get(&self, id: &str) -> ClawbrainResult<Option<MemoryPoint>>;

    /// Up to `limit` points with cosine similarity >= `min_score`, score
    /// descending. Empty when the collection is absent.
    async fn query(
        &self,
        vector: &[f32],
        min_score: f32,
        limit: usize,
    ) -> ClawbrainResult<Vec<MemoryPoint>>;

    /// All point ids matching the filter, paging server-side.
    async fn scroll_ids(&self, filter: &PointFilter) -> ClawbrainResult<Vec<String>>;

    /// Remove the listed ids. Non-existent ids are ignored.
    async fn delete(&self, ids: &[String]) -> ClawbrainResult<()>;

    /// Merge the partial mapping into the existing payload; the vector and
    /// untouched fields are preserved.
    async fn patch_payload(&self, id: &str, partial: Payload) -> ClawbrainResult<()>;

    /// Drop the whole collection. No-op if absent.
    async fn delete_collection(&self) -> ClawbrainResult<()>;

    /// Approximate point count; 0 when the collection is absent.
    async fn count(&self) -> ClawbrainResult<u64>;
}
