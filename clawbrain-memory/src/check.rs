//! Connectivity check: a full round-trip through a throw-away collection.

use serde_json::json;

use clawbrain_core::errors::{ClawbrainResult, IndexError};
use clawbrain_core::payload::{Payload, KEY_TEXT};
use clawbrain_core::traits::IVectorIndex;

/// Fixed identity of the sentinel point.
pub const SENTINEL_ID: &str = "00000000-0000-0000-0000-000000000001";

/// The sentinel vector; width 4 keeps the throw-away collection tiny.
pub const SENTINEL: [f32; 4] = [0.5, 0.5, 0.5, 0.5];

/// Create the collection, upsert the sentinel, query it back, drop the
/// collection. Ok only if every step succeeded.
///
/// `index` must be bound to the healthcheck collection, not the data one.
pub async fn roundtrip<I: IVectorIndex>(index: &I) -> ClawbrainResult<()> {
    index.ensure_collection(SENTINEL.len()).await?;

    let mut payload = Payload::new();
    payload.insert(KEY_TEXT.to_string(), json!("healthcheck sentinel"));
    index.upsert(SENTINEL_ID, &SENTINEL, payload).await?;

    let hits = index.query(&SENTINEL, 0.0, 1).await?;
    if hits.is_empty() {
        return Err(IndexError::BadResponse {
            reason: "healthcheck query returned no hits".to_string(),
        }
        .into());
    }

    index.delete_collection().await?;
    Ok(())
}
