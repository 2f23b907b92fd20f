//! Payload model and helpers.
//!
//! A memory entry's metadata is a JSON object whose values are scalars
//! (null, bool, integer, double, string), lists of the same, or nested
//! objects. `serde_json::Value` is exactly that sum type and converts 1:1
//! to the index adapter's native payload, so no parallel enum is kept.

use chrono::Utc;
use serde_json::{Map, Value};

/// Metadata mapping attached to every memory entry.
pub type Payload = Map<String, Value>;

/// When the entry was first created. Survives dedup-merges.
pub const KEY_CREATED_AT: &str = "created_at";
/// Last successful read of the entry. Drives decay.
pub const KEY_LAST_ACCESSED: &str = "last_accessed";
/// Entries with `pinned: true` are immune to decay and dedup-merge.
pub const KEY_PINNED: &str = "pinned";
/// The stored text fragment. Required and non-empty.
pub const KEY_TEXT: &str = "text";
/// Absolute path of the ingested source file.
pub const KEY_SOURCE: &str = "source";
/// Chunk ordinal within the source file.
pub const KEY_CHUNK_INDEX: &str = "chunk_index";

/// Current time as fractional unix seconds.
///
/// Stored as a JSON number so the index can range-filter on it server-side;
/// the fractional part keeps successive sub-second reads strictly increasing.
pub fn now_ts() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1e6
}

/// Read a numeric payload field as f64.
pub fn get_f64(payload: &Payload, key: &str) -> Option<f64> {
    payload.get(key).and_then(Value::as_f64)
}

/// Whether the payload carries `pinned: true`.
pub fn is_pinned(payload: &Payload) -> bool {
    payload.get(KEY_PINNED).and_then(Value::as_bool) == Some(true)
}

/// The `text` field, if present and non-empty.
pub fn text_of(payload: &Payload) -> Option<&str> {
    payload
        .get(KEY_TEXT)
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
}

/// Earliest `created_at` across a set of payloads, if any carries one.
pub fn earliest_created_at<'a, I>(payloads: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Payload>,
{
    payloads
        .into_iter()
        .filter_map(|p| get_f64(p, KEY_CREATED_AT))
        .fold(None, |acc, t| match acc {
            Some(prev) if prev <= t => Some(prev),
            _ => Some(t),
        })
}
