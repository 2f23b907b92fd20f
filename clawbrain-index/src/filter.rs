//! Translation of [`PointFilter`] into the index's native filter JSON.

use serde_json::{json, Value};

use clawbrain_core::models::PointFilter;
use clawbrain_core::payload::{KEY_LAST_ACCESSED, KEY_PINNED};

/// Build the server-side filter document, or `None` for a match-all filter.
pub fn to_index_filter(filter: &PointFilter) -> Option<Value> {
    let mut must = Vec::new();
    let mut must_not = Vec::new();

    if let Some(cutoff) = filter.last_accessed_before {
        must.push(json!({
            "key": KEY_LAST_ACCESSED,
            "range": { "lt": cutoff }
        }));
    }
    if filter.exclude_pinned {
        must_not.push(json!({
            "key": KEY_PINNED,
            "match": { "value": true }
        }));
    }

    if must.is_empty() && must_not.is_empty() {
        return None;
    }

    let mut doc = serde_json::Map::new();
    if !must.is_empty() {
        doc.insert("must".to_string(), Value::Array(must));
    }
    if !must_not.is_empty() {
        doc.insert("must_not".to_string(), Value::Array(must_not));
    }
    Some(Value::Object(doc))
}
