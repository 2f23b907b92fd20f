//! Request and response shapes of the Qdrant REST API.
//!
//! Only the fields this adapter touches are modelled; everything else in the
//! server's responses is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use clawbrain_core::payload::Payload;

/// Qdrant wraps every response body in an envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub result: T,
}

#[derive(Debug, Serialize)]
pub struct CreateCollection {
    pub vectors: VectorParams,
}

#[derive(Debug, Serialize)]
pub struct VectorParams {
    pub size: usize,
    pub distance: &'static str,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CollectionInfo {
    pub points_count: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct UpsertPoints {
    pub points: Vec<PointStruct>,
}

#[derive(Debug, Serialize)]
pub struct PointStruct {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: Payload,
}

#[derive(Debug, Serialize)]
pub struct RetrievePoints {
    pub ids: Vec<String>,
    pub with_payload: bool,
    pub with_vector: bool,
}

#[derive(Debug, Deserialize)]
pub struct RetrievedPoint {
    pub id: Value,
    #[serde(default)]
    pub payload: Option<Payload>,
}

#[derive(Debug, Serialize)]
pub struct SearchPoints {
    pub vector: Vec<f32>,
    pub limit: usize,
    pub score_threshold: f32,
    pub with_payload: bool,
}

#[derive(Debug, Deserialize)]
pub struct ScoredPoint {
    pub id: Value,
    pub score: f32,
    #[serde(default)]
    pub payload: Option<Payload>,
}

#[derive(Debug, Serialize)]
pub struct ScrollPoints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Value>,
    pub with_payload: bool,
}

#[derive(Debug, Deserialize)]
pub struct ScrollResult {
    pub points: Vec<RetrievedPoint>,
    #[serde(default)]
    pub next_page_offset: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct DeletePoints {
    pub points: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SetPayload {
    pub payload: Payload,
    pub points: Vec<String>,
}

/// Point ids come back as JSON strings (UUIDs) or integers; render both as
/// their canonical string form.
pub fn id_string(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_string_handles_uuid_and_int() {
        assert_eq!(id_string(&json!("ab-12")), "ab-12");
        assert_eq!(id_string(&json!(42)), "42");
    }

    #[test]
    fn scroll_request_omits_empty_fields() {
        let req = ScrollPoints {
            filter: None,
            limit: 100,
            offset: None,
            with_payload: false,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v, json!({"limit": 100, "with_payload": false}));
    }

    #[test]
    fn envelope_unwraps_result() {
        let body = json!({"result": {"points_count": 7}, "status": "ok", "time": 0.001});
        let env: Envelope<CollectionInfo> = serde_json::from_value(body).unwrap();
        assert_eq!(env.result.points_count, Some(7));
    }
}
