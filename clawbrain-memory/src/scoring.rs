//! Recency-boosted ranking.
//!
//! The boost is additive: `score = similarity + w * 2^(-age/scale)`.
//! It is neither renormalised nor clamped; a boosted score can exceed 1.0
//! and the confidence bands still apply unchanged. A weight of 0 leaves
//! the results bit-identical to plain cosine ranking.

use clawbrain_core::models::MemoryPoint;
use clawbrain_core::payload::{get_f64, KEY_LAST_ACCESSED};

/// Exponential half-life decay: `2^(-age/scale)`.
pub fn exp_decay(age_secs: f64, scale_secs: f64) -> f64 {
    f64::exp2(-age_secs / scale_secs)
}

/// Apply the boost in place and re-rank. No-op when `weight` is 0.
pub fn apply_recency_boost(hits: &mut [MemoryPoint], weight: f64, scale_secs: f64, now: f64) {
    if weight == 0.0 {
        return;
    }
    for hit in hits.iter_mut() {
        let accessed = get_f64(&hit.payload, KEY_LAST_ACCESSED).unwrap_or(now);
        let age = (now - accessed).max(0.0);
        hit.score = (hit.score as f64 + weight * exp_decay(age, scale_secs)) as f32;
    }
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(id: &str, score: f32, accessed: f64) -> MemoryPoint {
        let mut payload = clawbrain_core::payload::Payload::new();
        payload.insert(KEY_LAST_ACCESSED.to_string(), json!(accessed));
        MemoryPoint::new(id, score, payload)
    }

    #[test]
    fn exp_decay_halves_per_scale() {
        assert!((exp_decay(0.0, 100.0) - 1.0).abs() < 1e-12);
        assert!((exp_decay(100.0, 100.0) - 0.5).abs() < 1e-12);
        assert!((exp_decay(200.0, 100.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn zero_weight_changes_nothing() {
        let mut hits = vec![hit("a", 0.9, 0.0), hit("b", 0.8, 1000.0)];
        apply_recency_boost(&mut hits, 0.0, 100.0, 1000.0);
        assert_eq!(hits[0].id, "a");
        assert_eq!(hits[0].score, 0.9);
        assert_eq!(hits[1].score, 0.8);
    }

    #[test]
    fn boost_can_reorder_and_exceed_one() {
        // "b" was accessed just now; "a" a long time ago.
        let mut hits = vec![hit("a", 0.90, 0.0), hit("b", 0.85, 1000.0)];
        apply_recency_boost(&mut hits, 0.5, 100.0, 1000.0);
        assert_eq!(hits[0].id, "b");
        assert!(hits[0].score > 1.0);
    }

    #[test]
    fn age_is_clamped_non_negative() {
        // last_accessed slightly in the future must not over-boost.
        let mut hits = vec![hit("a", 0.5, 2000.0)];
        apply_recency_boost(&mut hits, 0.1, 100.0, 1000.0);
        assert!((hits[0].score - 0.6).abs() < 1e-6);
    }
}
