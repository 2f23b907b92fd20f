use serde::{Deserialize, Serialize};

use crate::constants::{CONFIDENCE_HIGH, CONFIDENCE_MEDIUM};

/// Qualitative band derived from the top search score.
///
/// Part of the response contract; carries no gating effect inside the engine.
/// Boosted scores above 1.0 still classify with the same cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
    None,
}

impl Confidence {
    /// Classify the top score of a result set. `None` for an empty set.
    pub fn from_top_score(top: Option<f32>) -> Self {
        match top {
            Some(s) if s >= CONFIDENCE_HIGH => Self::High,
            Some(s) if s >= CONFIDENCE_MEDIUM => Self::Medium,
            Some(_) => Self::Low,
            None => Self::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_match_cutoffs() {
        assert_eq!(Confidence::from_top_score(Some(0.95)), Confidence::High);
        assert_eq!(Confidence::from_top_score(Some(0.7)), Confidence::High);
        assert_eq!(Confidence::from_top_score(Some(0.69)), Confidence::Medium);
        assert_eq!(Confidence::from_top_score(Some(0.4)), Confidence::Medium);
        assert_eq!(Confidence::from_top_score(Some(0.1)), Confidence::Low);
        assert_eq!(Confidence::from_top_score(None), Confidence::None);
    }

    #[test]
    fn boosted_scores_above_one_stay_high() {
        assert_eq!(Confidence::from_top_score(Some(1.37)), Confidence::High);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Confidence::None).unwrap(),
            "\"none\""
        );
        assert_eq!(
            serde_json::to_string(&Confidence::High).unwrap(),
            "\"high\""
        );
    }
}
