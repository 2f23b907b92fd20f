/// Server-side filter for scrolling point ids.
///
/// Kept deliberately narrow: the only consumer is decay, which needs
/// `last_accessed < cutoff AND NOT pinned = true`. The adapter translates
/// this into its native filter representation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointFilter {
    /// Match points whose `last_accessed` is strictly before this timestamp
    /// (fractional unix seconds).
    pub last_accessed_before: Option<f64>,
    /// Exclude points carrying `pinned: true`.
    pub exclude_pinned: bool,
}

impl PointFilter {
    /// The decay filter: stale and not pinned.
    pub fn expired(cutoff: f64) -> Self {
        Self {
            last_accessed_before: Some(cutoff),
            exclude_pinned: true,
        }
    }
}
