use serde::Serialize;

use super::{Confidence, MemoryPoint};

/// Result of a successful add.
#[derive(Debug, Clone, Serialize)]
pub struct AddOutcome {
    pub id: String,
    /// Ids of near-duplicates replaced by this add, in candidate order.
    /// Empty when nothing was merged.
    pub merged_ids: Vec<String>,
}

impl AddOutcome {
    /// First merged id, kept for callers that predate `merged_ids`.
    pub fn merged_id(&self) -> Option<&str> {
        self.merged_ids.first().map(String::as_str)
    }
}

/// Result of a search: ranked hits plus the confidence band of the top hit.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<MemoryPoint>,
    pub confidence: Confidence,
}

/// Result of a decay pass.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ForgetOutcome {
    pub deleted: usize,
}
