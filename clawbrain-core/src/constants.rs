/// Clawbrain system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The single logical collection holding all memory entries.
pub const COLLECTION: &str = "memories";

/// Throw-away collection used by the connectivity check.
pub const HEALTHCHECK_COLLECTION: &str = "clawbrain_healthcheck";

/// Cosine similarity at or above which an existing entry counts as a
/// near-duplicate of a new one. Semantically equivalent rephrasings collapse;
/// paraphrases with different intent stay distinct. Not a tuning knob.
pub const DEDUP_THRESHOLD: f32 = 0.92;

/// Maximum number of near-duplicate candidates considered per add.
pub const DEDUP_CANDIDATE_LIMIT: usize = 64;

/// Page size for filtered scrolls through the index.
pub const SCROLL_PAGE_SIZE: usize = 100;

/// Confidence band cutoffs over the top search score.
pub const CONFIDENCE_HIGH: f32 = 0.7;
pub const CONFIDENCE_MEDIUM: f32 = 0.4;

/// Search defaults.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;
pub const DEFAULT_MIN_SCORE: f32 = 0.0;

/// Recency boost: half-life scale in seconds (7 days).
pub const DEFAULT_RECENCY_SCALE_SECS: f64 = 604_800.0;

/// TTL on the sync marker of a mutable canonical memory file (7 days).
pub const MEMORY_FILE_TTL_SECS: u64 = 604_800;

/// Chunking defaults (characters, approximating tokens).
pub const DEFAULT_CHUNK_SIZE: usize = 1600;
pub const DEFAULT_CHUNK_OVERLAP: usize = 320;

/// Deadline for point operations (add/get/search/forget/check).
pub const POINT_OP_TIMEOUT_SECS: u64 = 30;

/// Deadline for a full ingestion run.
pub const SYNC_TIMEOUT_SECS: u64 = 600;
