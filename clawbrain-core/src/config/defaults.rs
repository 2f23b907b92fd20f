// Single source of truth for all connection defaults.

// --- Vector index ---
pub const DEFAULT_INDEX_HOST: &str = "localhost";
pub const DEFAULT_INDEX_PORT: u16 = 6334;

// --- Embeddings ---
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";

// --- Sync state ---
pub const DEFAULT_SYNC_HOST: &str = "localhost";
pub const DEFAULT_SYNC_PORT: u16 = 6379;
