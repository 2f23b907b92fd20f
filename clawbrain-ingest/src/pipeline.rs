//! Per-file ingestion: change detection, chunk storage, marker bookkeeping.

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use clawbrain_core::constants::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, MEMORY_FILE_TTL_SECS};
use clawbrain_core::errors::ClawbrainResult;
use clawbrain_core::payload::{Payload, KEY_CHUNK_INDEX, KEY_SOURCE};
use clawbrain_core::traits::{IEmbeddingProvider, ISyncState, IVectorIndex};
use clawbrain_memory::{AddInput, AddRequest, MemoryEngine};
use clawbrain_sync::sync_key;

use crate::chunker::chunk_text;
use crate::digest::sha256_hex;
use crate::discovery::discover_files;
use crate::ignore::IgnoreSet;
use crate::normalize::normalize;

const REASON_EXCLUDED: &str = "excluded by ignore pattern";
const REASON_TODAY: &str = "today's daily file, still growing";
const REASON_SYNCED: &str = "already synced";
const REASON_EMPTY: &str = "empty file";
const REASON_UNCHANGED: &str = "already synced (unchanged)";

/// One ingestion run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub base: PathBuf,
    pub files: Vec<PathBuf>,
    pub dirs: Vec<PathBuf>,
    pub excludes: Vec<String>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl SyncOptions {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            files: Vec::new(),
            dirs: Vec::new(),
            excludes: Vec::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

/// Outcome for one discovered file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    /// Chunks stored from this file.
    pub added: usize,
    /// 1 for a skipped file; otherwise the number of chunks that failed.
    pub skipped: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FileReport {
    fn skipped(file: &Path, reason: &str) -> Self {
        Self {
            file: file.display().to_string(),
            added: 0,
            skipped: 1,
            reason: Some(reason.to_string()),
        }
    }
}

/// Aggregated outcome of a run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub files: usize,
    pub added: usize,
    pub skipped: usize,
    pub results: Vec<FileReport>,
}

/// Walk the sources and ingest every file that needs it. A per-file failure
/// never aborts the run; it lands in that file's report instead.
pub async fn run_sync<I, E, S>(
    engine: &MemoryEngine<I, E>,
    state: &mut S,
    options: &SyncOptions,
) -> ClawbrainResult<SyncReport>
where
    I: IVectorIndex,
    E: IEmbeddingProvider,
    S: ISyncState,
{
    let ignore = IgnoreSet::load(&options.base, &options.excludes);
    let sources = discover_files(&options.base, &options.files, &options.dirs);
    let today = Local::now().format("%Y-%m-%d").to_string();

    let mut results = Vec::with_capacity(sources.len());
    for path in &sources {
        let report = process_file(engine, state, options, &ignore, path, &today).await;
        results.push(report);
    }

    Ok(SyncReport {
        files: results.len(),
        added: results.iter().map(|r| r.added).sum(),
        skipped: results.iter().map(|r| r.skipped).sum(),
        results,
    })
}

async fn process_file<I, E, S>(
    engine: &MemoryEngine<I, E>,
    state: &mut S,
    options: &SyncOptions,
    ignore: &IgnoreSet,
    path: &Path,
    today: &str,
) -> FileReport
where
    I: IVectorIndex,
    E: IEmbeddingProvider,
    S: ISyncState,
{
    if ignore.matches(path) {
        return FileReport::skipped(path, REASON_EXCLUDED);
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    // The daily journal is still being appended; never ingest it mid-day.
    if name.contains(today) {
        return FileReport::skipped(path, REASON_TODAY);
    }

    let canonical = name.eq_ignore_ascii_case("memory.md");
    let key = sync_key(&path.display().to_string());

    if !canonical {
        // Immutable source: presence of the marker alone denies re-ingestion.
        let already = match state.exists(&key).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "marker read failed");
                false
            }
        };
        if already {
            return FileReport::skipped(path, REASON_SYNCED);
        }
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return FileReport::skipped(path, &format!("read failed: {e}")),
    };
    let content = String::from_utf8_lossy(&bytes);
    if content.trim().is_empty() {
        return FileReport::skipped(path, REASON_EMPTY);
    }

    let mut digest = None;
    if canonical {
        let fresh = sha256_hex(&bytes);
        let stored = match state.get(&key).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "marker read failed");
                None
            }
        };
        if stored.as_deref() == Some(fresh.as_str()) {
            return FileReport::skipped(path, REASON_UNCHANGED);
        }
        digest = Some(fresh);
    }

    let source = path.display().to_string();
    let mut added = 0usize;
    let mut failed = 0usize;
    for (i, chunk) in chunk_text(&content, options.chunk_size, options.chunk_overlap)
        .iter()
        .enumerate()
    {
        let text = normalize(chunk);
        if text.is_empty() {
            continue;
        }
        let mut metadata = Payload::new();
        metadata.insert(KEY_SOURCE.to_string(), json!(source));
        metadata.insert(KEY_CHUNK_INDEX.to_string(), json!(i));
        let request = AddRequest {
            id: None,
            input: AddInput::Text(text),
            metadata,
            pinned: false,
            no_merge: false,
        };
        match engine.add(request).await {
            Ok(_) => added += 1,
            Err(e) => {
                warn!(file = %source, chunk = i, error = %e, "chunk store failed");
                failed += 1;
            }
        }
    }

    // Only a run that stored something gets a marker; a fully failed file
    // stays unmarked so the next run retries it.
    if added > 0 {
        let marked = match digest {
            Some(digest) => state.set_with_ttl(&key, &digest, MEMORY_FILE_TTL_SECS).await,
            None => state.set(&key, "1").await,
        };
        if let Err(e) = marked {
            warn!(file = %source, error = %e, "marker write failed");
        }
    }

    debug!(file = %source, added, failed, "file processed");
    FileReport {
        file: source,
        added,
        skipped: failed,
        reason: None,
    }
}
