use std::fs;
use std::path::Path;

use clawbrain_ingest::{run_sync, SyncOptions};
use clawbrain_memory::MemoryEngine;
use clawbrain_sync::sync_key;
use test_fixtures::{FakeEmbedder, FakeIndex, FakeSyncState};

const ANY: &[f32] = &[1.0, 0.0, 0.0, 0.0];

fn engine() -> MemoryEngine<FakeIndex, FakeEmbedder> {
    MemoryEngine::new(FakeIndex::new(), FakeEmbedder::new(&[]).with_fallback(ANY))
}

fn failing_engine() -> MemoryEngine<FakeIndex, FakeEmbedder> {
    // No script and no fallback: every embed fails.
    MemoryEngine::new(FakeIndex::new(), FakeEmbedder::new(&[]))
}

fn key_for(path: &Path) -> String {
    sync_key(&path.canonicalize().unwrap().display().to_string())
}

// ── Canonical memory.md lifecycle ────────────────────────────────────────

#[tokio::test]
async fn memory_md_syncs_then_skips_unchanged_then_resyncs() {
    let dir = tempfile::tempdir().unwrap();
    let memory_md = dir.path().join("MEMORY.md");
    fs::write(&memory_md, "the user prefers dark mode").unwrap();

    let engine = engine();
    let mut state = FakeSyncState::new();
    let options = SyncOptions::new(dir.path());

    let report = run_sync(&engine, &mut state, &options).await.unwrap();
    assert_eq!(report.files, 1);
    assert!(report.added >= 1);

    // Digest marker with the 7-day TTL.
    let key = key_for(&memory_md);
    assert!(state.entries.contains_key(&key));
    assert_eq!(state.ttls.get(&key), Some(&604_800));

    // Unchanged content: skipped, nothing added.
    let report = run_sync(&engine, &mut state, &options).await.unwrap();
    assert_eq!(report.added, 0);
    assert_eq!(report.results[0].reason.as_deref(), Some("already synced (unchanged)"));

    // Changed content forces re-ingestion.
    fs::write(&memory_md, "the user now prefers light mode").unwrap();
    let report = run_sync(&engine, &mut state, &options).await.unwrap();
    assert!(report.added >= 1);
}

#[tokio::test]
async fn immutable_file_is_synced_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("memory")).unwrap();
    let note = dir.path().join("memory/notes.md");
    fs::write(&note, "deploy every friday").unwrap();

    let engine = engine();
    let mut state = FakeSyncState::new();
    let options = SyncOptions::new(dir.path());

    let report = run_sync(&engine, &mut state, &options).await.unwrap();
    assert_eq!(report.added, 1);
    assert_eq!(state.entries.get(&key_for(&note)).map(String::as_str), Some("1"));

    // Presence of the marker alone denies re-ingestion, even if content changed.
    fs::write(&note, "deploy every monday").unwrap();
    let report = run_sync(&engine, &mut state, &options).await.unwrap();
    assert_eq!(report.added, 0);
    assert_eq!(report.results[0].reason.as_deref(), Some("already synced"));
}

// ── Skips ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_file_is_skipped_without_marker() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("MEMORY.md");
    fs::write(&path, "  \n\n  ").unwrap();

    let engine = engine();
    let mut state = FakeSyncState::new();
    let report = run_sync(&engine, &mut state, &SyncOptions::new(dir.path()))
        .await
        .unwrap();
    assert_eq!(report.added, 0);
    assert_eq!(report.results[0].reason.as_deref(), Some("empty file"));
    assert!(state.entries.is_empty());
}

#[tokio::test]
async fn ignore_file_and_cli_excludes_are_unioned() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("memory")).unwrap();
    fs::write(dir.path().join("memory/keep.md"), "keep me").unwrap();
    fs::write(dir.path().join("memory/private.md"), "secret").unwrap();
    fs::write(dir.path().join("memory/draft.md"), "draft").unwrap();
    fs::write(
        dir.path().join(".clawbrain-ignore"),
        "# personal notes\n\nprivate.md\n",
    )
    .unwrap();

    let engine = engine();
    let mut state = FakeSyncState::new();
    let mut options = SyncOptions::new(dir.path());
    options.excludes = vec!["draft.md".to_string()];

    let report = run_sync(&engine, &mut state, &options).await.unwrap();
    let excluded: Vec<&str> = report
        .results
        .iter()
        .filter(|r| r.reason.as_deref() == Some("excluded by ignore pattern"))
        .map(|r| r.file.as_str())
        .collect();
    assert_eq!(excluded.len(), 2);
    assert!(excluded.iter().any(|f| f.ends_with("private.md")));
    assert!(excluded.iter().any(|f| f.ends_with("draft.md")));
    assert_eq!(report.added, 1);
}

#[tokio::test]
async fn todays_daily_file_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("memory")).unwrap();
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let daily = dir.path().join(format!("memory/journal-{today}.md"));
    fs::write(&daily, "still growing").unwrap();

    let engine = engine();
    let mut state = FakeSyncState::new();
    let report = run_sync(&engine, &mut state, &SyncOptions::new(dir.path()))
        .await
        .unwrap();
    assert_eq!(report.added, 0);
    assert_eq!(
        report.results[0].reason.as_deref(),
        Some("today's daily file, still growing")
    );
}

// ── Failure handling ─────────────────────────────────────────────────────

#[tokio::test]
async fn fully_failed_file_leaves_no_marker_so_next_run_retries() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("MEMORY.md"), "content that cannot embed").unwrap();

    let engine = failing_engine();
    let mut state = FakeSyncState::new();
    let options = SyncOptions::new(dir.path());

    let report = run_sync(&engine, &mut state, &options).await.unwrap();
    assert_eq!(report.added, 0);
    assert_eq!(report.skipped, 1); // the one failed chunk
    assert!(state.entries.is_empty());

    // A later run with a working embedder picks the file up again.
    let engine = self::engine();
    let report = run_sync(&engine, &mut state, &options).await.unwrap();
    assert_eq!(report.added, 1);
    assert!(!state.entries.is_empty());
}

#[tokio::test]
async fn chunks_carry_source_and_index_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("MEMORY.md");
    fs::write(&path, "remember this fragment").unwrap();

    let engine = engine();
    let mut state = FakeSyncState::new();
    run_sync(&engine, &mut state, &SyncOptions::new(dir.path()))
        .await
        .unwrap();

    let payloads = engine.index().payloads();
    assert_eq!(payloads.len(), 1);
    let payload = &payloads[0];
    assert_eq!(payload.get("text").unwrap(), "remember this fragment");
    assert_eq!(payload.get("chunk_index").unwrap(), 0);
    let source = payload.get("source").unwrap().as_str().unwrap();
    assert!(source.ends_with("MEMORY.md"));
}

#[tokio::test]
async fn repeat_sync_converges_through_dedup() {
    let dir = tempfile::tempdir().unwrap();
    let memory_md = dir.path().join("MEMORY.md");
    fs::write(&memory_md, "the user prefers dark mode").unwrap();

    let engine = engine();
    let mut state = FakeSyncState::new();
    let options = SyncOptions::new(dir.path());
    run_sync(&engine, &mut state, &options).await.unwrap();

    // Rewritten file, same meaning (same scripted vector): the old chunk is
    // merged away rather than duplicated.
    fs::write(&memory_md, "the user prefers dark mode!").unwrap();
    run_sync(&engine, &mut state, &options).await.unwrap();
    assert_eq!(engine.index().len(), 1);
}
