//! Source discovery: explicit files, explicit directories, or the default
//! memory layout under the base path.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Collect candidate source files, canonicalised and deduplicated.
///
/// With neither `files` nor `dirs` given, discovery defaults to the first of
/// `MEMORY.md` / `memory.md` at the base (never both, so case-insensitive
/// filesystems cannot produce phantom duplicates) plus every `*.md` directly
/// under `<base>/memory/`.
pub fn discover_files(base: &Path, files: &[PathBuf], dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = Vec::new();

    for file in files {
        let path = absolute(base, file);
        if path.is_file() {
            found.push(path);
        }
    }
    for dir in dirs {
        found.extend(markdown_in(&absolute(base, dir)));
    }

    if files.is_empty() && dirs.is_empty() {
        for name in ["MEMORY.md", "memory.md"] {
            let candidate = base.join(name);
            if candidate.is_file() {
                found.push(candidate);
                break;
            }
        }
        found.extend(markdown_in(&base.join("memory")));
    }

    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for path in found {
        let canonical = path.canonicalize().unwrap_or(path);
        if seen.insert(canonical.clone()) {
            unique.push(canonical);
        }
    }
    debug!(count = unique.len(), "discovered source files");
    unique
}

fn absolute(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Non-recursive `*.md` listing, sorted for deterministic runs.
fn markdown_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();
    files
}
