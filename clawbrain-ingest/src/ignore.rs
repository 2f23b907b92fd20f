//! Ignore-pattern handling for discovered sources.
//!
//! Patterns come from the `.clawbrain-ignore` file in the base directory
//! union-ed with CLI excludes. A file is ignored when any pattern matches
//! its base name, its full path, or, for patterns containing a path
//! separator, when the path ends with `<sep><pattern>`.

use std::path::Path;

use glob::Pattern;
use tracing::warn;

/// Name of the per-directory ignore file.
pub const IGNORE_FILE: &str = ".clawbrain-ignore";

pub struct IgnoreSet {
    patterns: Vec<String>,
}

impl IgnoreSet {
    /// Read `<base>/.clawbrain-ignore` (blank and `#` lines dropped) and
    /// union it with the CLI excludes.
    pub fn load(base: &Path, cli_excludes: &[String]) -> Self {
        let mut patterns: Vec<String> = Vec::new();
        if let Ok(content) = std::fs::read_to_string(base.join(IGNORE_FILE)) {
            patterns.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty() && !l.starts_with('#'))
                    .map(String::from),
            );
        }
        patterns.extend(cli_excludes.iter().cloned());
        Self { patterns }
    }

    pub fn from_patterns(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    pub fn matches(&self, path: &Path) -> bool {
        let full = path.to_string_lossy();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        self.patterns.iter().any(|pattern| {
            let globbed = match Pattern::new(pattern) {
                Ok(p) => p.matches(&name) || p.matches(&full),
                Err(e) => {
                    warn!(%pattern, error = %e, "invalid ignore pattern");
                    false
                }
            };
            globbed
                || (pattern.contains(std::path::MAIN_SEPARATOR)
                    && full.ends_with(&format!("{}{pattern}", std::path::MAIN_SEPARATOR)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn set(patterns: &[&str]) -> IgnoreSet {
        IgnoreSet::from_patterns(patterns.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn matches_base_name_glob() {
        let s = set(&["*.draft.md"]);
        assert!(s.matches(&PathBuf::from("/notes/plan.draft.md")));
        assert!(!s.matches(&PathBuf::from("/notes/plan.md")));
    }

    #[test]
    fn matches_exact_name() {
        let s = set(&["SCRATCH.md"]);
        assert!(s.matches(&PathBuf::from("/a/b/SCRATCH.md")));
        assert!(!s.matches(&PathBuf::from("/a/b/scratch.md")));
    }

    #[test]
    fn separator_pattern_matches_path_suffix() {
        let s = set(&["memory/private.md"]);
        assert!(s.matches(&PathBuf::from("/base/memory/private.md")));
        assert!(!s.matches(&PathBuf::from("/base/other/private.md")));
    }

    #[test]
    fn full_path_glob() {
        let s = set(&["/base/tmp/*"]);
        assert!(s.matches(&PathBuf::from("/base/tmp/anything.md")));
        assert!(!s.matches(&PathBuf::from("/base/keep/anything.md")));
    }

    #[test]
    fn empty_set_matches_nothing() {
        assert!(!set(&[]).matches(&PathBuf::from("/a.md")));
    }
}
