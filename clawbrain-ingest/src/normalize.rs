//! Whitespace normalization applied to every chunk before storage.

/// Trim outer whitespace, collapse runs of 3+ newlines to exactly two
/// (paragraph structure survives), and collapse runs of spaces or tabs on
/// the same line to a single space. Idempotent.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0usize;
    let mut pending_space = false;

    for ch in text.trim().chars() {
        match ch {
            '\n' => {
                if pending_space {
                    out.push(' ');
                    pending_space = false;
                }
                newlines += 1;
            }
            ' ' | '\t' => pending_space = true,
            _ => {
                if newlines > 0 {
                    for _ in 0..newlines.min(2) {
                        out.push('\n');
                    }
                    newlines = 0;
                }
                if pending_space {
                    out.push(' ');
                    pending_space = false;
                }
                out.push(ch);
            }
        }
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_space_and_tab_runs() {
        assert_eq!(normalize("a  b\tc \t d"), "a b c d");
    }

    #[test]
    fn preserves_single_and_double_newlines() {
        assert_eq!(normalize("a\nb"), "a\nb");
        assert_eq!(normalize("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn collapses_newline_runs_to_paragraph_break() {
        assert_eq!(normalize("a\n\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\n\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn trims_outer_whitespace() {
        assert_eq!(normalize("  \n hello \n  "), "hello");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n "), "");
    }

    #[test]
    fn trailing_line_spaces_collapse() {
        assert_eq!(normalize("a   \nb"), "a \nb");
    }

    #[test]
    fn idempotent_on_mixed_input() {
        let raw = "  Title\n\n\n\n  body   text\twith\ttabs \n\nmore  ";
        let once = normalize(raw);
        assert_eq!(normalize(&once), once);
    }
}
