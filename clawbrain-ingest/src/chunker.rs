//! Character-window chunking aligned to natural boundaries.
//!
//! Characters approximate tokens well enough for sizing here. Split points
//! are searched in the last quarter of each window, preferring a paragraph
//! break, then a sentence end, then a line break; a window with no natural
//! boundary is hard-split.

/// Split `text` into overlapping chunks of at most `size` characters.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() <= size {
        return vec![trimmed.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;

    loop {
        let end = start + size;
        if end >= chars.len() {
            push_chunk(&mut chunks, &chars[start..]);
            break;
        }

        let split_at = find_split(&chars, start, end).unwrap_or(end);
        push_chunk(&mut chunks, &chars[start..split_at]);

        let prev_start = start;
        let mut next = split_at.saturating_sub(overlap);
        if next <= prev_start {
            // The window shrank below the overlap; jump to guarantee progress.
            next = prev_start + size;
        }
        start = next;
        if start >= chars.len() {
            break;
        }
    }

    chunks
}

fn push_chunk(chunks: &mut Vec<String>, window: &[char]) {
    let chunk: String = window.iter().collect();
    let chunk = chunk.trim();
    if !chunk.is_empty() {
        chunks.push(chunk.to_string());
    }
}

/// Best natural split point in the last quarter of `[start, end)`.
fn find_split(chars: &[char], start: usize, end: usize) -> Option<usize> {
    let window = end - start;
    let search_from = end - window / 4;

    let mut paragraph = None;
    let mut sentence = None;
    let mut line = None;

    for i in search_from..end {
        match chars[i] {
            '\n' if i + 1 < end && chars[i + 1] == '\n' => paragraph = Some(i + 2),
            '\n' => line = Some(i + 1),
            '.' | '!' | '?'
                if i + 1 < end && matches!(chars[i + 1], ' ' | '\n') =>
            {
                sentence = Some(i + 1)
            }
            _ => {}
        }
    }

    paragraph.or(sentence).or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(chunk_text("hello world", 1600, 320), vec!["hello world"]);
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(chunk_text("   \n ", 1600, 320).is_empty());
    }

    #[test]
    fn splits_at_paragraph_break() {
        let first = "a".repeat(90);
        let second = "b".repeat(60);
        let text = format!("{first}\n\n{second}");
        let chunks = chunk_text(&text, 100, 10);
        assert_eq!(chunks[0], first);
        assert!(chunks.last().unwrap().ends_with(&second));
    }

    #[test]
    fn prefers_sentence_end_over_line_break() {
        let text = format!("{}. {}\n{}", "a".repeat(85), "b".repeat(5), "c".repeat(60));
        let chunks = chunk_text(&text, 100, 10);
        assert!(chunks[0].ends_with('.'), "chunk was {:?}", chunks[0]);
    }

    #[test]
    fn hard_splits_without_natural_boundary() {
        let text = "x".repeat(250);
        let chunks = chunk_text(&text, 100, 20);
        assert!(chunks.len() >= 3);
        assert!(chunks.iter().all(|c| c.len() <= 100));
    }

    #[test]
    fn consecutive_chunks_overlap() {
        let text = "word ".repeat(100); // 500 chars, no sentence ends
        let chunks = chunk_text(text.trim(), 100, 20);
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().rev().take(10).collect();
            let tail: String = tail.chars().rev().collect();
            assert!(
                pair[1].contains(tail.trim()),
                "no overlap between {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn covers_all_content() {
        let text = (0..40)
            .map(|i| format!("sentence number {i} goes here."))
            .collect::<Vec<_>>()
            .join(" ");
        let chunks = chunk_text(&text, 100, 20);
        for i in 0..40 {
            let needle = format!("sentence number {i}");
            assert!(
                chunks.iter().any(|c| c.contains(&needle)),
                "{needle} missing from chunks"
            );
        }
    }
}
