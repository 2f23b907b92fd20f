use proptest::prelude::*;

use clawbrain_ingest::{chunk_text, normalize, sha256_hex};

proptest! {
    #[test]
    fn normalize_is_idempotent(text in ".{0,400}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_never_leaves_wide_gaps(text in "[a-z \t\n]{0,400}") {
        let normalized = normalize(&text);
        prop_assert!(!normalized.contains("\n\n\n"));
        prop_assert!(!normalized.contains("  "));
        prop_assert!(!normalized.contains('\t'));
    }

    #[test]
    fn chunks_stay_within_the_window(
        text in "[a-z .!?\n]{0,2000}",
        size in 40usize..200,
    ) {
        let overlap = size / 5;
        for chunk in chunk_text(&text, size, overlap) {
            prop_assert!(chunk.chars().count() <= size);
        }
    }

    #[test]
    fn chunks_cover_every_word(word_count in 1usize..150) {
        let text = (0..word_count)
            .map(|i| format!("w{i}"))
            .collect::<Vec<_>>()
            .join(" ");
        let chunks = chunk_text(&text, 80, 16);
        for i in 0..word_count {
            let needle = format!("w{i}");
            prop_assert!(
                chunks.iter().any(|c| c.contains(&needle)),
                "{} missing", needle
            );
        }
    }

    #[test]
    fn digest_is_deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(sha256_hex(&bytes), sha256_hex(&bytes));
    }

    #[test]
    fn digest_separates_different_bytes(
        a in proptest::collection::vec(any::<u8>(), 0..128),
        b in proptest::collection::vec(any::<u8>(), 0..128),
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(sha256_hex(&a), sha256_hex(&b));
    }
}
