// src/crawl/ranking.rs
// =============================================================================
// This module turns raw word counts into the "most popular words" list.
//
// Ranking order:
// 1. Higher count first
// 2. On a tie, longer word first
// 3. On a tie, alphabetical order
//
// The order of the returned list matters: it is the order the words are
// written to the JSON report.
// =============================================================================

use std::cmp::Ordering;
use std::collections::HashMap;

/// Returns the `limit` most popular words, best first.
///
/// Returns every word (ranked) if there are fewer than `limit`, and an empty
/// list for empty input.
pub fn rank(counts: &HashMap<String, u64>, limit: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(&String, &u64)> = counts.iter().collect();
    entries.sort_unstable_by(|a, b| compare(a, b));

    entries
        .into_iter()
        .take(limit)
        .map(|(word, count)| (word.clone(), *count))
        .collect()
}

// No two entries compare Equal because words are unique map keys,
// so an unstable sort still gives a deterministic order
fn compare(a: &(&String, &u64), b: &(&String, &u64)) -> Ordering {
    let (word_a, count_a) = a;
    let (word_b, count_b) = b;

    count_b
        .cmp(count_a)
        .then_with(|| word_b.chars().count().cmp(&word_a.chars().count()))
        .then_with(|| word_a.cmp(word_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn counts(entries: &[(&str, u64)]) -> HashMap<String, u64> {
        entries.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    fn owned(entries: &[(&str, u64)]) -> Vec<(String, u64)> {
        entries.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_tie_broken_by_length_then_alphabet() {
        let ranked = rank(&counts(&[("a", 2), ("bb", 2), ("c", 1)]), 2);
        assert_eq!(ranked, owned(&[("bb", 2), ("a", 2)]));
    }

    #[test]
    fn test_alphabetical_tie_break() {
        let ranked = rank(&counts(&[("pear", 3), ("kiwi", 3), ("plum", 3)]), 3);
        assert_eq!(ranked, owned(&[("kiwi", 3), ("pear", 3), ("plum", 3)]));
    }

    #[test]
    fn test_count_beats_length() {
        let ranked = rank(&counts(&[("a", 5), ("abcdef", 4)]), 5);
        assert_eq!(ranked, owned(&[("a", 5), ("abcdef", 4)]));
    }

    #[test]
    fn test_fewer_entries_than_limit() {
        let ranked = rank(&counts(&[("one", 1), ("two", 2)]), 10);
        assert_eq!(ranked, owned(&[("two", 2), ("one", 1)]));
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(&HashMap::new(), 5).is_empty());
    }

    #[test]
    fn test_zero_limit() {
        assert!(rank(&counts(&[("word", 1)]), 0).is_empty());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // "über" is 4 characters but 5 bytes
        let ranked = rank(&counts(&[("über", 1), ("abcde", 1)]), 2);
        assert_eq!(ranked, owned(&[("abcde", 1), ("über", 1)]));
    }

    proptest! {
        #[test]
        fn prop_ranked_prefix_is_sorted_and_complete(
            words in proptest::collection::hash_map("[a-z]{1,8}", 1u64..20, 0..40),
            limit in 0usize..50,
        ) {
            let ranked = rank(&words, limit);

            prop_assert_eq!(ranked.len(), limit.min(words.len()));

            for pair in ranked.windows(2) {
                let a = (&pair[0].0, &pair[0].1);
                let b = (&pair[1].0, &pair[1].1);
                prop_assert_eq!(compare(&a, &b), Ordering::Less);
            }

            // Nothing left out ranks better than the last word kept
            if let Some((last_word, last_count)) = ranked.last() {
                for (word, count) in &words {
                    if ranked.iter().any(|(w, _)| w == word) {
                        continue;
                    }
                    prop_assert_eq!(
                        compare(&(last_word, last_count), &(word, count)),
                        Ordering::Less
                    );
                }
            }
        }
    }
}
