//! Word-frequency ranking over part descriptions.
//!
//! Tokens are whitespace-delimited and lower-cased; punctuation is kept, so
//! `"part,"` and `"part"` count separately. Ranking is by descending count,
//! with ties kept in first-occurrence order (descriptions in the order given,
//! tokens left to right).

use std::collections::HashMap;

use crate::models::WordCount;

/// Number of entries returned by the most-common-words report.
pub const TOP_WORDS: usize = 5;

/// Return the `k` most frequent tokens across all non-null descriptions.
///
/// Recomputed from scratch on every call; an empty input yields an empty
/// result.
pub fn most_common<'a, I>(descriptions: I, k: usize) -> Vec<WordCount>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    // Counts live in first-seen order; `index` maps a token to its slot.
    let mut counts: Vec<(String, i64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for description in descriptions.into_iter().flatten() {
        for token in description.split_whitespace() {
            let word = token.to_lowercase();
            match index.get(&word) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(word.clone(), counts.len());
                    counts.push((word, 1));
                }
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(k);

    counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect()
}
