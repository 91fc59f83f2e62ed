use std::cmp::Ordering;

use crate::storage::{FeedbackEntry, normalize_name};

use super::ratio::similarity_ratio;
use super::types::ScoredEntry;

/// Scores every entry against `query` without filtering or truncation, in store order.
pub fn score_entries<'a>(query: &str, entries: &'a [FeedbackEntry]) -> Vec<ScoredEntry<'a>> {
    let query = normalize_name(query);
    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let ratio = similarity_ratio(&query, &normalize_name(&entry.name));
            ScoredEntry::new(position, entry, ratio)
        })
        .collect()
}

/// Returns up to `count` entries most similar to `query`, best first.
///
/// Entries with a zero ratio are never returned. Equal ratios keep store order (the sort is
/// stable). An empty query, an empty slice or `count == 0` yields an empty result.
pub fn rank_similar<'a>(
    query: &str,
    entries: &'a [FeedbackEntry],
    count: usize,
) -> Vec<ScoredEntry<'a>> {
    if count == 0 || query.is_empty() || entries.is_empty() {
        return Vec::new();
    }

    let mut scored = score_entries(query, entries);

    // `sort_by` is stable; ties must stay in insertion order.
    scored.sort_by(|a, b| b.ratio.partial_cmp(&a.ratio).unwrap_or(Ordering::Equal));

    scored
        .into_iter()
        .filter(ScoredEntry::is_similar)
        .take(count)
        .collect()
}

/// Returns the first `count` entries in store order.
pub fn sample(entries: &[FeedbackEntry], count: usize) -> &[FeedbackEntry] {
    &entries[..count.min(entries.len())]
}
