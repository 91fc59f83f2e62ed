//! Longest-matching-block sequence similarity.
//!
//! The ratio is `2·M / T`, where `M` is the total size of the matching blocks and `T` the
//! combined length of both inputs (in `char`s). Blocks are found greedily: take the longest
//! common contiguous run (leftmost in `a`, then leftmost in `b` on ties), then recurse into
//! the unmatched regions on its left and right.

use std::collections::HashMap;

/// A contiguous run where `a[a_start..a_start + size] == b[b_start..b_start + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Similarity of `a` and `b` in `[0.0, 1.0]`. Two empty strings score `1.0`.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched: usize = matching_blocks(&a, &b).iter().map(|m| m.size).sum();
    2.0 * matched as f64 / total as f64
}

/// Returns the matching blocks of `a` and `b`, ordered by position.
pub fn matching_blocks<T>(a: &[T], b: &[T]) -> Vec<MatchingBlock>
where
    T: Eq + std::hash::Hash,
{
    let b2j = positions_by_element(b);

    let mut blocks = Vec::new();
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let block = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if block.size == 0 {
            continue;
        }

        if alo < block.a_start && blo < block.b_start {
            pending.push((alo, block.a_start, blo, block.b_start));
        }
        let a_end = block.a_start + block.size;
        let b_end = block.b_start + block.size;
        if a_end < ahi && b_end < bhi {
            pending.push((a_end, ahi, b_end, bhi));
        }
        blocks.push(block);
    }

    blocks.sort_unstable();
    blocks
}

fn positions_by_element<T>(b: &[T]) -> HashMap<&T, Vec<usize>>
where
    T: Eq + std::hash::Hash,
{
    let mut b2j: HashMap<&T, Vec<usize>> = HashMap::new();
    for (j, elem) in b.iter().enumerate() {
        b2j.entry(elem).or_default().push(j);
    }
    b2j
}

/// Longest run inside `a[alo..ahi]` / `b[blo..bhi]`.
///
/// `j2len[j]` holds the length of the run ending at `a[i - 1]` and `b[j]`, so each row only
/// needs the previous one.
fn longest_match<T>(
    a: &[T],
    b2j: &HashMap<&T, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> MatchingBlock
where
    T: Eq + std::hash::Hash,
{
    let mut best = MatchingBlock {
        a_start: alo,
        b_start: blo,
        size: 0,
    };
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for (i, elem) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_j2len = HashMap::new();
        if let Some(positions) = b2j.get(elem) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let run = j
                    .checked_sub(1)
                    .and_then(|prev| j2len.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_j2len.insert(j, run);
                if run > best.size {
                    best = MatchingBlock {
                        a_start: i + 1 - run,
                        b_start: j + 1 - run,
                        size: run,
                    };
                }
            }
        }
        j2len = next_j2len;
    }

    best
}
