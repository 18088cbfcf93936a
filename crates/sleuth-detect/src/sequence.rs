//! Greedy matching-block similarity between two sequences.
//!
//! Finds the longest common contiguous block, then recurses into the pieces
//! to its left and right; the similarity ratio is `2 * matched / total`.
//! With `autojunk`, elements that are very frequent in the second sequence
//! (more than 1% + 1 of its length, for sequences of 200+ elements) may
//! extend a match but never seed one. This keeps long structure dumps, which
//! are dominated by parentheses and commas, from matching on noise.

use sleuth_core::report::to_percent;
use std::collections::HashMap;
use std::hash::Hash;

/// Minimum length of the second sequence before autojunk applies.
const AUTOJUNK_MIN_LEN: usize = 200;

/// A matching block: `a[a_start..a_start + size] == b[b_start..b_start + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Matching-block finder over two borrowed sequences.
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    /// Positions of each (non-popular) element of `b`, ascending.
    b2j: HashMap<T, Vec<usize>>,
}

impl<'a, T: Eq + Hash + Copy> SequenceMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T], autojunk: bool) -> Self {
        let mut b2j: HashMap<T, Vec<usize>> = HashMap::new();
        for (j, &elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }
        if autojunk && b.len() >= AUTOJUNK_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= ntest);
        }
        Self { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` x `b[blo..bhi]`.
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (a, b) = (self.a, self.b);
        let mut best_i = alo;
        let mut best_j = blo;
        let mut best_size = 0;

        // j2len[j] = length of the longest match ending at a[i - 1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut new_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    new_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Popular elements were left out of b2j; let them extend the block.
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == b[best_j + best_size]
        {
            best_size += 1;
        }

        Match {
            a_start: best_i,
            b_start: best_j,
            size: best_size,
        }
    }

    /// Non-overlapping matching blocks in ascending order, adjacent blocks merged.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            blocks.push(m);
            if alo < m.a_start && blo < m.b_start {
                queue.push((alo, m.a_start, blo, m.b_start));
            }
            if m.a_start + m.size < ahi && m.b_start + m.size < bhi {
                queue.push((m.a_start + m.size, ahi, m.b_start + m.size, bhi));
            }
        }
        blocks.sort_unstable();

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len());
        for block in blocks {
            match merged.last_mut() {
                Some(prev)
                    if prev.a_start + prev.size == block.a_start
                        && prev.b_start + prev.size == block.b_start =>
                {
                    prev.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged
    }

    /// `2 * matched / (len(a) + len(b))`, or 1.0 when both are empty.
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matched: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        2.0 * matched as f64 / total as f64
    }
}

/// Structural similarity of two dumps as a percentage with two decimals.
///
/// The pair is put in a canonical order first, so the score does not depend
/// on which submission came first.
pub fn structure_similarity(dump_a: &str, dump_b: &str, autojunk: bool) -> f64 {
    if dump_a == dump_b {
        return 100.0;
    }
    let (first, second) = if dump_a <= dump_b {
        (dump_a, dump_b)
    } else {
        (dump_b, dump_a)
    };
    let a: Vec<char> = first.chars().collect();
    let b: Vec<char> = second.chars().collect();
    to_percent(SequenceMatcher::new(&a, &b, autojunk).ratio())
}
