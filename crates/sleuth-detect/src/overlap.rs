//! Jaccard overlap of shingle hash sets.

use sleuth_core::report::to_percent;
use std::collections::HashSet;

/// Jaccard similarity: |A ∩ B| / |A ∪ B|. Empty union yields 0.0.
pub fn jaccard_similarity(a: &HashSet<u64>, b: &HashSet<u64>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Percentage overlap of two hash sequences, rounded to two decimals.
/// Duplicate hashes collapse before comparison.
pub fn hash_similarity(hashes_a: &[u64], hashes_b: &[u64]) -> f64 {
    let a: HashSet<u64> = hashes_a.iter().copied().collect();
    let b: HashSet<u64> = hashes_b.iter().copied().collect();
    to_percent(jaccard_similarity(&a, &b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sets() {
        assert_eq!(hash_similarity(&[1, 2, 3], &[3, 2, 1]), 100.0);
    }

    #[test]
    fn test_disjoint_sets() {
        assert_eq!(hash_similarity(&[1, 2], &[3, 4]), 0.0);
    }

    #[test]
    fn test_partial_overlap_rounds() {
        // {1,2,3} vs {2,3,4}: 2 / 4
        assert_eq!(hash_similarity(&[1, 2, 3], &[2, 3, 4]), 50.0);
        // {1,2} vs {2,3,4}: 1 / 4
        assert_eq!(hash_similarity(&[1, 2], &[2, 3, 4]), 25.0);
        // 1 / 3
        assert_eq!(hash_similarity(&[1, 2], &[2, 3]), 33.33);
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(hash_similarity(&[7, 7, 7, 8], &[7, 8, 8]), 100.0);
    }

    #[test]
    fn test_empty_union_is_zero() {
        assert_eq!(hash_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_one_side_empty_is_zero() {
        assert_eq!(hash_similarity(&[1, 2, 3], &[]), 0.0);
    }
}
