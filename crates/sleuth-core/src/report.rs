//! Score and verdict types shared by the detector, the CLI and the server.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two independent similarity signals, each a percentage in `[0, 100]`
/// rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePair {
    /// Jaccard overlap of the k-gram hash sets.
    pub hash_similarity: f64,
    /// Matching-block ratio of the two structure dumps.
    pub ast_similarity: f64,
}

/// Final binary classification of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Plagiarized")]
    Plagiarized,
    #[serde(rename = "Likely Original")]
    LikelyOriginal,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plagiarized => "Plagiarized",
            Self::LikelyOriginal => "Likely Original",
        }
    }

    pub fn is_plagiarized(self) -> bool {
        self == Self::Plagiarized
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one comparison, serialized with the field names the upload
/// endpoint has always returned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    #[serde(rename = "normalized_hash_similarity")]
    pub hash_similarity: f64,
    pub ast_similarity: f64,
    pub verdict: Verdict,
}

impl ComparisonReport {
    pub fn new(scores: ScorePair, verdict: Verdict) -> Self {
        Self {
            hash_similarity: scores.hash_similarity,
            ast_similarity: scores.ast_similarity,
            verdict,
        }
    }

    pub fn scores(&self) -> ScorePair {
        ScorePair {
            hash_similarity: self.hash_similarity,
            ast_similarity: self.ast_similarity,
        }
    }
}

/// Round a `[0, 1]` ratio to a percentage with two decimals.
///
/// Uses `f64::round`, i.e. halves round away from zero.
pub fn to_percent(ratio: f64) -> f64 {
    (ratio * 100.0 * 100.0).round() / 100.0
}
