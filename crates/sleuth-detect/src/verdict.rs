//! Combining the two similarity scores into a verdict.

use sleuth_core::config::DetectionConfig;
use sleuth_core::report::{ScorePair, Verdict};

/// Default hash similarity threshold (percent).
pub const DEFAULT_HASH_THRESHOLD: f64 = 60.0;

/// Default structural similarity threshold (percent).
pub const DEFAULT_AST_THRESHOLD: f64 = 70.0;

/// Decides a verdict from a score pair. Must be a pure, total function.
pub trait VerdictPolicy: Send + Sync {
    fn decide(&self, scores: &ScorePair) -> Verdict;
}

/// Plagiarized when either score is strictly above its threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPolicy {
    pub hash_threshold: f64,
    pub ast_threshold: f64,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            hash_threshold: DEFAULT_HASH_THRESHOLD,
            ast_threshold: DEFAULT_AST_THRESHOLD,
        }
    }
}

impl From<&DetectionConfig> for ThresholdPolicy {
    fn from(config: &DetectionConfig) -> Self {
        Self {
            hash_threshold: config.hash_threshold,
            ast_threshold: config.ast_threshold,
        }
    }
}

impl VerdictPolicy for ThresholdPolicy {
    fn decide(&self, scores: &ScorePair) -> Verdict {
        if scores.hash_similarity > self.hash_threshold
            || scores.ast_similarity > self.ast_threshold
        {
            Verdict::Plagiarized
        } else {
            Verdict::LikelyOriginal
        }
    }
}
