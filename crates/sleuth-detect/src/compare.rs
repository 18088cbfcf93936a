//! The two-signal comparison pipeline.
//!
//! Token signal: normalize → shingle hashes → Jaccard overlap.
//! Structure signal: structure dump (or error marker) → matching-block ratio.
//! Both feed the verdict policy. Every call is independent; nothing is cached.

use crate::normalize::normalize;
use crate::overlap::hash_similarity;
use crate::sequence::structure_similarity;
use crate::shingle::shingle_hashes;
use crate::verdict::{ThresholdPolicy, VerdictPolicy};
use sleuth_core::config::DetectionConfig;
use sleuth_core::report::{ComparisonReport, ScorePair};
use sleuth_parser::{Language, StructureParser, TreeSitterParser, extract_structure};

/// Compares pairs of submissions written in one language.
pub struct Comparator {
    comment_markers: &'static [&'static str],
    shingle_width: usize,
    autojunk: bool,
    parser: Box<dyn StructureParser + Send + Sync>,
    policy: Box<dyn VerdictPolicy>,
}

impl Comparator {
    pub fn new(language: Language, config: &DetectionConfig) -> Self {
        Self {
            comment_markers: language.line_comment_markers(),
            shingle_width: config.shingle_width,
            autojunk: config.autojunk,
            parser: Box::new(TreeSitterParser::new(language)),
            policy: Box::new(ThresholdPolicy::from(config)),
        }
    }

    /// Replace the verdict rule without touching either scorer.
    #[must_use]
    pub fn with_policy(mut self, policy: impl VerdictPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Replace the structure parser (e.g. a different grammar binding).
    #[must_use]
    pub fn with_parser(mut self, parser: impl StructureParser + Send + Sync + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn shingle_width(&self) -> usize {
        self.shingle_width
    }

    /// Token-shingle overlap of two raw sources, in percent.
    pub fn hash_score(&self, source_a: &str, source_b: &str) -> f64 {
        let hashes_a = shingle_hashes(
            &normalize(source_a, self.comment_markers),
            self.shingle_width,
        );
        let hashes_b = shingle_hashes(
            &normalize(source_b, self.comment_markers),
            self.shingle_width,
        );
        let score = hash_similarity(&hashes_a, &hashes_b);
        tracing::debug!(
            shingles_a = hashes_a.len(),
            shingles_b = hashes_b.len(),
            k = self.shingle_width,
            score,
            "hash similarity"
        );
        score
    }

    /// Structural similarity of two raw sources, in percent.
    pub fn ast_score(&self, source_a: &str, source_b: &str) -> f64 {
        let dump_a = extract_structure(&*self.parser, source_a);
        let dump_b = extract_structure(&*self.parser, source_b);
        let score = structure_similarity(&dump_a, &dump_b, self.autojunk);
        tracing::debug!(
            dump_a = dump_a.len(),
            dump_b = dump_b.len(),
            score,
            "structure similarity"
        );
        score
    }

    pub fn scores(&self, source_a: &str, source_b: &str) -> ScorePair {
        ScorePair {
            hash_similarity: self.hash_score(source_a, source_b),
            ast_similarity: self.ast_score(source_a, source_b),
        }
    }

    pub fn compare(&self, source_a: &str, source_b: &str) -> ComparisonReport {
        let scores = self.scores(source_a, source_b);
        let verdict = self.policy.decide(&scores);
        tracing::debug!(%verdict, "comparison finished");
        ComparisonReport::new(scores, verdict)
    }
}

/// Compare two Python sources with shingle width `k` and the default thresholds.
pub fn compare(source_a: &str, source_b: &str, k: usize) -> ComparisonReport {
    let config = DetectionConfig {
        shingle_width: k,
        ..DetectionConfig::default()
    };
    Comparator::new(Language::Python, &config).compare(source_a, source_b)
}
