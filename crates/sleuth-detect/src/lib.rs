//! Plagiarism scoring for pairs of source files.
//!
//! Two independent signals are computed and combined:
//! - [`shingle`] + [`overlap`]: Jaccard overlap of k-token shingle hashes
//!   over [`normalize`]d text;
//! - [`sequence`]: matching-block ratio of structure dumps produced by
//!   `sleuth-parser`.
//!
//! [`verdict`] turns the score pair into a verdict and [`compare`] wires
//! the whole pipeline.

pub mod compare;
pub mod normalize;
pub mod overlap;
pub mod sequence;
pub mod shingle;
pub mod verdict;

pub use compare::{Comparator, compare};
