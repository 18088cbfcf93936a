//! Core types and configuration for code-sleuth.
//!
//! Provides the comparison result model ([`report::ComparisonReport`],
//! [`report::ScorePair`], [`report::Verdict`]) and the layered
//! configuration ([`config::SleuthConfig`]).

pub mod config;
pub mod report;
