//! Line-level normalization ahead of shingling.
//!
//! Drops blank lines and lines that start with a single-line comment marker,
//! trims what remains. Block comments and trailing comments after code are
//! kept: this is a line filter, not a lexer.

/// Normalize `source`, treating lines that start with any of `markers` as comments.
pub fn normalize(source: &str, markers: &[&str]) -> String {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !markers.iter().any(|m| line.starts_with(m)))
        .collect::<Vec<_>>()
        .join("\n")
}
