//! k-gram shingling with a polynomial rolling hash.
//!
//! Each window of `k` whitespace tokens is joined with single spaces and
//! hashed character by character. Base and modulus are fixed so hashes stay
//! comparable across runs and implementations.

/// Base multiplier for the shingle hash.
pub const HASH_BASE: u64 = 257;

/// Prime modulus (10^9 + 7).
pub const HASH_MOD: u64 = 1_000_000_007;

/// Default shingle width in tokens.
pub const DEFAULT_SHINGLE_WIDTH: usize = 5;

/// Split normalized text on whitespace runs.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Hash a string: `h = (h * 257 + codepoint) mod 1_000_000_007` per char.
pub fn rolling_hash(s: &str) -> u64 {
    s.chars()
        .fold(0u64, |h, c| (h * HASH_BASE + u64::from(c)) % HASH_MOD)
}

/// Hash every contiguous window of `k` tokens, in window order.
///
/// Returns an empty vector when there are fewer than `k` tokens: short
/// input carries no shingle signal.
pub fn shingle_hashes(normalized: &str, k: usize) -> Vec<u64> {
    let tokens = tokenize(normalized);
    if k == 0 || tokens.len() < k {
        return Vec::new();
    }
    tokens
        .windows(k)
        .map(|window| rolling_hash(&window.join(" ")))
        .collect()
}
