//! Field-level similarity signals. Inputs are expected to be normalized.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static RE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid regex"));

/// Flat bonus when both address strings share a number (e.g. street number).
pub const NUMERIC_TOKEN_BONUS: f64 = 0.1;

/// Minimum insert/delete/substitute operations turning `a` into `b`.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// `1 - distance / max(len)`, in [0, 1].
///
/// Two empty strings are identical (1.0); one empty side scores 0.0.
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Unique whitespace-delimited tokens.
pub fn tokens(text: &str) -> HashSet<&str> {
    text.split_whitespace().collect()
}

/// Share of `query` tokens also present in `candidate`.
///
/// Directional containment rather than Jaccard: a short query fully
/// contained in a longer candidate scores 1.0.
pub fn token_overlap(query: &str, candidate: &str) -> f64 {
    let query_tokens = tokens(query);
    let candidate_tokens = tokens(candidate);
    let shared = query_tokens
        .iter()
        .filter(|token| candidate_tokens.contains(*token))
        .count();

    shared as f64 / query_tokens.len().max(1) as f64
}

/// [`NUMERIC_TOKEN_BONUS`] if any digit run appears in both strings, else 0.
///
/// Not clamped here; only the combined pair score is clamped.
pub fn numeric_token_bonus(a: &str, b: &str) -> f64 {
    let numbers_b: HashSet<&str> = RE_DIGITS.find_iter(b).map(|m| m.as_str()).collect();
    if numbers_b.is_empty() {
        return 0.0;
    }

    let shared = RE_DIGITS
        .find_iter(a)
        .any(|m| numbers_b.contains(m.as_str()));
    if shared {
        NUMERIC_TOKEN_BONUS
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "../tests/analysis/similarity_tests.rs"]
mod tests;
