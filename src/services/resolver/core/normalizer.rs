//! Text normalization for property names, cities, states and street lines.
//!
//! Both entry points are pure: the same input always yields the same
//! canonical form and normalizing twice changes nothing.

use std::collections::HashMap;
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Punctuation removed before comparison (periods, commas, quote marks).
const STRIPPED_PUNCTUATION: &[char] = &['.', ',', '\'', '"', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

/// Directional and street-type abbreviations. Two-word keys are tried before
/// single words so `"n e"` becomes `"northeast"` rather than `"north east"`.
const ADDRESS_ABBREVIATIONS: &[(&str, &str)] = &[
    ("n e", "northeast"),
    ("n w", "northwest"),
    ("s e", "southeast"),
    ("s w", "southwest"),
    ("ne", "northeast"),
    ("nw", "northwest"),
    ("se", "southeast"),
    ("sw", "southwest"),
    ("n", "north"),
    ("s", "south"),
    ("e", "east"),
    ("w", "west"),
    ("st", "street"),
    ("rd", "road"),
    ("ave", "avenue"),
    ("blvd", "boulevard"),
    ("ln", "lane"),
    ("dr", "drive"),
    ("ct", "court"),
    ("pl", "place"),
    ("sq", "square"),
    ("pkwy", "parkway"),
    ("cir", "circle"),
    ("apt", "apartment"),
    ("bldg", "building"),
];

static ABBREVIATIONS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ADDRESS_ABBREVIATIONS.iter().copied().collect());

/// Canonicalize free text for comparison.
///
/// Pipeline:
/// 1. NFKD decomposition, combining marks dropped (`"Café"` → `"Cafe"`)
/// 2. Strip periods, commas and quote marks
/// 3. Collapse whitespace runs and trim
/// 4. Lowercase
///
/// Empty input yields the empty string.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let stripped: String = text
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();

    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    // Lowercasing can itself emit combining marks ('İ' → "i\u{307}").
    collapsed
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Normalize an optional field; `None` becomes the empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Address-aware variant of [`normalize`] that expands abbreviations.
///
/// Adjacent word pairs are looked up first; a hit consumes both words.
/// Otherwise the single word is looked up. Words are never reprocessed.
pub fn normalize_address(text: &str) -> String {
    let base = normalize(text);
    let words: Vec<&str> = base.split(' ').filter(|w| !w.is_empty()).collect();

    let mut result: Vec<&str> = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        if let Some(next) = words.get(i + 1) {
            let pair = format!("{} {}", words[i], next);
            if let Some(expanded) = ABBREVIATIONS.get(pair.as_str()) {
                result.push(expanded);
                i += 2;
                continue;
            }
        }

        result.push(ABBREVIATIONS.get(words[i]).copied().unwrap_or(words[i]));
        i += 1;
    }

    result.join(" ")
}

pub fn normalize_address_opt(text: Option<&str>) -> String {
    text.map(normalize_address).unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/normalizer_tests.rs"]
mod tests;
