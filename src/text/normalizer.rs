use serde::{Deserialize, Serialize};

use super::numbers;

/// Language of the spoken-number table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    German,
    English,
}

/// Configuration for matching normalization
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Language of the dictation
    pub language: Language,
    /// Translate spoken numbers, ordinals and month names to digits
    pub spoken_numbers: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            language: Language::German,
            spoken_numbers: true,
        }
    }
}

/// Punctuation and quote marks ignored when comparing words.
/// Hyphens are kept so compounds like "Magen-Darm" stay one word.
const PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '"', '\'', '`', '´', '„', '“', '”', '‚', '‘', '’', '«', '»',
    '‹', '›', '(', ')', '[', ']', '{', '}', '<', '>', '…', '*', '/', '\\', '|',
];

/// Canonical form of a word for comparison.
///
/// 1. Lowercase and trim.
/// 2. Words containing digits reduce to their digits ("18.09.2025" → "18092025").
/// 3. Otherwise punctuation and quotes are stripped; letters, including
///    diacritics, are kept.
pub fn normalize(word: &str) -> String {
    let lowered = word.trim().to_lowercase();

    if lowered.chars().any(|c| c.is_ascii_digit()) {
        let digits: String = lowered.chars().filter(char::is_ascii_digit).collect();
        if !digits.is_empty() {
            return digits;
        }
    }

    lowered
        .chars()
        .filter(|c| !PUNCTUATION.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// `normalize`, plus spoken-number translation when enabled
/// ("achtzehnten" → "18", "April" → "04").
pub fn normalize_for_matching(word: &str, config: &NormalizerConfig) -> String {
    let normalized = normalize(word);

    if config.spoken_numbers {
        if let Some(digits) = numbers::lookup(config.language, &normalized) {
            return digits.to_string();
        }
    }

    normalized
}

/// Key used by the sequence differ.
///
/// Punctuation-only words normalize to nothing; they fall back to their
/// lowercased text so a dash never matches a full stop.
pub fn match_key(word: &str, config: &NormalizerConfig) -> String {
    let key = normalize_for_matching(word, config);
    if key.is_empty() {
        word.trim().to_lowercase()
    } else {
        key
    }
}
