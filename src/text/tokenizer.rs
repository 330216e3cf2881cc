use std::sync::LazyLock;

use regex::Regex;

use super::{NormalizerConfig, match_key};
use crate::models::Token;

static WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+").expect("Invalid word run regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace run regex"));

/// Split text into its non-whitespace runs, attaching each run's matching key
pub fn tokenize(text: &str, config: &NormalizerConfig) -> Vec<Token> {
    WORD_RUN
        .find_iter(text)
        .enumerate()
        .map(|(ordinal, m)| Token {
            text: m.as_str().to_string(),
            normalized: match_key(m.as_str(), config),
            offset: m.start(),
            ordinal,
        })
        .collect()
}

/// Matching keys of a token list, positionally parallel to it
pub fn keys(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.normalized.as_str()).collect()
}

/// A piece of text as laid out on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRun<'a> {
    Word { text: &'a str, offset: usize },
    Whitespace(&'a str),
}

/// Walk text as alternating word and whitespace runs.
///
/// Concatenating the runs reproduces the input exactly.
pub fn text_runs(text: &str) -> Vec<TextRun<'_>> {
    let mut runs = Vec::new();
    let mut cursor = 0;

    for m in WHITESPACE_RUN.find_iter(text) {
        if m.start() > cursor {
            runs.push(TextRun::Word {
                text: &text[cursor..m.start()],
                offset: cursor,
            });
        }
        runs.push(TextRun::Whitespace(m.as_str()));
        cursor = m.end();
    }

    if cursor < text.len() {
        runs.push(TextRun::Word {
            text: &text[cursor..],
            offset: cursor,
        });
    }

    runs
}
