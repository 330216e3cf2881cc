use tracing::{debug, info};

use super::differ::{Step, Walk, diff_words};
use super::interpolate::{InterpolationConfig, fill_gaps};
use crate::models::{
    Segment, SpeechWord, TimestampTable, TimestampedToken, Timing, audio_duration,
    flatten_words, has_word_timings, synthesize_words,
};
use crate::text::{NormalizerConfig, keys, match_key, tokenize};

/// Configuration for building timestamp tables
#[derive(Debug, Clone, Default)]
pub struct BuilderConfig {
    /// Matching normalization
    pub normalizer: NormalizerConfig,
    /// Estimation constants for unaligned words
    pub interpolation: InterpolationConfig,
    /// Spread segment text over segment bounds when no word timings exist
    pub segment_fallback: bool,
}

/// Build the timestamp table for `formatted_text` from recognizer segments
///
/// This:
/// 1. Flattens the timed words of all segments
/// 2. Aligns them against the words of the formatted text
/// 3. Copies timings onto matched words
/// 4. Estimates timings for every word the recognizer did not produce
pub fn build_timestamp_table(
    segments: &[Segment],
    formatted_text: &str,
    config: &BuilderConfig,
) -> TimestampTable {
    let mut speech_words = flatten_words(segments);

    if speech_words.is_empty() && config.segment_fallback && !has_word_timings(segments) {
        speech_words = synthesize_words(segments);
        debug!(
            "No word timings, synthesized {} words from {} segments",
            speech_words.len(),
            segments.len()
        );
    }

    align_words(&speech_words, formatted_text, config)
}

/// Align recognized words against a text and fill in the gaps
pub fn align_words(
    speech_words: &[SpeechWord],
    formatted_text: &str,
    config: &BuilderConfig,
) -> TimestampTable {
    if speech_words.is_empty() {
        debug!("No speech words, text stays untimed");
        return TimestampTable::empty(formatted_text);
    }

    let formatted = tokenize(formatted_text, &config.normalizer);
    if formatted.is_empty() {
        return TimestampTable::empty(formatted_text);
    }

    let speech_keys: Vec<String> = speech_words
        .iter()
        .map(|w| match_key(&w.text, &config.normalizer))
        .collect();
    let runs = diff_words(&speech_keys, &keys(&formatted));
    debug!("Alignment edit script has {} runs", runs.len());

    // Pass 1: copy timings of matched words; recognizer-only words are dropped
    let mut slots: Vec<Option<Timing>> = vec![None; formatted.len()];
    for step in Walk::new(&runs) {
        if let Step::Matched { old, new } = step {
            let word = &speech_words[old];
            slots[new] = Some(Timing {
                start: word.start,
                end: word.end,
                is_interpolated: word.estimated,
            });
        }
    }
    let aligned = slots.iter().flatten().count();

    // Pass 2: estimate the rest
    let timings = fill_gaps(
        &slots,
        audio_duration(speech_words),
        &config.interpolation,
    );

    let tokens: Vec<TimestampedToken> = formatted
        .into_iter()
        .zip(timings)
        .map(|(token, timing)| TimestampedToken::new(token, timing))
        .collect();

    info!(
        "Aligned {} of {} words against {} speech words",
        aligned,
        tokens.len(),
        speech_words.len()
    );

    TimestampTable::new(formatted_text, tokens)
}
