use serde::{Deserialize, Serialize};
use tracing::warn;

/// A single word inside a recognizer segment (WhisperX alignment output)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SegmentWord {
    /// The recognized text
    pub word: String,
    /// Start timestamp in seconds (missing for words the aligner could not place)
    #[serde(default)]
    pub start: Option<f64>,
    /// End timestamp in seconds
    #[serde(default)]
    pub end: Option<f64>,
    /// Alignment score (0-1), if the aligner reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// A transcription segment as produced by the recognizer
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Segment {
    /// Segment start in seconds
    #[serde(default)]
    pub start: f64,
    /// Segment end in seconds
    #[serde(default)]
    pub end: f64,
    /// Segment text
    #[serde(default)]
    pub text: String,
    /// Word-level timings, absent when alignment was skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<SegmentWord>>,
}

/// A recognized word with timing, flattened out of the segment list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechWord {
    pub text: String,
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
    /// Timing was spread across the segment rather than recognized per word
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub estimated: bool,
}

impl SpeechWord {
    /// Convert a segment word, dropping words that carry no timing at all.
    ///
    /// A word with only one bound uses it for both.
    pub fn from_segment_word(word: &SegmentWord) -> Option<Self> {
        let text = word.word.trim();
        if text.is_empty() {
            return None;
        }

        let (start, end) = match (word.start, word.end) {
            (Some(start), Some(end)) => (start, end),
            (Some(start), None) => (start, start),
            (None, Some(end)) => (end, end),
            (None, None) => return None,
        };

        Some(Self {
            text: text.to_string(),
            start,
            end: end.max(start),
            estimated: false,
        })
    }
}

/// Flatten all timed words across segments, in order
pub fn flatten_words(segments: &[Segment]) -> Vec<SpeechWord> {
    let mut words = Vec::new();
    let mut skipped = 0usize;

    for word in segments.iter().flat_map(|s| s.words.iter().flatten()) {
        match SpeechWord::from_segment_word(word) {
            Some(w) => words.push(w),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Skipped {} recognizer words without timing", skipped);
    }

    words
}

/// Whether any segment carries word-level timings
pub fn has_word_timings(segments: &[Segment]) -> bool {
    segments
        .iter()
        .flat_map(|s| s.words.iter().flatten())
        .any(|w| w.start.is_some() || w.end.is_some())
}

/// Spread each segment's text evenly over its time range.
///
/// Used when the recognizer ran without word alignment. Every produced word
/// is flagged `estimated`.
pub fn synthesize_words(segments: &[Segment]) -> Vec<SpeechWord> {
    let mut words = Vec::new();

    for segment in segments {
        let parts: Vec<&str> = segment.text.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        let span = (segment.end - segment.start).max(0.0);
        let step = span / parts.len() as f64;

        for (i, part) in parts.iter().enumerate() {
            let start = segment.start + step * i as f64;
            words.push(SpeechWord {
                text: part.to_string(),
                start,
                end: start + step,
                estimated: true,
            });
        }
    }

    words
}

/// Total audio duration covered by the words (largest end)
pub fn audio_duration(words: &[SpeechWord]) -> f64 {
    words.iter().map(|w| w.end).fold(0.0, f64::max)
}
