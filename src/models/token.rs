use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// A whitespace-delimited word of one text snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The word exactly as it appears in the text
    pub text: String,
    /// Comparison key, never displayed
    pub normalized: String,
    /// Byte offset of the word in its snapshot
    pub offset: usize,
    /// Zero-based position among the snapshot's tokens
    pub ordinal: usize,
}

impl Token {
    /// Byte range of this token in its snapshot
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }
}

/// Start/end of a word plus whether it was estimated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub start: f64,
    pub end: f64,
    pub is_interpolated: bool,
}

/// A token of a specific snapshot with its audio position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampedToken {
    pub text: String,
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
    /// `false` when copied from a recognized word, `true` when estimated
    pub is_interpolated: bool,
    /// Byte offset of the word in its snapshot
    pub offset: usize,
}

impl TimestampedToken {
    pub fn new(token: Token, timing: Timing) -> Self {
        Self {
            text: token.text,
            start: timing.start,
            end: timing.end,
            is_interpolated: timing.is_interpolated,
            offset: token.offset,
        }
    }

    pub fn timing(&self) -> Timing {
        Timing {
            start: self.start,
            end: self.end,
            is_interpolated: self.is_interpolated,
        }
    }

    /// Whether `time` falls inside `[start, end)`
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time < self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Ordered timestamped tokens bound to the exact text they were computed for.
///
/// Offsets are only meaningful for that text; use the live remapper to carry
/// timings over to an edited version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampTable {
    snapshot: String,
    tokens: Vec<TimestampedToken>,
}

impl TimestampTable {
    pub fn new(snapshot: impl Into<String>, tokens: Vec<TimestampedToken>) -> Self {
        Self {
            snapshot: snapshot.into(),
            tokens,
        }
    }

    /// A table with no timings, e.g. when the recognizer produced no words
    pub fn empty(snapshot: impl Into<String>) -> Self {
        Self::new(snapshot, Vec::new())
    }

    /// The text this table was computed for
    pub fn snapshot(&self) -> &str {
        &self.snapshot
    }

    pub fn tokens(&self) -> &[TimestampedToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Look up the token starting at a byte offset, with its index
    pub fn at_offset(&self, offset: usize) -> Option<(usize, &TimestampedToken)> {
        self.tokens
            .binary_search_by_key(&offset, |t| t.offset)
            .ok()
            .map(|i| (i, &self.tokens[i]))
    }

    pub fn is_valid_for(&self, text: &str) -> bool {
        self.snapshot == text
    }

    /// Fail unless this table was computed for exactly `text`
    pub fn ensure_snapshot(&self, text: &str) -> Result<(), SyncError> {
        if self.is_valid_for(text) {
            Ok(())
        } else {
            Err(SyncError::SnapshotMismatch {
                table_len: self.snapshot.len(),
                text_len: text.len(),
            })
        }
    }

    /// Number of tokens with a timing taken directly from the recognizer
    pub fn anchor_count(&self) -> usize {
        self.tokens.iter().filter(|t| !t.is_interpolated).count()
    }

    pub fn interpolated_count(&self) -> usize {
        self.tokens.len() - self.anchor_count()
    }

    /// Percentage of tokens anchored to a recognized word (0-100)
    pub fn match_quality(&self) -> u8 {
        if self.tokens.is_empty() {
            return 0;
        }
        (100.0 * self.anchor_count() as f64 / self.tokens.len() as f64).round() as u8
    }

    /// Largest end timestamp in the table
    pub fn audio_duration(&self) -> f64 {
        self.tokens.iter().map(|t| t.end).fold(0.0, f64::max)
    }
}
