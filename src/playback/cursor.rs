use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::models::TimestampedToken;

/// Index of the word being spoken at `current_time`.
///
/// The first word whose `[start, end)` contains the time wins; between words
/// the last word already started stays highlighted; before the first word the
/// cursor rests on index 0.
pub fn resolve_cursor(tokens: &[TimestampedToken], current_time: f64) -> usize {
    if let Some(index) = tokens.iter().position(|t| t.contains(current_time)) {
        return index;
    }

    tokens
        .iter()
        .rposition(|t| t.start <= current_time)
        .unwrap_or(0)
}

/// Position of a word relative to the playback cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Past,
    Current,
    Upcoming,
    /// The word has no timing
    Untimed,
}

impl PlaybackState {
    pub fn relative_to(index: usize, cursor: Option<usize>) -> Self {
        match cursor {
            Some(c) if index < c => PlaybackState::Past,
            Some(c) if index == c => PlaybackState::Current,
            _ => PlaybackState::Upcoming,
        }
    }
}

/// Request for the audio player to jump to a position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeekRequest {
    /// Target position in seconds
    pub start: f64,
}

/// Seek target for a clicked word
pub fn seek_request(tokens: &[TimestampedToken], index: usize) -> Result<SeekRequest, SyncError> {
    tokens
        .get(index)
        .map(|t| SeekRequest { start: t.start })
        .ok_or(SyncError::UnknownToken {
            ordinal: index,
            len: tokens.len(),
        })
}
