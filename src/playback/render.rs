use serde::Serialize;

use super::cursor::{PlaybackState, resolve_cursor};
use crate::error::SyncError;
use crate::models::{DiffAnnotations, Provenance, TimestampTable};
use crate::text::{TextRun, text_runs};

/// Everything the editor needs to paint one word
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordSpan {
    /// Position among the words of the text
    pub ordinal: usize,
    pub text: String,
    /// Byte offset in the text
    pub offset: usize,
    /// Start timestamp in seconds, if the word is timed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    /// End timestamp in seconds, if the word is timed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    /// The timing is an estimate
    pub estimated: bool,
    pub provenance: Provenance,
    /// Transcript word this one replaced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_word: Option<String>,
    pub playback: PlaybackState,
}

impl WordSpan {
    /// Hover text, e.g. "(estimated) · was: Lunge"
    pub fn tooltip(&self) -> Option<String> {
        let mut parts = Vec::new();
        if self.estimated {
            parts.push("(estimated)".to_string());
        }
        if let Some(word) = &self.original_word {
            parts.push(format!("was: {word}"));
        }
        (!parts.is_empty()).then(|| parts.join(" · "))
    }
}

/// A piece of the rendered text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderSpan {
    /// Whitespace, reproduced verbatim
    Whitespace { text: String },
    Word(WordSpan),
}

/// Lay out `local_text` as spans for the renderer.
///
/// `live` must have been built or remapped for exactly `local_text`; words it
/// has no entry for are rendered untimed. With a `current_time`, the word
/// under the playback cursor is `Current`.
pub fn render_spans(
    local_text: &str,
    live: &TimestampTable,
    annotations: &DiffAnnotations,
    current_time: Option<f64>,
) -> Result<Vec<RenderSpan>, SyncError> {
    live.ensure_snapshot(local_text)?;

    let cursor = match current_time {
        Some(time) if !live.is_empty() => Some(resolve_cursor(live.tokens(), time)),
        _ => None,
    };

    let mut ordinal = 0;
    let spans = text_runs(local_text)
        .into_iter()
        .map(|run| match run {
            TextRun::Whitespace(ws) => RenderSpan::Whitespace {
                text: ws.to_string(),
            },
            TextRun::Word { text, offset } => {
                let annotation = annotations.get(offset);
                let timed = live.at_offset(offset);

                let span = WordSpan {
                    ordinal,
                    text: text.to_string(),
                    offset,
                    start: timed.map(|(_, t)| t.start),
                    end: timed.map(|(_, t)| t.end),
                    estimated: timed.is_some_and(|(_, t)| t.is_interpolated),
                    provenance: annotation
                        .map(|a| a.provenance)
                        .unwrap_or(Provenance::Unchanged),
                    original_word: annotation.and_then(|a| a.original_word.clone()),
                    playback: match timed {
                        Some((index, _)) => PlaybackState::relative_to(index, cursor),
                        None => PlaybackState::Untimed,
                    },
                };
                ordinal += 1;
                RenderSpan::Word(span)
            }
        })
        .collect();

    Ok(spans)
}
