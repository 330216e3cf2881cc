use std::sync::Arc;

use tracing::debug;

use crate::align::{BuilderConfig, build_timestamp_table, remap_table};
use crate::cache::{Generation, Memo};
use crate::classify::classify;
use crate::error::SyncError;
use crate::models::{DiffAnnotations, EditLineage, Segment, TimestampTable};
use crate::playback::{RenderSpan, SeekRequest, render_spans, resolve_cursor, seek_request};

type StableKey = (Generation, Generation);
type LiveKey = (StableKey, Generation);

/// One dictation open in the editor.
///
/// Owns the recognizer segments and the three text versions, and hands out
/// timestamp tables that are rebuilt only when an input they depend on has
/// changed.
#[derive(Debug)]
pub struct SyncSession {
    config: BuilderConfig,
    segments: Vec<Segment>,
    lineage: EditLineage,
    segments_gen: Generation,
    text_gen: Generation,
    local_gen: Generation,
    stable: Memo<StableKey, TimestampTable>,
    live: Memo<LiveKey, TimestampTable>,
}

impl SyncSession {
    pub fn new(segments: Vec<Segment>, lineage: EditLineage, config: BuilderConfig) -> Self {
        Self {
            config,
            segments,
            lineage,
            segments_gen: Generation::default(),
            text_gen: Generation::default(),
            local_gen: Generation::default(),
            stable: Memo::default(),
            live: Memo::default(),
        }
    }

    pub fn lineage(&self) -> &EditLineage {
        &self.lineage
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn set_segments(&mut self, segments: Vec<Segment>) {
        if self.segments != segments {
            self.segments = segments;
            self.segments_gen.bump();
        }
    }

    /// Replace the saved text, e.g. after a correction pass or a save.
    ///
    /// An unedited live text follows the new saved text.
    pub fn set_corrected(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.lineage.text == text {
            return;
        }

        if !self.lineage.is_locally_edited() {
            self.lineage.local_text = text.clone();
            self.local_gen.bump();
        }
        self.lineage.text = text;
        self.text_gen.bump();
    }

    /// Update the text being edited
    pub fn set_local_text(&mut self, local_text: impl Into<String>) {
        let local_text = local_text.into();
        if self.lineage.local_text != local_text {
            self.lineage.local_text = local_text;
            self.local_gen.bump();
        }
    }

    /// Discard local edits
    pub fn reset_local(&mut self) {
        let text = self.lineage.text.clone();
        self.set_local_text(text);
    }

    /// Timestamp table for the saved text
    pub fn stable_table(&mut self) -> Arc<TimestampTable> {
        let key = (self.segments_gen, self.text_gen);
        let (segments, text, config) = (&self.segments, &self.lineage.text, &self.config);

        self.stable.get_or_compute(key, || {
            debug!("Rebuilding stable table");
            build_timestamp_table(segments, text, config)
        })
    }

    /// Timestamp table for the text being edited
    pub fn live_table(&mut self) -> Arc<TimestampTable> {
        let stable = self.stable_table();
        if stable.is_valid_for(&self.lineage.local_text) {
            return stable;
        }

        let key = ((self.segments_gen, self.text_gen), self.local_gen);
        let (local_text, config) = (&self.lineage.local_text, &self.config);

        self.live.get_or_compute(key, || {
            debug!("Remapping live table");
            remap_table(&stable, local_text, config)
        })
    }

    /// Provenance of every word in the text being edited
    pub fn annotations(&self) -> DiffAnnotations {
        classify(
            &self.lineage.original_text,
            &self.lineage.text,
            &self.lineage.local_text,
            &self.config.normalizer,
        )
    }

    /// Index of the live word being spoken at `current_time`
    pub fn cursor(&mut self, current_time: f64) -> Option<usize> {
        let live = self.live_table();
        (!live.is_empty()).then(|| resolve_cursor(live.tokens(), current_time))
    }

    /// Seek target for a click on the live word at `index`
    pub fn seek(&mut self, index: usize) -> Result<SeekRequest, SyncError> {
        let live = self.live_table();
        seek_request(live.tokens(), index)
    }

    pub fn render(&mut self, current_time: Option<f64>) -> Result<Vec<RenderSpan>, SyncError> {
        let live = self.live_table();
        let annotations = self.annotations();
        render_spans(&self.lineage.local_text, &live, &annotations, current_time)
    }

    /// Share of live words anchored to a recognized word (0-100)
    pub fn match_quality(&mut self) -> u8 {
        self.live_table().match_quality()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Provenance;

    fn segments() -> Vec<Segment> {
        serde_json::from_str(
            r#"[{"start": 0.0, "end": 1.0, "text": "herz gesund", "words": [
                {"word": "Herz", "start": 0.0, "end": 0.5},
                {"word": "gesund", "start": 0.5, "end": 1.0}
            ]}]"#,
        )
        .unwrap()
    }

    fn session() -> SyncSession {
        SyncSession::new(
            segments(),
            EditLineage::new("herz gesund", "Das Herz ist gesund."),
            BuilderConfig::default(),
        )
    }

    #[test]
    fn test_tables_are_memoized() {
        let mut session = session();
        let first = session.stable_table();
        let second = session.stable_table();
        assert!(Arc::ptr_eq(&first, &second));

        // unedited text shares the stable table
        let live = session.live_table();
        assert!(Arc::ptr_eq(&first, &live));

        // setting an identical value keeps the cache
        session.set_corrected("Das Herz ist gesund.");
        assert!(Arc::ptr_eq(&first, &session.stable_table()));

        session.set_corrected("Das Herz ist völlig gesund.");
        assert!(!Arc::ptr_eq(&first, &session.stable_table()));
    }

    #[test]
    fn test_live_table_follows_edits() {
        let mut session = session();
        session.set_local_text("Das Herz ist gesund. Ende.");

        let live = session.live_table();
        assert_eq!(live.snapshot(), "Das Herz ist gesund. Ende.");
        assert_eq!(live.len(), 5);
        assert!(Arc::ptr_eq(&live, &session.live_table()));
        assert_eq!(session.match_quality(), 40);

        session.reset_local();
        assert!(!session.lineage().is_locally_edited());
        assert!(Arc::ptr_eq(&session.live_table(), &session.stable_table()));
    }

    #[test]
    fn test_unedited_text_follows_correction() {
        let mut session = session();
        session.set_corrected("Das Herz ist völlig gesund.");

        assert!(!session.lineage().is_locally_edited());
        assert_eq!(session.lineage().local_text, "Das Herz ist völlig gesund.");
        let live = session.live_table();
        assert_eq!(live.snapshot(), "Das Herz ist völlig gesund.");
        assert!(Arc::ptr_eq(&live, &session.stable_table()));
        assert_eq!(session.render(None).unwrap().len(), 9);
    }

    #[test]
    fn test_local_edits_survive_correction() {
        let mut session = session();
        session.set_local_text("Das Herz ist gesund. Ende.");
        session.set_corrected("Das Herz ist völlig gesund.");

        assert_eq!(session.lineage().local_text, "Das Herz ist gesund. Ende.");
        assert!(session.lineage().is_locally_edited());
        assert_eq!(session.live_table().snapshot(), "Das Herz ist gesund. Ende.");
    }

    #[test]
    fn test_cursor_and_seek() {
        let mut session = session();
        assert_eq!(session.cursor(0.7), Some(3));
        assert_eq!(session.seek(1).unwrap(), SeekRequest { start: 0.0 });
        assert!(session.seek(10).is_err());

        session.set_segments(Vec::new());
        assert_eq!(session.cursor(0.7), None);
    }

    #[test]
    fn test_render_marks_edits() {
        let mut session = session();
        session.set_local_text("Das Herz ist völlig gesund.");

        let spans = session.render(Some(0.2)).unwrap();
        let words: Vec<_> = spans
            .iter()
            .filter_map(|s| match s {
                RenderSpan::Word(w) => Some(w),
                RenderSpan::Whitespace { .. } => None,
            })
            .collect();

        assert_eq!(words.len(), 5);
        assert_eq!(words[0].provenance, Provenance::AiAdded);
        assert_eq!(words[1].provenance, Provenance::Unchanged);
        assert_eq!(words[3].provenance, Provenance::Manual);
        assert!(words[3].estimated);
        assert_eq!(words[1].playback, crate::playback::PlaybackState::Current);
    }
}
