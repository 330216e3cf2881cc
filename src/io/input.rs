use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::io::output::MachineTimestamps;
use crate::models::{Segment, TimestampTable};

/// Accepted shapes of a segments file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SegmentsInput {
    /// Bare segment list
    List(Vec<Segment>),
    /// Full transcription service response: `{text, segments, language, ...}`
    Response {
        segments: Vec<Segment>,
        #[serde(default)]
        language: Option<String>,
    },
}

/// Parse a segments JSON file
pub fn parse_segments_file(path: &Path) -> Result<Vec<Segment>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_segments_json(&content)
}

/// Parse segments JSON, either a bare list or a transcription response
pub fn parse_segments_json(json: &str) -> Result<Vec<Segment>> {
    let input: SegmentsInput =
        serde_json::from_str(json).context("Failed to parse segments JSON")?;

    let segments = match input {
        SegmentsInput::List(segments) => segments,
        SegmentsInput::Response { segments, language } => {
            if let Some(language) = language {
                debug!("Transcription language: {}", language);
            }
            segments
        }
    };

    if segments.is_empty() {
        warn!("Segments input contains no segments");
    }
    Ok(segments)
}

/// Read a text snapshot verbatim
pub fn read_text_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
}

/// Read a timestamp table previously written by `MachineTimestamps::write_json`
pub fn read_table_file(path: &Path) -> Result<TimestampTable> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    let machine: MachineTimestamps =
        serde_json::from_str(&content).context("Failed to parse timestamp table JSON")?;
    Ok(machine.into_table())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_list() {
        let json = r#"[
            {"start": 0.0, "end": 1.0, "text": " Herz gesund", "words": [
                {"word": "Herz", "start": 0.0, "end": 0.5, "score": 0.91},
                {"word": "gesund", "start": 0.5, "end": 1.0}
            ]}
        ]"#;

        let segments = parse_segments_json(json).unwrap();
        assert_eq!(segments.len(), 1);
        let words = segments[0].words.as_ref().unwrap();
        assert_eq!(words[0].score, Some(0.91));
        assert_eq!(words[1].end, Some(1.0));
    }

    #[test]
    fn test_parse_service_response() {
        let json = r#"{
            "text": "Herz gesund",
            "language": "de",
            "segments": [
                {"start": 0.0, "end": 1.0, "text": "Herz gesund", "words": [
                    {"word": "Herz", "start": 0.0, "end": 0.5},
                    {"word": "77"}
                ]},
                {"start": 1.0, "end": 2.0, "text": "ohne Wörter"}
            ]
        }"#;

        let segments = parse_segments_json(json).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].words.as_ref().unwrap()[1].start, None);
        assert!(segments[1].words.is_none());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_segments_json(r#"{"text": "kein Segment"}"#).is_err());
        assert!(parse_segments_json("nicht json").is_err());
    }

    #[test]
    fn test_read_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("segments.json");
        std::fs::write(&path, r#"{"segments": []}"#).unwrap();
        assert!(parse_segments_file(&path).unwrap().is_empty());

        let text_path = dir.path().join("text.txt");
        std::fs::write(&text_path, "Das Herz\n\nist gesund.\n").unwrap();
        assert_eq!(read_text_file(&text_path).unwrap(), "Das Herz\n\nist gesund.\n");

        assert!(read_text_file(&dir.path().join("missing.txt")).is_err());
    }
}
