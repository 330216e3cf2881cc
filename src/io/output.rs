use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{DiffAnnotation, DiffAnnotations, Provenance, TimestampTable, TimestampedToken};
use crate::playback::{PlaybackState, RenderSpan};

/// Machine-readable timestamp table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineTimestamps {
    /// Text snapshot the offsets refer to
    pub text: String,
    pub tokens: Vec<TimestampedToken>,
    pub metadata: TableMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetadata {
    pub total_tokens: usize,
    pub anchored: usize,
    pub interpolated: usize,
    /// Percentage of anchored tokens (0-100)
    pub match_quality: u8,
    pub audio_duration: f64,
    /// RFC 3339 creation time
    pub generated_at: String,
}

impl MachineTimestamps {
    pub fn from_table(table: &TimestampTable) -> Self {
        Self {
            text: table.snapshot().to_string(),
            tokens: table.tokens().to_vec(),
            metadata: TableMetadata {
                total_tokens: table.len(),
                anchored: table.anchor_count(),
                interpolated: table.interpolated_count(),
                match_quality: table.match_quality(),
                audio_duration: table.audio_duration(),
                generated_at: chrono::Utc::now().to_rfc3339(),
            },
        }
    }

    pub fn into_table(self) -> TimestampTable {
        TimestampTable::new(self.text, self.tokens)
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        write_json(self, path)
    }
}

/// Machine-readable word classification
#[derive(Debug, Clone, Serialize)]
pub struct MachineAnnotations {
    pub text: String,
    pub annotations: Vec<DiffAnnotation>,
    pub ai_added: usize,
    pub manual: usize,
}

impl MachineAnnotations {
    pub fn new(text: &str, annotations: &DiffAnnotations) -> Self {
        Self {
            text: text.to_string(),
            annotations: annotations.iter().cloned().collect(),
            ai_added: annotations.count(Provenance::AiAdded),
            manual: annotations.count(Provenance::Manual),
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        write_json(self, path)
    }
}

/// Pretty-print any serializable value to a JSON file
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, value).context("Failed to write JSON")?;
    Ok(())
}

/// Human-readable read-along of rendered spans.
///
/// The text keeps its layout with markers around changed words
/// (`+AI-added+`, `*manual*`) and the current word in `[brackets]`,
/// followed by one line per word with its timing.
pub struct HumanReadalong<'a> {
    spans: &'a [RenderSpan],
}

impl<'a> HumanReadalong<'a> {
    pub fn new(spans: &'a [RenderSpan]) -> Self {
        Self { spans }
    }

    pub fn format(&self) -> String {
        let mut output = String::new();

        for span in self.spans {
            match span {
                RenderSpan::Whitespace { text } => output.push_str(text),
                RenderSpan::Word(word) => {
                    let marked = match word.provenance {
                        Provenance::AiAdded => format!("+{}+", word.text),
                        Provenance::Manual => format!("*{}*", word.text),
                        Provenance::Unchanged => word.text.clone(),
                    };
                    if word.playback == PlaybackState::Current {
                        output.push_str(&format!("[{}]", marked));
                    } else {
                        output.push_str(&marked);
                    }
                }
            }
        }

        output.push_str("\n\n");

        for span in self.spans {
            let RenderSpan::Word(word) = span else {
                continue;
            };
            let timing = match (word.start, word.end) {
                (Some(start), Some(end)) => {
                    format!("{} - {}", format_timestamp(start), format_timestamp(end))
                }
                _ => "untimed".to_string(),
            };
            output.push_str(&format!("{:>4}  {:<23}  {}", word.ordinal, timing, word.text));
            if let Some(tooltip) = word.tooltip() {
                output.push_str(&format!("  {}", tooltip));
            }
            output.push('\n');
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Format seconds as MM:SS.mmm
pub fn format_timestamp(seconds: f64) -> String {
    let ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let secs = ms / 1000;
    let millis = ms % 1000;
    let minutes = secs / 60;
    format!("{:02}:{:02}.{:03}", minutes, secs % 60, millis)
}
