use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dictalign::{
    BuilderConfig, EditLineage, HumanReadalong, Language, MachineAnnotations, MachineTimestamps,
    NormalizerConfig, SyncSession, build_timestamp_table, classify, parse_segments_file,
    read_table_file, read_text_file, remap_table, resolve_cursor, text::tokenize,
};

#[derive(Parser)]
#[command(name = "dictalign")]
#[command(author, version, about = "Word timestamps and edit tracking for corrected dictations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LanguageArg {
    De,
    En,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::De => Language::German,
            LanguageArg::En => Language::English,
        }
    }
}

/// Matching options shared by every subcommand that compares text
#[derive(clap::Args)]
struct NormalizerArgs {
    /// Dictation language
    #[arg(long, value_enum, default_value = "de")]
    language: LanguageArg,

    /// Compare spoken numbers literally instead of as digits
    #[arg(long)]
    no_spoken_numbers: bool,
}

impl NormalizerArgs {
    fn normalizer_config(&self) -> NormalizerConfig {
        NormalizerConfig {
            language: self.language.into(),
            spoken_numbers: !self.no_spoken_numbers,
        }
    }

    fn builder_config(&self) -> BuilderConfig {
        BuilderConfig {
            normalizer: self.normalizer_config(),
            ..Default::default()
        }
    }
}

/// Options for subcommands that build a table from segments
#[derive(clap::Args)]
struct BuildArgs {
    #[command(flatten)]
    normalizer: NormalizerArgs,

    /// Spread segment text over segment bounds when no word timings exist
    #[arg(long)]
    segment_fallback: bool,
}

impl BuildArgs {
    fn builder_config(&self) -> BuilderConfig {
        BuilderConfig {
            segment_fallback: self.segment_fallback,
            ..self.normalizer.builder_config()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the timestamp table for a corrected text
    Align {
        /// Recognizer segments (JSON list or transcription response)
        #[arg(short, long)]
        segments: PathBuf,

        /// Corrected text
        #[arg(short, long)]
        text: PathBuf,

        /// Output file for the timestamp table (JSON)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        matching: BuildArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Carry a timestamp table over to an edited text
    Remap {
        /// Timestamp table written by `align`
        #[arg(long)]
        table: PathBuf,

        /// Edited text
        #[arg(short, long)]
        local: PathBuf,

        /// Output file for the remapped table (JSON)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        matching: NormalizerArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Mark AI-added and manually edited words
    Classify {
        /// Recognizer transcript
        #[arg(long)]
        original: PathBuf,

        /// Last saved text
        #[arg(long)]
        saved: PathBuf,

        /// Text being edited
        #[arg(short, long)]
        local: PathBuf,

        /// Output file for the annotations (JSON)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        matching: NormalizerArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Render a read-along of an editing session
    Render {
        /// Recognizer segments (JSON list or transcription response)
        #[arg(short, long)]
        segments: PathBuf,

        /// Recognizer transcript
        #[arg(long)]
        original: PathBuf,

        /// Last saved text
        #[arg(long)]
        saved: PathBuf,

        /// Text being edited, defaults to the saved text
        #[arg(short, long)]
        local: Option<PathBuf>,

        /// Playback position in seconds
        #[arg(long)]
        time: Option<f64>,

        /// Output file for the read-along (text), printed when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        matching: BuildArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the word being spoken at a playback position
    Cursor {
        /// Timestamp table written by `align` or `remap`
        #[arg(long)]
        table: PathBuf,

        /// Playback position in seconds
        #[arg(long)]
        time: f64,

        /// Text the table must belong to
        #[arg(short, long)]
        text: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Report how well a text aligns with the recognizer output
    Analyze {
        /// Recognizer segments (JSON list or transcription response)
        #[arg(short, long)]
        segments: PathBuf,

        /// Corrected text
        #[arg(short, long)]
        text: PathBuf,

        #[command(flatten)]
        matching: BuildArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Align {
            segments,
            text,
            output,
            matching,
            verbose,
        } => {
            setup_logging(verbose);
            align(segments, text, output, matching.builder_config())
        }
        Commands::Remap {
            table,
            local,
            output,
            matching,
            verbose,
        } => {
            setup_logging(verbose);
            remap(table, local, output, matching.builder_config())
        }
        Commands::Classify {
            original,
            saved,
            local,
            output,
            matching,
            verbose,
        } => {
            setup_logging(verbose);
            classify_edits(original, saved, local, output, matching.normalizer_config())
        }
        Commands::Render {
            segments,
            original,
            saved,
            local,
            time,
            output,
            matching,
            verbose,
        } => {
            setup_logging(verbose);
            render(
                segments,
                original,
                saved,
                local,
                time,
                output,
                matching.builder_config(),
            )
        }
        Commands::Cursor {
            table,
            time,
            text,
            verbose,
        } => {
            setup_logging(verbose);
            show_cursor(table, time, text)
        }
        Commands::Analyze {
            segments,
            text,
            matching,
            verbose,
        } => {
            setup_logging(verbose);
            analyze(segments, text, matching.builder_config())
        }
    }
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn align(segments: PathBuf, text: PathBuf, output: PathBuf, config: BuilderConfig) -> Result<()> {
    info!("Loading segments from {:?}", segments);
    let segments = parse_segments_file(&segments).context("Failed to parse segments")?;
    let text = read_text_file(&text)?;

    let table = build_timestamp_table(&segments, &text, &config);
    info!(
        "Aligned {} words: {} anchored, {} interpolated ({}% match)",
        table.len(),
        table.anchor_count(),
        table.interpolated_count(),
        table.match_quality()
    );

    MachineTimestamps::from_table(&table).write_json(&output)?;
    info!("Output written to {:?}", output);
    Ok(())
}

fn remap(table: PathBuf, local: PathBuf, output: PathBuf, config: BuilderConfig) -> Result<()> {
    info!("Loading timestamp table from {:?}", table);
    let stable = read_table_file(&table).context("Failed to load timestamp table")?;
    let local_text = read_text_file(&local)?;

    let live = remap_table(&stable, &local_text, &config);
    info!(
        "Remapped {} words onto {} ({}% match)",
        stable.len(),
        live.len(),
        live.match_quality()
    );

    MachineTimestamps::from_table(&live).write_json(&output)?;
    info!("Output written to {:?}", output);
    Ok(())
}

fn classify_edits(
    original: PathBuf,
    saved: PathBuf,
    local: PathBuf,
    output: PathBuf,
    config: NormalizerConfig,
) -> Result<()> {
    let original_text = read_text_file(&original)?;
    let saved_text = read_text_file(&saved)?;
    let local_text = read_text_file(&local)?;

    let annotations = classify(&original_text, &saved_text, &local_text, &config);
    let machine = MachineAnnotations::new(&local_text, &annotations);
    info!(
        "Classified {} words: {} AI-added, {} manual",
        annotations.len(),
        machine.ai_added,
        machine.manual
    );

    machine.write_json(&output)?;
    info!("Output written to {:?}", output);
    Ok(())
}

fn render(
    segments: PathBuf,
    original: PathBuf,
    saved: PathBuf,
    local: Option<PathBuf>,
    time: Option<f64>,
    output: Option<PathBuf>,
    config: BuilderConfig,
) -> Result<()> {
    let segments = parse_segments_file(&segments).context("Failed to parse segments")?;
    let original_text = read_text_file(&original)?;
    let saved_text = read_text_file(&saved)?;

    let mut session = SyncSession::new(segments, EditLineage::new(original_text, saved_text), config);
    if let Some(local) = local {
        session.set_local_text(read_text_file(&local)?);
    }

    let spans = session.render(time)?;
    info!("Rendered with {}% match", session.match_quality());

    let readalong = HumanReadalong::new(&spans);
    match output {
        Some(path) => {
            readalong.write_file(&path)?;
            info!("Read-along written to {:?}", path);
        }
        None => print!("{}", readalong.format()),
    }
    Ok(())
}

fn show_cursor(table: PathBuf, time: f64, text: Option<PathBuf>) -> Result<()> {
    let table = read_table_file(&table).context("Failed to load timestamp table")?;
    if let Some(text) = text {
        table.ensure_snapshot(&read_text_file(&text)?)?;
    }

    if table.is_empty() {
        println!("No timed words");
        return Ok(());
    }

    let index = resolve_cursor(table.tokens(), time);
    let token = &table.tokens()[index];
    println!(
        "#{} {:?} {:.3}s-{:.3}s{}",
        index,
        token.text,
        token.start,
        token.end,
        if token.is_interpolated { " (estimated)" } else { "" }
    );
    Ok(())
}

fn analyze(segments: PathBuf, text: PathBuf, config: BuilderConfig) -> Result<()> {
    info!("Analyzing {:?} against {:?}", text, segments);
    let segments = parse_segments_file(&segments).context("Failed to parse segments")?;
    let text = read_text_file(&text)?;

    let recognized: usize = segments
        .iter()
        .filter_map(|s| s.words.as_ref())
        .map(|w| w.len())
        .sum();
    let table = build_timestamp_table(&segments, &text, &config);

    println!("Alignment Analysis");
    println!("==================");
    println!("Segments: {}", segments.len());
    println!("Recognized words: {}", recognized);
    println!("Text words: {}", tokenize(&text, &config.normalizer).len());
    println!("Anchored: {}", table.anchor_count());
    println!("Interpolated: {}", table.interpolated_count());
    println!("Match quality: {}%", table.match_quality());
    println!("Audio duration: {:.1}s", table.audio_duration());

    Ok(())
}
