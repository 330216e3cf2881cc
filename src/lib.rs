pub mod align;
pub mod cache;
pub mod classify;
pub mod error;
pub mod io;
pub mod models;
pub mod playback;
pub mod session;
pub mod text;

pub use align::{BuilderConfig, InterpolationConfig, build_timestamp_table, diff_words, remap_table};
pub use classify::classify;
pub use error::SyncError;
pub use io::{
    HumanReadalong, MachineAnnotations, MachineTimestamps, parse_segments_file,
    parse_segments_json, read_table_file, read_text_file,
};
pub use models::{
    DiffAnnotation, DiffAnnotations, EditLineage, Provenance, Segment, TimestampTable,
    TimestampedToken,
};
pub use playback::{RenderSpan, SeekRequest, render_spans, resolve_cursor};
pub use session::SyncSession;
pub use text::{Language, NormalizerConfig, normalize, normalize_for_matching};
