use thiserror::Error;

/// Errors at the boundary between the engine and its callers
#[derive(Debug, Error)]
pub enum SyncError {
    /// A timestamp table was used against text it was not built for
    #[error("timestamp table belongs to a different text snapshot (table has {table_len} bytes, text has {text_len} bytes)")]
    SnapshotMismatch { table_len: usize, text_len: usize },

    /// A seek was requested for a word the table does not have
    #[error("no token with ordinal {ordinal} (table has {len} tokens)")]
    UnknownToken { ordinal: usize, len: usize },
}
