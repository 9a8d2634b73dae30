use thiserror::Error;

/// Per-file conditions. All of these are recoverable at file granularity:
/// the pipeline records them as a skip/fail outcome and moves on.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("no carrier column found (tried {aliases:?})")]
    MissingColumn { aliases: Vec<String> },

    #[error("missing required columns {columns:?}")]
    MissingProjection { columns: Vec<String> },

    #[error("unreadable input: {0}")]
    Unreadable(String),
}
