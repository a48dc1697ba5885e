//! Error types for the qplay crate

use thiserror::Error;

/// Main error type for the qplay crate
///
/// Contract violations (occupied cells, empty action sets, misaligned
/// batches, queue overflow) indicate a bug in the calling loop and should
/// abort the run rather than be retried.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("no valid actions available")]
    NoValidActions,

    #[error("estimator produced a non-finite value at cell ({row}, {col})")]
    NonFiniteValue { row: usize, col: usize },

    #[error("batch lengths must match: {states} states, {actions} actions, {targets} targets")]
    BatchLengthMismatch {
        states: usize,
        actions: usize,
        targets: usize,
    },

    #[error("pending transition queue holds at most {capacity} entries")]
    QueueOverflow { capacity: usize },

    #[error("grid size mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("action grid has no marked cell")]
    ActionNotMarked,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
