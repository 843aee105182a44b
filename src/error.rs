//! Error types for the qgrid crate

use thiserror::Error;

/// Main error type for the qgrid crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action {action}: environment has {action_count} actions")]
    InvalidAction { action: usize, action_count: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error(
        "invalid character '{character}' at row {row}, column {column} (expected S, F, H, or G)"
    )]
    InvalidMapCharacter {
        character: char,
        row: usize,
        column: usize,
    },

    #[error("map row {row} has {got} cells, expected {expected}")]
    RaggedMap {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("map has no rows")]
    EmptyMap,

    #[error("map has multiple start cells (states {first} and {second})")]
    MultipleStarts { first: usize, second: usize },

    #[error("map has no start cell 'S'")]
    MissingStart,

    #[error("map has no goal cell 'G'")]
    MissingGoal,

    #[error("state {state} is out of bounds (table has {state_count} states)")]
    StateOutOfBounds { state: usize, state_count: usize },

    #[error("unsupported save format version {found}, expected {expected}")]
    UnsupportedSaveVersion { found: u32, expected: u32 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

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
