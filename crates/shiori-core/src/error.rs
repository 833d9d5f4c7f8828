use thiserror::Error;

/// Errors that can occur while loading a catalog or building the recommender.
#[derive(Debug, Error)]
pub enum ShioriError {
    /// The query string is empty or contains only whitespace.
    #[error("query is empty or whitespace-only")]
    EmptyQuery,

    /// The catalog source lacks a column the pipeline depends on.
    #[error("catalog is missing required column: {column:?}")]
    MissingColumn {
        /// Name of the missing column.
        column: String,
    },

    /// The CSV reader failed on the header or the underlying stream.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The catalog file could not be opened or read.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// Derived structures disagree on the number of records.
    #[error("index size mismatch: expected {expected} rows, got {got}")]
    IndexMismatch {
        /// Number of records in the catalog.
        expected: usize,
        /// Number of rows found in the derived structure.
        got: usize,
    },

    /// An invalid recommender configuration was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for Shiori operations.
pub type Result<T> = std::result::Result<T, ShioriError>;
