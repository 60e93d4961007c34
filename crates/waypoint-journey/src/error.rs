//! Error types for journey snapshots.

use thiserror::Error;

/// Result type for journey operations.
pub type Result<T> = std::result::Result<T, JourneyError>;

/// Errors that can occur while building a journey snapshot.
#[derive(Debug, Error)]
pub enum JourneyError {
    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// A required value was null
    #[error("Missing value in column '{column}' at row {row}")]
    MissingValue {
        /// Column that held the null
        column: &'static str,
        /// Zero-based row index
        row: usize,
    },

    /// Timestamp outside the representable range
    #[error("Invalid timestamp {value}ms at row {row}")]
    InvalidTimestamp {
        /// Zero-based row index
        row: usize,
        /// Raw epoch milliseconds
        value: i64,
    },
}
