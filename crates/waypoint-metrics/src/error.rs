//! Errors raised while rendering metric tables.

use thiserror::Error;

/// Errors that can occur while exporting metrics.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Polars error.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
