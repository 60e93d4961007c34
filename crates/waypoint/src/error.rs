//! Top-level error type.

use thiserror::Error;
use waypoint_journey::JourneyError;
use waypoint_metrics::MetricsError;
use waypoint_models::InvalidModelError;

/// Errors surfaced by an attribution run.
#[derive(Debug, Error)]
pub enum AttributionError {
    /// Snapshot could not be built.
    #[error("Journey error: {0}")]
    Journey(#[from] JourneyError),

    /// Unknown model or malformed parameters.
    #[error(transparent)]
    InvalidModel(#[from] InvalidModelError),

    /// Result could not be rendered.
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),

    /// Request could not be parsed.
    #[error("Invalid request: {0}")]
    Request(#[from] serde_json::Error),
}

/// Result alias for attribution runs.
pub type Result<T> = std::result::Result<T, AttributionError>;
