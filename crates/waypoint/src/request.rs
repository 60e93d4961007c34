//! Declarative run description.

use crate::engine::AttributionEngine;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use waypoint_metrics::ChannelMetricsTable;
use waypoint_models::ModelParams;

/// A model name plus its parameter overrides.
///
/// Parameters sit next to the model name in JSON:
///
/// ```
/// use waypoint::AttributionRequest;
///
/// let request = AttributionRequest::from_json(
///     r#"{ "model": "time_decay", "half_life": 3.5 }"#,
/// ).unwrap();
///
/// assert_eq!(request.model, "time_decay");
/// assert_eq!(request.params.half_life, Some(3.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionRequest {
    /// Registry name of the model.
    pub model: String,

    /// Parameter overrides.
    #[serde(flatten)]
    pub params: ModelParams,
}

impl AttributionRequest {
    /// Request for `model` with default parameters.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            params: ModelParams::default(),
        }
    }

    /// Replace the parameter overrides.
    pub const fn with_params(mut self, params: ModelParams) -> Self {
        self.params = params;
        self
    }

    /// Parse a request from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AttributionError::Request`](crate::AttributionError::Request)
    /// when the document is malformed or lacks a model name.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Run the request against an engine.
    ///
    /// # Errors
    ///
    /// Fails like [`AttributionEngine::calculate_channel_metrics`].
    pub fn execute(&self, engine: &AttributionEngine) -> Result<ChannelMetricsTable> {
        engine.calculate_channel_metrics(&self.model, &self.params)
    }
}
