#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/waypoint/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod request;

// Re-export sub-crates
pub use waypoint_journey as journey;
pub use waypoint_metrics as metrics;
pub use waypoint_models as models;

pub use engine::AttributionEngine;
pub use error::{AttributionError, Result};
pub use request::AttributionRequest;

// Re-export the types most callers need
pub use waypoint_journey::{JourneyStore, Touchpoint};
pub use waypoint_metrics::{ChannelMetrics, ChannelMetricsTable, ModelComparison};
pub use waypoint_models::{InvalidModelError, ModelKind, ModelParams};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
