#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/waypoint/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod aggregator;
pub mod comparison;
pub mod error;
pub mod table;

pub use aggregator::MetricsAggregator;
pub use comparison::{ComparisonRow, ModelComparison};
pub use error::MetricsError;
pub use table::{ChannelMetrics, ChannelMetricsTable};
