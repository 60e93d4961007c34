#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/waypoint/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod linear;
pub mod model;
pub mod params;
pub mod position;
pub mod registry;
pub mod single_touch;
pub mod time_decay;
pub mod weight;

pub use error::{InvalidModelError, Result};
pub use linear::LinearModel;
pub use model::AttributionModel;
pub use params::ModelParams;
pub use position::{PositionWeightedConfig, PositionWeightedModel};
pub use registry::{
    ModelFamily, ModelInfo, ModelKind, available_models, get_model_info, list_model_names,
    models_by_family,
};
pub use single_touch::{SingleTouchModel, TouchPosition};
pub use time_decay::{TimeDecayConfig, TimeDecayModel};
pub use weight::{ChannelWeight, WeightCalculator};
