//! Model Registry
//!
//! Closed set of attribution models that can be selected by name. Name
//! lookup happens once, at the engine boundary; the weighting code only
//! ever sees a [`ModelKind`].

use crate::error::InvalidModelError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Model families, one computation strategy each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    /// Full credit to one position in the journey
    SingleTouch,
    /// Fixed first/last weights with an evenly split middle
    PositionWeighted,
    /// Equal credit to every exposure
    Linear,
    /// Exponentially more credit closer to the conversion
    TimeDecay,
}

/// Every selectable attribution model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// First exposure.
    First,
    /// Last exposure.
    Last,
    /// Second exposure counted from the end.
    SecondToLast,
    /// Third exposure counted from the end.
    ThirdToLast,
    /// Position-weighted, 0.4 / 0.4 / 0.2 by default.
    UShaped,
    /// Position-weighted, 0.3 / 0.3 / 0.4 by default.
    WShaped,
    /// Equal split.
    Linear,
    /// Half-life decay, 7 days by default.
    TimeDecay,
}

impl ModelKind {
    /// Returns all models in registry order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::First,
            Self::Last,
            Self::SecondToLast,
            Self::ThirdToLast,
            Self::UShaped,
            Self::WShaped,
            Self::Linear,
            Self::TimeDecay,
        ]
    }

    /// Registry name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
            Self::SecondToLast => "second_to_last",
            Self::ThirdToLast => "third_to_last",
            Self::UShaped => "u_shaped",
            Self::WShaped => "w_shaped",
            Self::Linear => "linear",
            Self::TimeDecay => "time_decay",
        }
    }

    /// Family the model belongs to.
    pub const fn family(&self) -> ModelFamily {
        match self {
            Self::First | Self::Last | Self::SecondToLast | Self::ThirdToLast => {
                ModelFamily::SingleTouch
            }
            Self::UShaped | Self::WShaped => ModelFamily::PositionWeighted,
            Self::Linear => ModelFamily::Linear,
            Self::TimeDecay => ModelFamily::TimeDecay,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = InvalidModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| InvalidModelError::unknown(s))
    }
}

/// Model metadata
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Model name (unique identifier)
    pub name: &'static str,
    /// Model kind
    pub kind: ModelKind,
    /// Model family
    pub family: ModelFamily,
    /// What the model rewards
    pub description: &'static str,
    /// Parameters the model reads from `ModelParams`
    pub parameters: &'static [&'static str],
}

/// Get all available model info
pub fn available_models() -> Vec<ModelInfo> {
    const POSITION_PARAMS: &[&str] = &["first_weight", "last_weight", "middle_weight"];

    vec![
        ModelInfo {
            name: "first",
            kind: ModelKind::First,
            family: ModelFamily::SingleTouch,
            description: "Full credit to the first exposure",
            parameters: &[],
        },
        ModelInfo {
            name: "last",
            kind: ModelKind::Last,
            family: ModelFamily::SingleTouch,
            description: "Full credit to the last exposure before purchase",
            parameters: &[],
        },
        ModelInfo {
            name: "second_to_last",
            kind: ModelKind::SecondToLast,
            family: ModelFamily::SingleTouch,
            description: "Full credit to the second exposure from the end",
            parameters: &[],
        },
        ModelInfo {
            name: "third_to_last",
            kind: ModelKind::ThirdToLast,
            family: ModelFamily::SingleTouch,
            description: "Full credit to the third exposure from the end",
            parameters: &[],
        },
        ModelInfo {
            name: "u_shaped",
            kind: ModelKind::UShaped,
            family: ModelFamily::PositionWeighted,
            description: "Emphasises the first and last exposures (0.4 / 0.4 / 0.2)",
            parameters: POSITION_PARAMS,
        },
        ModelInfo {
            name: "w_shaped",
            kind: ModelKind::WShaped,
            family: ModelFamily::PositionWeighted,
            description: "Heavier middle of the journey (0.3 / 0.3 / 0.4)",
            parameters: POSITION_PARAMS,
        },
        ModelInfo {
            name: "linear",
            kind: ModelKind::Linear,
            family: ModelFamily::Linear,
            description: "Equal credit to every exposure",
            parameters: &[],
        },
        ModelInfo {
            name: "time_decay",
            kind: ModelKind::TimeDecay,
            family: ModelFamily::TimeDecay,
            description: "Credit halves for every half-life before the conversion",
            parameters: &["half_life"],
        },
    ]
}

/// Get models by family
pub fn models_by_family(family: ModelFamily) -> Vec<ModelInfo> {
    available_models()
        .into_iter()
        .filter(|m| m.family == family)
        .collect()
}

/// Get model info by name
pub fn get_model_info(name: &str) -> Option<ModelInfo> {
    available_models().into_iter().find(|m| m.name == name)
}

/// Get a map of all models indexed by name
pub fn model_map() -> HashMap<&'static str, ModelInfo> {
    available_models()
        .into_iter()
        .map(|m| (m.name, m))
        .collect()
}

/// List all model names
pub fn list_model_names() -> Vec<&'static str> {
    ModelKind::all().iter().map(|k| k.name()).collect()
}
