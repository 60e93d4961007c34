//! Closed set of attribution strategies, resolved once from a registry name.

use crate::error::Result;
use crate::linear::LinearModel;
use crate::params::ModelParams;
use crate::position::{PositionWeightedConfig, PositionWeightedModel};
use crate::registry::{ModelFamily, ModelKind};
use crate::single_touch::{SingleTouchModel, TouchPosition};
use crate::time_decay::{TimeDecayConfig, TimeDecayModel};
use crate::weight::{ChannelWeight, WeightCalculator};
use tracing::debug;
use waypoint_journey::Journey;

/// A configured attribution model.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributionModel {
    /// first / last / second_to_last / third_to_last
    SingleTouch(SingleTouchModel),
    /// u_shaped / w_shaped
    PositionWeighted(PositionWeightedModel),
    /// linear
    Linear(LinearModel),
    /// time_decay
    TimeDecay(TimeDecayModel),
}

impl AttributionModel {
    /// Build a model for a registry kind, applying parameter overrides.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidModelError::InvalidParameter`](crate::InvalidModelError::InvalidParameter)
    /// when an override is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use waypoint_models::{AttributionModel, ModelKind, ModelParams};
    ///
    /// let model = AttributionModel::new(ModelKind::TimeDecay, &ModelParams::new().half_life(3.0))
    ///     .unwrap();
    /// assert_eq!(model.kind(), ModelKind::TimeDecay);
    ///
    /// let bad = AttributionModel::new(ModelKind::UShaped, &ModelParams::new().first_weight(2.0));
    /// assert!(bad.is_err());
    /// ```
    pub fn new(kind: ModelKind, params: &ModelParams) -> Result<Self> {
        let model = match kind {
            ModelKind::First => Self::single_touch(kind, TouchPosition::FromStart(1)),
            ModelKind::Last => Self::single_touch(kind, TouchPosition::FromEnd(1)),
            ModelKind::SecondToLast => Self::single_touch(kind, TouchPosition::FromEnd(2)),
            ModelKind::ThirdToLast => Self::single_touch(kind, TouchPosition::FromEnd(3)),
            ModelKind::UShaped => Self::position_weighted(
                kind,
                PositionWeightedConfig::u_shaped().with_params(params)?,
            ),
            ModelKind::WShaped => Self::position_weighted(
                kind,
                PositionWeightedConfig::w_shaped().with_params(params)?,
            ),
            ModelKind::Linear => Self::Linear(LinearModel),
            ModelKind::TimeDecay => {
                Self::TimeDecay(TimeDecayModel::with_config(TimeDecayConfig::from_params(params)?))
            }
        };

        if kind.family() != ModelFamily::PositionWeighted && params.has_position_weights() {
            debug!(model = %kind, "Ignoring position weights");
        }
        if kind.family() != ModelFamily::TimeDecay && params.half_life.is_some() {
            debug!(model = %kind, "Ignoring half_life");
        }

        Ok(model)
    }

    const fn single_touch(kind: ModelKind, position: TouchPosition) -> Self {
        Self::SingleTouch(SingleTouchModel::new(kind, position))
    }

    const fn position_weighted(kind: ModelKind, config: PositionWeightedConfig) -> Self {
        Self::PositionWeighted(PositionWeightedModel::with_config(kind, config))
    }

    /// Build a model from its registry name.
    ///
    /// # Errors
    ///
    /// Unknown names and out-of-range parameters both fail with
    /// [`InvalidModelError`](crate::InvalidModelError).
    pub fn from_name(name: &str, params: &ModelParams) -> Result<Self> {
        Self::new(name.parse()?, params)
    }

    /// Registry kind of the model.
    pub const fn kind(&self) -> ModelKind {
        match self {
            Self::SingleTouch(m) => m.kind(),
            Self::PositionWeighted(m) => m.kind(),
            Self::Linear(_) => ModelKind::Linear,
            Self::TimeDecay(_) => ModelKind::TimeDecay,
        }
    }
}

impl WeightCalculator for AttributionModel {
    fn name(&self) -> &str {
        self.kind().name()
    }

    fn journey_weights(&self, journey: &Journey) -> Vec<ChannelWeight> {
        match self {
            Self::SingleTouch(m) => m.journey_weights(journey),
            Self::PositionWeighted(m) => m.journey_weights(journey),
            Self::Linear(m) => m.journey_weights(journey),
            Self::TimeDecay(m) => m.journey_weights(journey),
        }
    }
}
