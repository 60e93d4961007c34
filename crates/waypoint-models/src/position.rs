//! Position-weighted attribution (U-shaped / W-shaped)
//!
//! The first exposure receives `first_weight`, the last receives
//! `last_weight` and the `N - 2` interior exposures split `middle_weight`
//! evenly.
//!
//! Positions are matched first-to-last: in a single-exposure journey the only
//! exposure is "first" and receives `first_weight` alone, so that customer
//! contributes less than 1.0 to the global weight pool. Two-exposure journeys
//! have no interior and contribute `first_weight + last_weight`.

use crate::error::{InvalidModelError, Result};
use crate::params::ModelParams;
use crate::registry::ModelKind;
use crate::weight::{ChannelWeight, WeightCalculator};
use serde::{Deserialize, Serialize};
use waypoint_journey::Journey;

/// Configuration for position-weighted models
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionWeightedConfig {
    /// Weight of the first exposure
    pub first_weight: f64,
    /// Weight of the last exposure
    pub last_weight: f64,
    /// Total weight split across interior exposures
    pub middle_weight: f64,
}

impl PositionWeightedConfig {
    /// Validated configuration. Every weight must be finite and within [0, 1].
    pub fn new(first_weight: f64, last_weight: f64, middle_weight: f64) -> Result<Self> {
        check_weight("first_weight", first_weight)?;
        check_weight("last_weight", last_weight)?;
        check_weight("middle_weight", middle_weight)?;
        Ok(Self {
            first_weight,
            last_weight,
            middle_weight,
        })
    }

    /// U-shaped defaults: 0.4 / 0.4 / 0.2.
    pub const fn u_shaped() -> Self {
        Self {
            first_weight: 0.4,
            last_weight: 0.4,
            middle_weight: 0.2,
        }
    }

    /// W-shaped defaults: 0.3 / 0.3 / 0.4.
    pub const fn w_shaped() -> Self {
        Self {
            first_weight: 0.3,
            last_weight: 0.3,
            middle_weight: 0.4,
        }
    }

    /// Apply parameter overrides on top of this configuration.
    pub fn with_params(self, params: &ModelParams) -> Result<Self> {
        Self::new(
            params.first_weight.unwrap_or(self.first_weight),
            params.last_weight.unwrap_or(self.last_weight),
            params.middle_weight.unwrap_or(self.middle_weight),
        )
    }

    /// Weight for the exposure at 1-indexed `position` of `total`.
    pub fn weight_at(&self, position: usize, total: usize) -> f64 {
        if position == 1 {
            self.first_weight
        } else if position == total {
            self.last_weight
        } else if total > 2 {
            self.middle_weight / (total - 2) as f64
        } else {
            0.0
        }
    }
}

impl Default for PositionWeightedConfig {
    fn default() -> Self {
        Self::u_shaped()
    }
}

fn check_weight(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(InvalidModelError::InvalidParameter {
            name,
            value,
            reason: "must be within [0, 1]",
        });
    }
    Ok(())
}

/// Position-weighted attribution model
#[derive(Debug, Clone, PartialEq)]
pub struct PositionWeightedModel {
    kind: ModelKind,
    config: PositionWeightedConfig,
}

impl PositionWeightedModel {
    /// Build a position-weighted model with explicit weights.
    pub const fn with_config(kind: ModelKind, config: PositionWeightedConfig) -> Self {
        Self { kind, config }
    }

    /// U-shaped model with default weights.
    pub const fn u_shaped() -> Self {
        Self::with_config(ModelKind::UShaped, PositionWeightedConfig::u_shaped())
    }

    /// W-shaped model with default weights.
    pub const fn w_shaped() -> Self {
        Self::with_config(ModelKind::WShaped, PositionWeightedConfig::w_shaped())
    }

    /// Active configuration.
    pub const fn config(&self) -> &PositionWeightedConfig {
        &self.config
    }

    /// Registry kind of this model.
    pub const fn kind(&self) -> ModelKind {
        self.kind
    }
}

impl WeightCalculator for PositionWeightedModel {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn journey_weights(&self, journey: &Journey) -> Vec<ChannelWeight> {
        let total = journey.len();
        journey
            .exposures()
            .iter()
            .enumerate()
            .map(|(i, exposure)| {
                ChannelWeight::new(
                    journey.customer_id(),
                    &exposure.channel,
                    self.config.weight_at(i + 1, total),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};
    use waypoint_journey::{CustomerId, Exposure};

    fn journey(n: usize) -> Journey {
        let exposures = (0..n)
            .map(|i| Exposure {
                channel: format!("ch{i}"),
                timestamp: Utc.with_ymd_and_hms(2023, 1, 1 + i as u32, 0, 0, 0).unwrap(),
                cost: 0.0,
            })
            .collect();
        Journey::new(CustomerId::new("C1"), exposures, vec![])
    }

    fn weights(model: &PositionWeightedModel, n: usize) -> Vec<f64> {
        model
            .journey_weights(&journey(n))
            .into_iter()
            .map(|w| w.weight)
            .collect()
    }

    #[test]
    fn test_u_shaped_four_touch() {
        let w = weights(&PositionWeightedModel::u_shaped(), 4);
        assert_eq!(w.len(), 4);
        assert_relative_eq!(w[0], 0.4);
        assert_relative_eq!(w[1], 0.1);
        assert_relative_eq!(w[2], 0.1);
        assert_relative_eq!(w[3], 0.4);
        assert_relative_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_w_shaped_three_touch() {
        let w = weights(&PositionWeightedModel::w_shaped(), 3);
        assert_relative_eq!(w[0], 0.3);
        assert_relative_eq!(w[1], 0.4);
        assert_relative_eq!(w[2], 0.3);
    }

    #[test]
    fn test_two_touch_has_no_middle() {
        let w = weights(&PositionWeightedModel::u_shaped(), 2);
        assert_eq!(w, vec![0.4, 0.4]);
    }

    #[test]
    fn test_single_touch_is_first_only() {
        // Only first_weight is granted, not first_weight + last_weight.
        let w = weights(&PositionWeightedModel::u_shaped(), 1);
        assert_eq!(w, vec![0.4]);
    }

    #[test]
    fn test_config_validation() {
        assert!(PositionWeightedConfig::new(0.5, 0.5, 0.0).is_ok());
        assert!(PositionWeightedConfig::new(-0.1, 0.5, 0.0).is_err());
        assert!(PositionWeightedConfig::new(0.5, 1.5, 0.0).is_err());
        assert!(PositionWeightedConfig::new(0.5, 0.5, f64::NAN).is_err());
    }

    #[test]
    fn test_with_params_overrides() {
        let params = ModelParams::new().middle_weight(0.6);
        let config = PositionWeightedConfig::u_shaped()
            .with_params(&params)
            .unwrap();

        assert_eq!(config.first_weight, 0.4);
        assert_eq!(config.last_weight, 0.4);
        assert_eq!(config.middle_weight, 0.6);
    }
}
