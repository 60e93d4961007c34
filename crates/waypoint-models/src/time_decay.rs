//! Time-Decay Attribution
//!
//! Each exposure is weighted by how long before the conversion it happened:
//!
//! decay_i = 2^(-days_before_i / half_life)
//!
//! where `days_before_i = max(0, converted_at - timestamp_i)` in fractional
//! days and `converted_at` is the customer's earliest conversion. Weights are
//! divided by the customer's total decay so they sum to 1.0.

use crate::error::{InvalidModelError, Result};
use crate::params::ModelParams;
use crate::weight::{ChannelWeight, WeightCalculator};
use serde::{Deserialize, Serialize};
use waypoint_journey::Journey;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Configuration for the time-decay model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeDecayConfig {
    /// Half-life in days (default: 7)
    pub half_life: f64,
}

impl TimeDecayConfig {
    /// Validated configuration. The half-life must be finite and positive.
    pub fn new(half_life: f64) -> Result<Self> {
        if !half_life.is_finite() || half_life <= 0.0 {
            return Err(InvalidModelError::InvalidParameter {
                name: "half_life",
                value: half_life,
                reason: "must be a positive number of days",
            });
        }
        Ok(Self { half_life })
    }

    /// Apply parameter overrides on top of the defaults.
    pub fn from_params(params: &ModelParams) -> Result<Self> {
        Self::new(params.half_life.unwrap_or(Self::default().half_life))
    }
}

impl Default for TimeDecayConfig {
    fn default() -> Self {
        Self { half_life: 7.0 }
    }
}

/// Time-decay attribution model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeDecayModel {
    config: TimeDecayConfig,
}

impl TimeDecayModel {
    /// Create a model with the given configuration.
    pub const fn with_config(config: TimeDecayConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub const fn config(&self) -> &TimeDecayConfig {
        &self.config
    }
}

impl WeightCalculator for TimeDecayModel {
    fn name(&self) -> &str {
        "time_decay"
    }

    fn journey_weights(&self, journey: &Journey) -> Vec<ChannelWeight> {
        let Some(converted_at) = journey.converted_at() else {
            return Vec::new();
        };
        if journey.is_empty() {
            return Vec::new();
        }

        let days_before: Vec<f64> = journey
            .exposures()
            .iter()
            .map(|e| {
                let millis = (converted_at - e.timestamp).num_milliseconds() as f64;
                (millis / MILLIS_PER_DAY).max(0.0)
            })
            .collect();

        // Exponents are shifted by the smallest gap so the largest decay is
        // exactly 1.0; normalization cancels the shift.
        let nearest = days_before.iter().copied().fold(f64::INFINITY, f64::min);
        let decays: Vec<f64> = days_before
            .iter()
            .map(|d| 2f64.powf(-(d - nearest) / self.config.half_life))
            .collect();
        let total: f64 = decays.iter().sum();

        journey
            .exposures()
            .iter()
            .zip(decays)
            .map(|(e, decay)| ChannelWeight::new(journey.customer_id(), &e.channel, decay / total))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{DateTime, TimeZone, Utc};
    use waypoint_journey::{Conversion, CustomerId, Exposure};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, d, 0, 0, 0).unwrap()
    }

    fn journey(days: &[u32], converted: u32) -> Journey {
        let exposures = days
            .iter()
            .map(|d| Exposure {
                channel: format!("day{d}"),
                timestamp: day(*d),
                cost: 0.0,
            })
            .collect();
        let conversions = vec![Conversion {
            timestamp: day(converted),
            purchase_value: 50.0,
        }];
        Journey::new(CustomerId::new("C1"), exposures, conversions)
    }

    #[test]
    fn test_config_default() {
        assert_eq!(TimeDecayConfig::default().half_life, 7.0);
    }

    #[test]
    fn test_invalid_half_life() {
        assert!(TimeDecayConfig::new(0.0).is_err());
        assert!(TimeDecayConfig::new(-3.0).is_err());
        assert!(TimeDecayConfig::new(f64::INFINITY).is_err());
        assert!(TimeDecayConfig::from_params(&ModelParams::new().half_life(2.0)).is_ok());
    }

    #[test]
    fn test_one_half_life_halves_weight() {
        // Exposures 7 days and 0 days before conversion.
        let weights = TimeDecayModel::default().journey_weights(&journey(&[1, 8], 8));

        assert_relative_eq!(weights[0].weight, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(weights[1].weight, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_weights_normalized_and_increasing() {
        let weights = TimeDecayModel::default().journey_weights(&journey(&[1, 2, 3, 4], 5));

        let total: f64 = weights.iter().map(|w| w.weight).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
        for pair in weights.windows(2) {
            assert!(pair[1].weight > pair[0].weight);
        }
    }

    #[test]
    fn test_exposure_after_conversion_clamps_to_zero_days() {
        // Day 6 exposure follows the day 5 purchase; both it and the day 5
        // exposure sit at zero days and share the top weight.
        let weights = TimeDecayModel::default().journey_weights(&journey(&[5, 6], 5));
        assert_relative_eq!(weights[0].weight, 0.5);
        assert_relative_eq!(weights[1].weight, 0.5);
    }

    #[test]
    fn test_very_old_exposures_do_not_underflow() {
        let config = TimeDecayConfig::new(0.01).unwrap();
        let weights = TimeDecayModel::with_config(config).journey_weights(&journey(&[1, 2], 31));

        let total: f64 = weights.iter().map(|w| w.weight).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
        assert!(weights[1].weight > weights[0].weight);
    }

    #[test]
    fn test_non_converting_journey() {
        let journey = Journey::new(
            CustomerId::new("C1"),
            vec![Exposure {
                channel: "Ad".to_string(),
                timestamp: day(1),
                cost: 1.0,
            }],
            vec![],
        );
        assert!(TimeDecayModel::default().journey_weights(&journey).is_empty());
    }
}
