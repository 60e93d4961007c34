//! Model parameters.
//!
//! One immutable value per computation. Fields left unset fall back to the
//! defaults of the selected model; fields the model does not read are
//! ignored.

use serde::{Deserialize, Serialize};

/// Optional model parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Weight of the first exposure (position-weighted models).
    pub first_weight: Option<f64>,

    /// Weight of the last exposure (position-weighted models).
    pub last_weight: Option<f64>,

    /// Total weight shared by the interior exposures (position-weighted models).
    pub middle_weight: Option<f64>,

    /// Half-life in days (time-decay model).
    pub half_life: Option<f64>,
}

impl ModelParams {
    /// Parameters with every field unset.
    pub const fn new() -> Self {
        Self {
            first_weight: None,
            last_weight: None,
            middle_weight: None,
            half_life: None,
        }
    }

    /// Set the first-exposure weight.
    pub const fn first_weight(mut self, weight: f64) -> Self {
        self.first_weight = Some(weight);
        self
    }

    /// Set the last-exposure weight.
    pub const fn last_weight(mut self, weight: f64) -> Self {
        self.last_weight = Some(weight);
        self
    }

    /// Set the interior weight total.
    pub const fn middle_weight(mut self, weight: f64) -> Self {
        self.middle_weight = Some(weight);
        self
    }

    /// Set the time-decay half-life in days.
    pub const fn half_life(mut self, days: f64) -> Self {
        self.half_life = Some(days);
        self
    }

    pub(crate) const fn has_position_weights(&self) -> bool {
        self.first_weight.is_some() || self.last_weight.is_some() || self.middle_weight.is_some()
    }
}
