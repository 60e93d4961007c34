//! Linear attribution: every exposure of a converting customer gets `1/N`.

use crate::weight::{ChannelWeight, WeightCalculator};
use waypoint_journey::Journey;

/// Equal-split attribution model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearModel;

impl WeightCalculator for LinearModel {
    fn name(&self) -> &str {
        "linear"
    }

    fn journey_weights(&self, journey: &Journey) -> Vec<ChannelWeight> {
        if journey.is_empty() {
            return Vec::new();
        }

        let share = 1.0 / journey.len() as f64;
        journey
            .exposures()
            .iter()
            .map(|e| ChannelWeight::new(journey.customer_id(), &e.channel, share))
            .collect()
    }
}
