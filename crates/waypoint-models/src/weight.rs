//! Credit weights and the calculator trait shared by every model.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;
use waypoint_journey::{CustomerId, Journey, JourneyStore};

/// Credit assigned to one exposure of a converting customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelWeight {
    /// Converting customer.
    pub customer_id: CustomerId,

    /// Channel of the credited exposure.
    pub channel: String,

    /// Credit in [0, 1].
    pub weight: f64,
}

impl ChannelWeight {
    /// Create a weight row.
    pub fn new(customer_id: &CustomerId, channel: &str, weight: f64) -> Self {
        Self {
            customer_id: customer_id.clone(),
            channel: channel.to_string(),
            weight,
        }
    }
}

/// Trait for attribution weight calculators
pub trait WeightCalculator: Send + Sync {
    /// Model name used in logs and result tables.
    fn name(&self) -> &str;

    /// Weights for one converting journey, one row per credited exposure.
    ///
    /// Returns an empty vector when the model gives the journey no credit.
    fn journey_weights(&self, journey: &Journey) -> Vec<ChannelWeight>;

    /// Weights for every converting customer in the snapshot.
    ///
    /// Journeys are processed in parallel; rows come back in customer order,
    /// then exposure order, regardless of scheduling.
    fn calculate(&self, store: &JourneyStore) -> Vec<ChannelWeight> {
        let journeys: Vec<&Journey> = store.converting_journeys().collect();

        let weights: Vec<ChannelWeight> = journeys
            .par_iter()
            .flat_map_iter(|journey| self.journey_weights(journey))
            .collect();

        debug!(
            model = self.name(),
            converting_customers = journeys.len(),
            weight_rows = weights.len(),
            "Calculated attribution weights"
        );

        weights
    }
}
