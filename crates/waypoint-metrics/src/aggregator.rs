//! Roll per-customer weights up into per-channel metrics.
//!
//! The aggregator makes one pass over the snapshot for reach, spend and
//! conversion facts, then one pass over the weight rows for credit and
//! revenue. Both passes accumulate into the same per-channel entries.

use crate::table::{ChannelMetrics, ChannelMetricsTable};
use std::collections::BTreeMap;
use tracing::{debug, warn};
use waypoint_journey::JourneyStore;
use waypoint_models::ChannelWeight;

#[derive(Debug, Default)]
struct ChannelAccumulator {
    appearances: u64,
    converting_customers: u64,
    cost: f64,
    weight: f64,
    raw_revenue: f64,
}

/// Joins attribution weights with a journey snapshot.
#[derive(Debug, Clone, Copy)]
pub struct MetricsAggregator<'a> {
    store: &'a JourneyStore,
}

impl<'a> MetricsAggregator<'a> {
    /// Create an aggregator over `store`.
    pub const fn new(store: &'a JourneyStore) -> Self {
        Self { store }
    }

    /// Build the channel table for `model` from its weight rows.
    ///
    /// Every channel seen in an exposure gets a row, including channels
    /// only non-converting customers touched.
    pub fn aggregate(&self, model: &str, weights: &[ChannelWeight]) -> ChannelMetricsTable {
        let mut channels: BTreeMap<&str, ChannelAccumulator> = BTreeMap::new();

        for journey in self.store.journeys() {
            for exposure in journey.exposures() {
                channels.entry(exposure.channel.as_str()).or_default().cost += exposure.cost;
            }

            let converting = journey.is_converting();
            for channel in journey.distinct_channels() {
                let acc = channels.entry(channel).or_default();
                acc.appearances += 1;
                if converting {
                    acc.converting_customers += 1;
                }
            }
        }

        let mut total_weight = 0.0;
        let mut raw_revenue_total = 0.0;
        let mut skipped = 0usize;

        for row in weights {
            let Some(acc) = channels.get_mut(row.channel.as_str()) else {
                skipped += 1;
                continue;
            };

            let value = self
                .store
                .journey(&row.customer_id)
                .and_then(|j| j.conversion_value())
                .unwrap_or(0.0);
            let revenue = row.weight * value;

            acc.weight += row.weight;
            acc.raw_revenue += revenue;
            total_weight += row.weight;
            raw_revenue_total += revenue;
        }

        if skipped > 0 {
            warn!(
                model,
                skipped, "Ignored weight rows for channels missing from the snapshot"
            );
        }

        let revenue_scale = if raw_revenue_total > 0.0 {
            self.store.total_conversion_value() / raw_revenue_total
        } else {
            0.0
        };

        let rows: Vec<ChannelMetrics> = channels
            .into_iter()
            .map(|(channel, acc)| {
                let attribution_percentage = if total_weight > 0.0 {
                    acc.weight / total_weight
                } else {
                    0.0
                };
                let success_rate = if acc.appearances > 0 {
                    acc.converting_customers as f64 / acc.appearances as f64
                } else {
                    0.0
                };
                let attributed_revenue = acc.raw_revenue * revenue_scale;
                let roi = if acc.cost > 0.0 {
                    (attributed_revenue - acc.cost) / acc.cost
                } else {
                    0.0
                };

                ChannelMetrics {
                    channel: channel.to_string(),
                    attribution_percentage,
                    attributed_conversions: acc.weight,
                    total_appearances: acc.appearances,
                    success_rate,
                    total_cost: acc.cost,
                    attributed_revenue,
                    roi,
                }
            })
            .collect();

        debug!(
            model,
            channels = rows.len(),
            total_weight,
            revenue_scale,
            "Aggregated channel metrics"
        );

        ChannelMetricsTable::new(
            model,
            rows,
            self.store.converting_customer_count(),
            self.store.customer_count(),
        )
    }
}
