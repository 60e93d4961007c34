//! Immutable, customer-partitioned view over a touchpoint snapshot.

use crate::journey::{Conversion, Exposure, Journey};
use crate::touchpoint::{CustomerId, Touchpoint};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Read-only snapshot of customer journeys.
///
/// Journeys are keyed by customer in ascending identifier order, which makes
/// every downstream computation deterministic for a given snapshot.
#[derive(Debug, Clone, Default)]
pub struct JourneyStore {
    journeys: BTreeMap<CustomerId, Journey>,
    record_count: usize,
    total_conversion_value: f64,
}

impl JourneyStore {
    /// Build a store from raw touchpoint records.
    ///
    /// Records are grouped by customer in input order, then each journey is
    /// stably sorted by timestamp. Non-conversion records without a channel
    /// cannot be credited and are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use waypoint_journey::{JourneyStore, Touchpoint};
    ///
    /// let d1 = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    /// let d2 = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap();
    ///
    /// let store = JourneyStore::from_touchpoints(vec![
    ///     Touchpoint::exposure("C1", "Instagram Ad", d1, 15.0),
    ///     Touchpoint::conversion("C1", d2, 125.0),
    /// ]);
    ///
    /// assert_eq!(store.customer_count(), 1);
    /// assert_eq!(store.converting_customer_count(), 1);
    /// assert_eq!(store.total_conversion_value(), 125.0);
    /// ```
    pub fn from_touchpoints(touchpoints: impl IntoIterator<Item = Touchpoint>) -> Self {
        let mut grouped: BTreeMap<CustomerId, (Vec<Exposure>, Vec<Conversion>)> = BTreeMap::new();
        let mut record_count = 0;
        let mut total_conversion_value = 0.0;

        for tp in touchpoints {
            record_count += 1;
            let entry = grouped.entry(tp.customer_id).or_default();

            if tp.is_conversion {
                total_conversion_value += tp.purchase_value;
                entry.1.push(Conversion {
                    timestamp: tp.timestamp,
                    purchase_value: tp.purchase_value,
                });
                continue;
            }

            match tp.channel {
                Some(channel) => entry.0.push(Exposure {
                    channel,
                    timestamp: tp.timestamp,
                    cost: tp.cost,
                }),
                None => warn!(row = record_count - 1, "Skipping exposure without a channel"),
            }
        }

        let journeys: BTreeMap<_, _> = grouped
            .into_iter()
            .map(|(customer_id, (exposures, conversions))| {
                let journey = Journey::new(customer_id.clone(), exposures, conversions);
                (customer_id, journey)
            })
            .collect();

        debug!(
            records = record_count,
            customers = journeys.len(),
            "Built journey snapshot"
        );

        Self {
            journeys,
            record_count,
            total_conversion_value,
        }
    }

    /// All journeys keyed by customer.
    pub const fn get_journeys(&self) -> &BTreeMap<CustomerId, Journey> {
        &self.journeys
    }

    /// Iterate journeys in customer order.
    pub fn journeys(&self) -> impl Iterator<Item = &Journey> {
        self.journeys.values()
    }

    /// Iterate journeys of customers with at least one conversion.
    pub fn converting_journeys(&self) -> impl Iterator<Item = &Journey> {
        self.journeys.values().filter(|j| j.is_converting())
    }

    /// Look up a single customer's journey.
    pub fn journey(&self, customer_id: &CustomerId) -> Option<&Journey> {
        self.journeys.get(customer_id)
    }

    /// Number of records in the snapshot, including skipped ones.
    pub const fn record_count(&self) -> usize {
        self.record_count
    }

    /// Number of distinct customers.
    pub fn customer_count(&self) -> usize {
        self.journeys.len()
    }

    /// Number of customers with at least one conversion.
    pub fn converting_customer_count(&self) -> usize {
        self.converting_journeys().count()
    }

    /// Sum of purchase values over every conversion record.
    ///
    /// Unlike [`Journey::conversion_value`] this counts repeat purchases, and
    /// it is the total that attributed revenue is rescaled to.
    pub const fn total_conversion_value(&self) -> f64 {
        self.total_conversion_value
    }

    /// Distinct channels seen in any exposure, sorted by name.
    pub fn channels(&self) -> BTreeSet<&str> {
        self.journeys
            .values()
            .flat_map(|j| j.exposures().iter().map(|e| e.channel.as_str()))
            .collect()
    }

    /// Whether the snapshot holds no customers.
    pub fn is_empty(&self) -> bool {
        self.journeys.is_empty()
    }
}

impl FromIterator<Touchpoint> for JourneyStore {
    fn from_iter<I: IntoIterator<Item = Touchpoint>>(iter: I) -> Self {
        Self::from_touchpoints(iter)
    }
}
