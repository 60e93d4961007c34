//! Per-customer journeys.
//!
//! A journey is every record for one customer, split into the ordered
//! marketing exposures and the conversion events that punctuate them.

use crate::touchpoint::CustomerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A marketing exposure (non-conversion touchpoint).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exposure {
    /// Channel the customer was exposed through.
    pub channel: String,

    /// When the exposure happened.
    pub timestamp: DateTime<Utc>,

    /// Spend attributed to the exposure.
    pub cost: f64,
}

/// A purchase event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    /// When the purchase happened.
    pub timestamp: DateTime<Utc>,

    /// Purchase value.
    pub purchase_value: f64,
}

/// All records for one customer.
///
/// Exposures are ordered ascending by timestamp. Records sharing a timestamp
/// keep the order in which they were supplied to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    customer_id: CustomerId,
    exposures: Vec<Exposure>,
    conversions: Vec<Conversion>,
}

impl Journey {
    /// Create a journey, ordering exposures and conversions by timestamp.
    ///
    /// The sort is stable, so ties keep their input order.
    pub fn new(
        customer_id: CustomerId,
        mut exposures: Vec<Exposure>,
        mut conversions: Vec<Conversion>,
    ) -> Self {
        exposures.sort_by_key(|e| e.timestamp);
        conversions.sort_by_key(|c| c.timestamp);
        Self {
            customer_id,
            exposures,
            conversions,
        }
    }

    /// Customer this journey belongs to.
    pub const fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Ordered marketing exposures.
    pub fn exposures(&self) -> &[Exposure] {
        &self.exposures
    }

    /// Ordered conversion events.
    pub fn conversions(&self) -> &[Conversion] {
        &self.conversions
    }

    /// Number of marketing exposures.
    pub fn len(&self) -> usize {
        self.exposures.len()
    }

    /// Whether the journey has no marketing exposures.
    pub fn is_empty(&self) -> bool {
        self.exposures.is_empty()
    }

    /// Whether the customer purchased at least once.
    pub fn is_converting(&self) -> bool {
        !self.conversions.is_empty()
    }

    /// Number of conversion records.
    pub fn conversion_count(&self) -> usize {
        self.conversions.len()
    }

    /// Conversion value of the journey.
    ///
    /// Repeat purchases collapse to the largest single purchase value; they
    /// are not summed. `None` when the customer never converted.
    pub fn conversion_value(&self) -> Option<f64> {
        self.conversions
            .iter()
            .map(|c| c.purchase_value)
            .reduce(f64::max)
    }

    /// Timestamp of the earliest conversion.
    pub fn converted_at(&self) -> Option<DateTime<Utc>> {
        self.conversions.first().map(|c| c.timestamp)
    }

    /// Distinct channels this customer was exposed to, in first-seen order.
    pub fn distinct_channels(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for exposure in &self.exposures {
            if !seen.contains(&exposure.channel.as_str()) {
                seen.push(&exposure.channel);
            }
        }
        seen
    }
}
