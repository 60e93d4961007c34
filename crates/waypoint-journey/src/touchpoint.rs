//! Raw touchpoint records as supplied by the storage layer.

use chrono::{DateTime, Utc};
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Opaque customer identifier.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Create a new customer identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CustomerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single row of the touchpoint snapshot.
///
/// Marketing exposures carry a channel and a cost. Conversion records carry no
/// channel, zero cost and the purchase value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Touchpoint {
    /// Customer the record belongs to.
    pub customer_id: CustomerId,

    /// Marketing channel, `None` for conversion records.
    pub channel: Option<String>,

    /// When the event happened.
    pub timestamp: DateTime<Utc>,

    /// Spend attributed to this exposure.
    pub cost: f64,

    /// Whether this record is a purchase.
    pub is_conversion: bool,

    /// Purchase value, zero for exposures.
    pub purchase_value: f64,
}

impl Touchpoint {
    /// Create a marketing exposure record.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use waypoint_journey::Touchpoint;
    ///
    /// let ts = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    /// let tp = Touchpoint::exposure("C1", "Facebook Ad", ts, 10.0);
    ///
    /// assert!(!tp.is_conversion);
    /// assert_eq!(tp.channel.as_deref(), Some("Facebook Ad"));
    /// ```
    pub fn exposure(
        customer_id: impl Into<CustomerId>,
        channel: impl Into<String>,
        timestamp: DateTime<Utc>,
        cost: f64,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            channel: Some(channel.into()),
            timestamp,
            cost,
            is_conversion: false,
            purchase_value: 0.0,
        }
    }

    /// Create a conversion (purchase) record.
    pub fn conversion(
        customer_id: impl Into<CustomerId>,
        timestamp: DateTime<Utc>,
        purchase_value: f64,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            channel: None,
            timestamp,
            cost: 0.0,
            is_conversion: true,
            purchase_value,
        }
    }
}
