//! Polars snapshot adapter.
//!
//! The storage layer hands over touchpoints as a `DataFrame`. This module
//! turns such a frame into typed [`Touchpoint`] records and a
//! [`JourneyStore`].

use crate::error::{JourneyError, Result};
use crate::store::JourneyStore;
use crate::touchpoint::{CustomerId, Touchpoint};
use chrono::DateTime;
use polars::prelude::*;

/// Column names expected in a touchpoint frame.
pub mod columns {
    /// Customer identifier (any type castable to string).
    pub const CUSTOMER_ID: &str = "customer_id";
    /// Channel name, null for conversion rows.
    pub const CHANNEL: &str = "channel";
    /// Event time (Datetime or Date).
    pub const TIMESTAMP: &str = "timestamp";
    /// Exposure cost.
    pub const COST: &str = "cost";
    /// Conversion flag.
    pub const IS_CONVERSION: &str = "is_conversion";
    /// Purchase value.
    pub const PURCHASE_VALUE: &str = "purchase_value";
}

/// Extract touchpoint records from a frame.
///
/// `customer_id`, `timestamp` and `is_conversion` are required per row. Null
/// `cost` or `purchase_value` read as zero and a null `channel` marks a
/// conversion row.
pub fn touchpoints_from_dataframe(df: &DataFrame) -> Result<Vec<Touchpoint>> {
    let customers = df.column(columns::CUSTOMER_ID)?.cast(&DataType::String)?;
    let customers = customers.str()?;
    let channels = df.column(columns::CHANNEL)?.cast(&DataType::String)?;
    let channels = channels.str()?;
    let timestamps = df
        .column(columns::TIMESTAMP)?
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        .cast(&DataType::Int64)?;
    let timestamps = timestamps.i64()?;
    let costs = df.column(columns::COST)?.cast(&DataType::Float64)?;
    let costs = costs.f64()?;
    let flags = df.column(columns::IS_CONVERSION)?.cast(&DataType::Boolean)?;
    let flags = flags.bool()?;
    let values = df
        .column(columns::PURCHASE_VALUE)?
        .cast(&DataType::Float64)?;
    let values = values.f64()?;

    let mut touchpoints = Vec::with_capacity(df.height());

    for row in 0..df.height() {
        let customer_id = customers.get(row).ok_or(JourneyError::MissingValue {
            column: columns::CUSTOMER_ID,
            row,
        })?;
        let millis = timestamps.get(row).ok_or(JourneyError::MissingValue {
            column: columns::TIMESTAMP,
            row,
        })?;
        let timestamp = DateTime::from_timestamp_millis(millis)
            .ok_or(JourneyError::InvalidTimestamp { row, value: millis })?;
        let is_conversion = flags.get(row).ok_or(JourneyError::MissingValue {
            column: columns::IS_CONVERSION,
            row,
        })?;

        touchpoints.push(Touchpoint {
            customer_id: CustomerId::new(customer_id),
            channel: channels.get(row).map(str::to_string),
            timestamp,
            cost: costs.get(row).unwrap_or(0.0),
            is_conversion,
            purchase_value: values.get(row).unwrap_or(0.0),
        });
    }

    Ok(touchpoints)
}

impl JourneyStore {
    /// Build a store from a touchpoint frame.
    ///
    /// See [`columns`] for the expected schema.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        Ok(Self::from_touchpoints(touchpoints_from_dataframe(df)?))
    }
}
