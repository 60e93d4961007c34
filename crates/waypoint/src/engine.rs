//! Attribution engine.
//!
//! Wires a journey snapshot to the model registry and the metrics
//! aggregator. The engine owns the snapshot and is read-only after
//! construction, so one engine can serve any number of runs.

use crate::error::Result;
use polars::prelude::DataFrame;
use rayon::prelude::*;
use tracing::info;
use waypoint_journey::JourneyStore;
use waypoint_metrics::{ChannelMetricsTable, MetricsAggregator, ModelComparison};
use waypoint_models::{AttributionModel, ModelParams, WeightCalculator};

/// Computes channel metrics for a snapshot under any registered model.
#[derive(Debug, Clone)]
pub struct AttributionEngine {
    store: JourneyStore,
}

impl AttributionEngine {
    /// Create an engine over a journey snapshot.
    pub const fn new(store: JourneyStore) -> Self {
        Self { store }
    }

    /// Create an engine from a tabular touchpoint snapshot.
    ///
    /// # Errors
    ///
    /// Fails when a required column is missing or holds nulls.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        Ok(Self::new(JourneyStore::from_dataframe(df)?))
    }

    /// Underlying snapshot.
    pub const fn store(&self) -> &JourneyStore {
        &self.store
    }

    /// Channel metrics for the model registered under `model_name`.
    ///
    /// # Errors
    ///
    /// Returns [`AttributionError::InvalidModel`](crate::AttributionError::InvalidModel)
    /// for unknown names or out-of-range parameters. Nothing is computed
    /// in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use waypoint::{AttributionEngine, JourneyStore, ModelParams, Touchpoint};
    ///
    /// let day = |d| Utc.with_ymd_and_hms(2023, 1, d, 0, 0, 0).unwrap();
    /// let store = JourneyStore::from_touchpoints(vec![
    ///     Touchpoint::exposure("C1", "Google Search", day(1), 5.0),
    ///     Touchpoint::exposure("C1", "Website Visit", day(2), 0.0),
    ///     Touchpoint::conversion("C1", day(3), 100.0),
    /// ]);
    ///
    /// let engine = AttributionEngine::new(store);
    /// let table = engine
    ///     .calculate_channel_metrics("linear", &ModelParams::default())
    ///     .unwrap();
    /// assert_eq!(table.get("Google Search").unwrap().attribution_percentage, 0.5);
    ///
    /// assert!(engine.calculate_channel_metrics("markov", &ModelParams::default()).is_err());
    /// ```
    pub fn calculate_channel_metrics(
        &self,
        model_name: &str,
        params: &ModelParams,
    ) -> Result<ChannelMetricsTable> {
        let model = AttributionModel::from_name(model_name, params)?;
        Ok(self.run(&model))
    }

    /// Channel metrics for an already configured model.
    pub fn run(&self, model: &AttributionModel) -> ChannelMetricsTable {
        let weights = model.calculate(&self.store);
        let table = MetricsAggregator::new(&self.store).aggregate(model.name(), &weights);

        info!(
            model = model.name(),
            customers = self.store.customer_count(),
            converting_customers = self.store.converting_customer_count(),
            channels = table.len(),
            "Attribution complete"
        );

        table
    }

    /// Run several models on the snapshot and merge the results.
    ///
    /// Every name is resolved before any model runs; the first invalid
    /// name or parameter aborts the comparison.
    ///
    /// # Errors
    ///
    /// Returns [`AttributionError::InvalidModel`](crate::AttributionError::InvalidModel)
    /// as [`calculate_channel_metrics`](Self::calculate_channel_metrics) does.
    pub fn compare(&self, model_names: &[&str], params: &ModelParams) -> Result<ModelComparison> {
        let models = model_names
            .iter()
            .map(|name| AttributionModel::from_name(name, params))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let tables: Vec<ChannelMetricsTable> = models.par_iter().map(|m| self.run(m)).collect();

        Ok(ModelComparison::new(&tables))
    }
}

impl From<JourneyStore> for AttributionEngine {
    fn from(store: JourneyStore) -> Self {
        Self::new(store)
    }
}
