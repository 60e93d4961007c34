//! Side-by-side view of several attribution runs.

use crate::error::MetricsError;
use crate::table::ChannelMetricsTable;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One channel across every compared model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Channel name.
    pub channel: String,

    /// Total spend on the channel (identical under every model).
    pub total_cost: f64,

    /// Attribution percentage per model, in model order.
    pub attribution: Vec<f64>,

    /// ROI per model, in model order.
    pub roi: Vec<f64>,
}

/// Attribution percentages and ROI of several models, keyed by channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    models: Vec<String>,
    rows: Vec<ComparisonRow>,
}

impl ModelComparison {
    /// Merge tables produced over the same snapshot.
    ///
    /// A channel missing from one table reports 0 for that model. Rows are
    /// ordered by the first model's attribution, highest first.
    pub fn new(tables: &[ChannelMetricsTable]) -> Self {
        let models: Vec<String> = tables.iter().map(|t| t.model.clone()).collect();
        let mut by_channel: BTreeMap<&str, ComparisonRow> = BTreeMap::new();

        for (i, table) in tables.iter().enumerate() {
            for metrics in table.rows() {
                let row = by_channel
                    .entry(metrics.channel.as_str())
                    .or_insert_with(|| ComparisonRow {
                        channel: metrics.channel.clone(),
                        total_cost: metrics.total_cost,
                        attribution: vec![0.0; tables.len()],
                        roi: vec![0.0; tables.len()],
                    });
                row.attribution[i] = metrics.attribution_percentage;
                row.roi[i] = metrics.roi;
            }
        }

        let mut rows: Vec<ComparisonRow> = by_channel.into_values().collect();
        rows.sort_by(|a, b| {
            let lead = |r: &ComparisonRow| r.attribution.first().copied().unwrap_or(0.0);
            lead(b)
                .total_cmp(&lead(a))
                .then_with(|| a.channel.cmp(&b.channel))
        });

        Self { models, rows }
    }

    /// Compared model names, in column order.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Channel rows.
    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    /// Row for a single channel.
    pub fn get(&self, channel: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.channel == channel)
    }

    /// Attribution percentage of `channel` under `model`.
    pub fn attribution(&self, channel: &str, model: &str) -> Option<f64> {
        let i = self.models.iter().position(|m| m == model)?;
        self.get(channel).map(|r| r.attribution[i])
    }

    /// Convert to a polars `DataFrame`.
    ///
    /// Columns are `channel`, `total_cost`, then `{model}_attribution_pct`
    /// and `{model}_roi` for each model.
    pub fn to_dataframe(&self) -> Result<DataFrame, MetricsError> {
        let channels: Vec<&str> = self.rows.iter().map(|r| r.channel.as_str()).collect();
        let cost: Vec<f64> = self.rows.iter().map(|r| r.total_cost).collect();

        let mut columns = vec![
            Column::new("channel".into(), channels),
            Column::new("total_cost".into(), cost),
        ];

        for (i, model) in self.models.iter().enumerate() {
            let attribution: Vec<f64> = self.rows.iter().map(|r| r.attribution[i]).collect();
            let roi: Vec<f64> = self.rows.iter().map(|r| r.roi[i]).collect();
            columns.push(Column::new(
                format!("{model}_attribution_pct").into(),
                attribution,
            ));
            columns.push(Column::new(format!("{model}_roi").into(), roi));
        }

        Ok(DataFrame::new(columns)?)
    }

    /// Format attribution percentages as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let width = 24 + 16 * self.models.len();
        let mut output = String::new();

        output.push_str("\nModel Comparison (attribution %)\n");
        output.push_str(&"=".repeat(width));
        output.push('\n');

        output.push_str(&format!("{:<24}", "Channel"));
        for model in &self.models {
            output.push_str(&format!("{model:>16}"));
        }
        output.push('\n');
        output.push_str(&"-".repeat(width));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!("{:<24}", row.channel));
            for pct in &row.attribution {
                output.push_str(&format!("{:>15.2}%", pct * 100.0));
            }
            output.push('\n');
        }

        output.push_str(&"=".repeat(width));
        output.push('\n');

        output
    }
}
