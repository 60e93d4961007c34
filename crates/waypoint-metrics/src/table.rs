//! Channel metric rows and result tables.

use crate::error::MetricsError;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use waypoint_journey::{ChannelCatalog, ChannelKind};

/// Performance of one channel under one attribution model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelMetrics {
    /// Channel name.
    pub channel: String,

    /// Share of the total credit across all channels, in [0, 1].
    pub attribution_percentage: f64,

    /// Credit mass assigned to the channel (a weight sum, not a count).
    pub attributed_conversions: f64,

    /// Distinct customers exposed to the channel, converting or not.
    pub total_appearances: u64,

    /// Fraction of exposed customers who converted.
    pub success_rate: f64,

    /// Total spend on the channel.
    pub total_cost: f64,

    /// Revenue credited to the channel.
    pub attributed_revenue: f64,

    /// `(attributed_revenue - total_cost) / total_cost`, or 0 without spend.
    ///
    /// Computed from the rescaled `attributed_revenue`, not the raw credited revenue.
    pub roi: f64,
}

impl fmt::Display for ChannelMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2}% of credit (reach: {}, success: {:.2}%, ROI: {:.2}%)",
            self.channel,
            self.attribution_percentage * 100.0,
            self.total_appearances,
            self.success_rate * 100.0,
            self.roi * 100.0
        )
    }
}

/// Result of one attribution run: a row per observed channel.
///
/// Rows are ordered by attribution percentage, highest first, with ties
/// broken by channel name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelMetricsTable {
    /// Model that produced the table.
    pub model: String,

    /// Customers with at least one conversion.
    pub converting_customers: usize,

    /// Customers in the snapshot.
    pub total_customers: usize,

    rows: Vec<ChannelMetrics>,
}

impl ChannelMetricsTable {
    /// Create a table, sorting the rows into result order.
    pub fn new(
        model: impl Into<String>,
        mut rows: Vec<ChannelMetrics>,
        converting_customers: usize,
        total_customers: usize,
    ) -> Self {
        rows.sort_by(|a, b| {
            b.attribution_percentage
                .total_cmp(&a.attribution_percentage)
                .then_with(|| a.channel.cmp(&b.channel))
        });

        Self {
            model: model.into(),
            converting_customers,
            total_customers,
            rows,
        }
    }

    /// Rows in result order.
    pub fn rows(&self) -> &[ChannelMetrics] {
        &self.rows
    }

    /// Row for a single channel.
    pub fn get(&self, channel: &str) -> Option<&ChannelMetrics> {
        self.rows.iter().find(|r| r.channel == channel)
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no channels.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of attribution percentages (1.0 whenever anyone converted).
    pub fn total_attribution(&self) -> f64 {
        self.rows.iter().map(|r| r.attribution_percentage).sum()
    }

    /// Total spend across channels.
    pub fn total_cost(&self) -> f64 {
        self.rows.iter().map(|r| r.total_cost).sum()
    }

    /// Total attributed revenue across channels.
    pub fn total_revenue(&self) -> f64 {
        self.rows.iter().map(|r| r.attributed_revenue).sum()
    }

    /// Rows whose channel falls in one catalog segment.
    pub fn by_kind(&self, catalog: &ChannelCatalog, kind: ChannelKind) -> Vec<&ChannelMetrics> {
        self.rows
            .iter()
            .filter(|r| catalog.kind(&r.channel) == kind)
            .collect()
    }

    /// Convert to a polars `DataFrame` with one column per metric.
    pub fn to_dataframe(&self) -> Result<DataFrame, MetricsError> {
        let channels: Vec<&str> = self.rows.iter().map(|r| r.channel.as_str()).collect();
        let attribution: Vec<f64> = self.rows.iter().map(|r| r.attribution_percentage).collect();
        let conversions: Vec<f64> = self.rows.iter().map(|r| r.attributed_conversions).collect();
        let appearances: Vec<u64> = self.rows.iter().map(|r| r.total_appearances).collect();
        let success: Vec<f64> = self.rows.iter().map(|r| r.success_rate).collect();
        let cost: Vec<f64> = self.rows.iter().map(|r| r.total_cost).collect();
        let revenue: Vec<f64> = self.rows.iter().map(|r| r.attributed_revenue).collect();
        let roi: Vec<f64> = self.rows.iter().map(|r| r.roi).collect();

        let df = DataFrame::new(vec![
            Column::new("channel".into(), channels),
            Column::new("attribution_percentage".into(), attribution),
            Column::new("attributed_conversions".into(), conversions),
            Column::new("total_appearances".into(), appearances),
            Column::new("success_rate".into(), success),
            Column::new("total_cost".into(), cost),
            Column::new("attributed_revenue".into(), revenue),
            Column::new("roi".into(), roi),
        ])?;

        Ok(df)
    }

    /// Convert to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, MetricsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nChannel Attribution: {}\n", self.model));
        output.push_str(&format!(
            "Converting customers: {} of {}\n",
            self.converting_customers, self.total_customers
        ));
        output.push_str(&"=".repeat(104));
        output.push('\n');

        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>10} {:>10} {:>10} {:>12} {:>10}\n",
            "Channel", "Attribution", "Conversions", "Reach", "Success", "Cost", "Revenue", "ROI"
        ));
        output.push_str(&"-".repeat(104));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<24} {:>11.2}% {:>12.2} {:>10} {:>9.2}% {:>10.2} {:>12.2} {:>9.2}%\n",
                row.channel,
                row.attribution_percentage * 100.0,
                row.attributed_conversions,
                row.total_appearances,
                row.success_rate * 100.0,
                row.total_cost,
                row.attributed_revenue,
                row.roi * 100.0
            ));
        }

        output.push_str(&"-".repeat(104));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>11.2}% {:>12} {:>10} {:>10} {:>10.2} {:>12.2}\n",
            "Total",
            self.total_attribution() * 100.0,
            "",
            "",
            "",
            self.total_cost(),
            self.total_revenue()
        ));
        output.push_str(&"=".repeat(104));
        output.push('\n');

        output
    }

    /// Format as Markdown table for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# Channel Attribution: {}\n\n", self.model));
        output.push_str(&format!(
            "**Converting customers:** {} of {}\n\n",
            self.converting_customers, self.total_customers
        ));

        output.push_str(
            "| Channel | Attribution | Conversions | Reach | Success | Cost | Revenue | ROI |\n",
        );
        output.push_str(
            "|---------|-------------|-------------|-------|---------|------|---------|-----|\n",
        );

        for row in &self.rows {
            output.push_str(&format!(
                "| {} | {:.2}% | {:.2} | {} | {:.2}% | {:.2} | {:.2} | {:.2}% |\n",
                row.channel,
                row.attribution_percentage * 100.0,
                row.attributed_conversions,
                row.total_appearances,
                row.success_rate * 100.0,
                row.total_cost,
                row.attributed_revenue,
                row.roi * 100.0
            ));
        }

        output
    }
}

impl fmt::Display for ChannelMetricsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Attribution ({}):", self.model)?;
        for row in &self.rows {
            writeln!(f, "  {row}")?;
        }
        Ok(())
    }
}
