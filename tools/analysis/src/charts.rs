//! Chart specifications
//!
//! Each chart is a title, axis labels, a rendering kind and one or more
//! named series sharing the table's timestamp axis. Smoothed charts use a
//! centered rolling mean of the configured window size.

use chrono::NaiveDateTime;
use orderbook_stats::table::Table;
use serde::{Deserialize, Serialize};
use types::row::Metric;

use crate::ratios::liquidity_per_maker_series;
use crate::rolling::Window;
use crate::series::{defined, Series};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    /// Filled area under each series.
    Area,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub values: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// File-name stem used on export.
    pub slug: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
    pub timestamps: Vec<NaiveDateTime>,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    fn new(slug: &str, title: &str, y_label: &str, kind: ChartKind, table: &Table) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            x_label: "Timestamp".to_string(),
            y_label: y_label.to_string(),
            kind,
            timestamps: table.timestamps(),
            series: Vec::new(),
        }
    }

    fn with_series(mut self, label: &str, values: Series) -> Self {
        self.series.push(ChartSeries {
            label: label.to_string(),
            values,
        });
        self
    }

    pub fn point_count(&self) -> usize {
        self.timestamps.len()
    }
}

fn raw(table: &Table, metric: Metric) -> Series {
    defined(&table.column(metric))
}

fn smoothed(table: &Table, metric: Metric, window_size: usize) -> Series {
    Window::centered(window_size).mean(&raw(table, metric))
}

pub fn total_liquidity_chart(table: &Table) -> ChartSpec {
    ChartSpec::new(
        "total_liquidity",
        "Total Liquidity Over Time",
        "Total Liquidity (satoshis)",
        ChartKind::Line,
        table,
    )
    .with_series("total_liquidity", raw(table, Metric::TotalLiquidity))
}

pub fn average_fee_chart(table: &Table) -> ChartSpec {
    ChartSpec::new(
        "average_fee",
        "Average Fee Over Time",
        "Average Fee (satoshis)",
        ChartKind::Line,
        table,
    )
    .with_series("average_fee", raw(table, Metric::AllFeesMean))
}

pub fn unique_makers_chart(table: &Table) -> ChartSpec {
    ChartSpec::new(
        "unique_makers",
        "Number of Unique Makers Over Time",
        "Number of Unique Makers",
        ChartKind::Line,
        table,
    )
    .with_series("total_unique_makers", raw(table, Metric::TotalUniqueMakers))
}

/// The two fee panels: relative percentage, then satoshi comparison.
pub fn fee_metrics_charts(table: &Table, window_size: usize) -> [ChartSpec; 2] {
    let percentage = ChartSpec::new(
        "fee_metrics_percentage",
        "Average Relative Fee Percentage Over Time",
        "Fee Percentage",
        ChartKind::Line,
        table,
    )
    .with_series(
        "Relative Fee %",
        smoothed(table, Metric::RelativeFeesPercentageMean, window_size),
    );

    let satoshis = ChartSpec::new(
        "fee_metrics_satoshis",
        "Fee Comparison in Satoshis",
        "Satoshis",
        ChartKind::Line,
        table,
    )
    .with_series(
        "Relative Fees (sats)",
        smoothed(table, Metric::RelativeFeesSatoshisMean, window_size),
    )
    .with_series(
        "Absolute Fees (sats)",
        smoothed(table, Metric::AbsoluteFeesSatoshisMean, window_size),
    );

    [percentage, satoshis]
}

pub fn fee_type_distribution_chart(table: &Table, window_size: usize) -> ChartSpec {
    ChartSpec::new(
        "fee_type_distribution",
        "Fee Type Distribution Over Time",
        "Ratio",
        ChartKind::Area,
        table,
    )
    .with_series(
        "Relative Fee Offers",
        smoothed(table, Metric::RelativeFeesRatio, window_size),
    )
    .with_series(
        "Absolute Fee Offers",
        smoothed(table, Metric::AbsoluteFeesRatio, window_size),
    )
}

pub fn fee_volume_chart(table: &Table, window_size: usize) -> ChartSpec {
    ChartSpec::new(
        "fee_volume",
        "Number of Fee Offers Over Time",
        "Number of Offers",
        ChartKind::Line,
        table,
    )
    .with_series(
        "Relative Fee Offers",
        smoothed(table, Metric::RelativeFeesCount, window_size),
    )
    .with_series(
        "Absolute Fee Offers",
        smoothed(table, Metric::AbsoluteFeesCount, window_size),
    )
}

pub fn liquidity_per_maker_chart(table: &Table, window_size: usize) -> ChartSpec {
    let frame = liquidity_per_maker_series(table, window_size);
    ChartSpec::new(
        "liquidity_per_maker",
        "Liquidity per Maker Over Time",
        "Liquidity per Maker (satoshis)",
        ChartKind::Line,
        table,
    )
    .with_series("Liquidity per Maker", frame.liquidity_per_maker_smooth)
}

/// Every chart, in presentation order.
pub fn all_charts(table: &Table, window_size: usize) -> Vec<ChartSpec> {
    let [percentage, satoshis] = fee_metrics_charts(table, window_size);
    vec![
        total_liquidity_chart(table),
        average_fee_chart(table),
        unique_makers_chart(table),
        percentage,
        satoshis,
        fee_type_distribution_chart(table, window_size),
        fee_volume_chart(table, window_size),
        liquidity_per_maker_chart(table, window_size),
    ]
}
