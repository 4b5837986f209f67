//! Fee statistics across the whole table and per calendar bucket.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike};
use orderbook_stats::table::Table;
use serde::{Deserialize, Serialize};
use types::row::{Metric, SnapshotRow};

use crate::series::{self, defined, Series};

/// Percentile points reported in [`FeeStatistics::percentiles`].
pub const PERCENTILES: [(&str, f64); 3] = [("25", 0.25), ("75", 0.75), ("95", 0.95)];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeStatistics {
    pub mean: f64,
    /// Mean of the per-row median column.
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub percentiles: BTreeMap<String, f64>,
}

impl FeeStatistics {
    fn from_columns(mean_col: &[Option<f64>], median_col: &[Option<f64>]) -> Self {
        let percentiles = PERCENTILES
            .iter()
            .map(|(name, q)| {
                (
                    name.to_string(),
                    series::quantile(mean_col, *q).unwrap_or(0.0),
                )
            })
            .collect();

        Self {
            mean: series::mean(mean_col).unwrap_or(0.0),
            median: series::mean(median_col).unwrap_or(0.0),
            std: series::std(mean_col).unwrap_or(0.0),
            min: series::min(mean_col).unwrap_or(0.0),
            max: series::max(mean_col).unwrap_or(0.0),
            percentiles,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeStatisticsReport {
    pub relative_percentage: FeeStatistics,
    pub absolute_satoshis: FeeStatistics,
}

pub fn calculate_fee_statistics(table: &Table) -> FeeStatisticsReport {
    let col = |m: Metric| defined(&table.column(m));
    FeeStatisticsReport {
        relative_percentage: FeeStatistics::from_columns(
            &col(Metric::RelativeFeesPercentageMean),
            &col(Metric::RelativeFeesPercentageMedian),
        ),
        absolute_satoshis: FeeStatistics::from_columns(
            &col(Metric::AbsoluteFeesSatoshisMean),
            &col(Metric::AbsoluteFeesSatoshisMedian),
        ),
    }
}

// ── Time buckets ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Hour,
    Day,
    /// Weeks ending Sunday, labeled by that Sunday.
    Week,
}

impl Frequency {
    /// Label of the bucket containing `ts`.
    pub fn bucket(&self, ts: NaiveDateTime) -> NaiveDateTime {
        let midnight = ts.date().and_time(NaiveTime::MIN);
        match self {
            Frequency::Hour => midnight + Duration::hours(i64::from(ts.hour())),
            Frequency::Day => midnight,
            Frequency::Week => {
                let to_sunday = 6 - ts.weekday().num_days_from_monday();
                midnight + Duration::days(i64::from(to_sunday))
            }
        }
    }
}

/// Summary of one column inside one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    /// Undefined for a single sample.
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl ColumnSummary {
    fn of(values: &[Option<f64>]) -> Self {
        Self {
            count: series::count(values),
            mean: series::mean(values).unwrap_or(0.0),
            std: series::std(values),
            min: series::min(values).unwrap_or(0.0),
            max: series::max(values).unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucketStatistics {
    pub bucket: NaiveDateTime,
    pub relative_fee_percentage: ColumnSummary,
    pub absolute_fee_satoshis: ColumnSummary,
    pub liquidity: ColumnSummary,
    pub unique_makers: ColumnSummary,
}

/// Per-bucket summaries in bucket order. Buckets with no rows are omitted.
pub fn calculate_time_based_statistics(table: &Table, freq: Frequency) -> Vec<TimeBucketStatistics> {
    let mut buckets: BTreeMap<NaiveDateTime, Vec<&SnapshotRow>> = BTreeMap::new();
    for row in table.rows() {
        buckets.entry(freq.bucket(row.timestamp)).or_default().push(row);
    }

    buckets
        .into_iter()
        .map(|(bucket, rows)| {
            let col = |m: Metric| -> Series { rows.iter().map(|r| Some(r.value(m))).collect() };
            TimeBucketStatistics {
                bucket,
                relative_fee_percentage: ColumnSummary::of(&col(Metric::RelativeFeesPercentageMean)),
                absolute_fee_satoshis: ColumnSummary::of(&col(Metric::AbsoluteFeesSatoshisMean)),
                liquidity: ColumnSummary::of(&col(Metric::TotalLiquidity)),
                unique_makers: ColumnSummary::of(&col(Metric::TotalUniqueMakers)),
            }
        })
        .collect()
}
