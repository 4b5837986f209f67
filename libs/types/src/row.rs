//! Per-snapshot statistics row and its metric schema
//!
//! Every snapshot reduces to exactly one [`SnapshotRow`]. All rows share the
//! schema enumerated by [`Metric`]; statistics over empty inputs are 0,
//! never NaN.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One flattened row of the statistics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub timestamp: NaiveDateTime,

    pub total_offers: u64,
    /// Sum of `maxsize` across all offers, in sats.
    pub total_liquidity: i64,

    // Combined fees (sats)
    pub all_fees_mean: f64,
    pub all_fees_median: f64,
    pub all_fees_count: u64,

    // Relative fees
    pub relative_fees_count: u64,
    pub relative_fees_ratio: f64,
    pub relative_fees_satoshis_mean: f64,
    pub relative_fees_satoshis_median: f64,
    pub relative_fees_percentage_mean: f64,
    pub relative_fees_percentage_median: f64,

    // Absolute fees
    pub absolute_fees_count: u64,
    pub absolute_fees_ratio: f64,
    pub absolute_fees_satoshis_mean: f64,
    pub absolute_fees_satoshis_median: f64,

    // Order sizes
    pub order_size_mean: f64,
    pub order_size_median: f64,
    pub order_size_min: i64,
    pub order_size_max: i64,

    // Makers and bonds
    pub total_unique_makers: u64,
    pub total_fidelity_bonds: u64,
    pub total_bond_value: f64,
}

impl SnapshotRow {
    /// A row with every statistic at 0.
    pub fn empty(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            total_offers: 0,
            total_liquidity: 0,
            all_fees_mean: 0.0,
            all_fees_median: 0.0,
            all_fees_count: 0,
            relative_fees_count: 0,
            relative_fees_ratio: 0.0,
            relative_fees_satoshis_mean: 0.0,
            relative_fees_satoshis_median: 0.0,
            relative_fees_percentage_mean: 0.0,
            relative_fees_percentage_median: 0.0,
            absolute_fees_count: 0,
            absolute_fees_ratio: 0.0,
            absolute_fees_satoshis_mean: 0.0,
            absolute_fees_satoshis_median: 0.0,
            order_size_mean: 0.0,
            order_size_median: 0.0,
            order_size_min: 0,
            order_size_max: 0,
            total_unique_makers: 0,
            total_fidelity_bonds: 0,
            total_bond_value: 0.0,
        }
    }

    /// Value of one metric as `f64`.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::TotalOffers => self.total_offers as f64,
            Metric::TotalLiquidity => self.total_liquidity as f64,
            Metric::AllFeesMean => self.all_fees_mean,
            Metric::AllFeesMedian => self.all_fees_median,
            Metric::AllFeesCount => self.all_fees_count as f64,
            Metric::RelativeFeesCount => self.relative_fees_count as f64,
            Metric::RelativeFeesRatio => self.relative_fees_ratio,
            Metric::RelativeFeesSatoshisMean => self.relative_fees_satoshis_mean,
            Metric::RelativeFeesSatoshisMedian => self.relative_fees_satoshis_median,
            Metric::RelativeFeesPercentageMean => self.relative_fees_percentage_mean,
            Metric::RelativeFeesPercentageMedian => self.relative_fees_percentage_median,
            Metric::AbsoluteFeesCount => self.absolute_fees_count as f64,
            Metric::AbsoluteFeesRatio => self.absolute_fees_ratio,
            Metric::AbsoluteFeesSatoshisMean => self.absolute_fees_satoshis_mean,
            Metric::AbsoluteFeesSatoshisMedian => self.absolute_fees_satoshis_median,
            Metric::OrderSizeMean => self.order_size_mean,
            Metric::OrderSizeMedian => self.order_size_median,
            Metric::OrderSizeMin => self.order_size_min as f64,
            Metric::OrderSizeMax => self.order_size_max as f64,
            Metric::TotalUniqueMakers => self.total_unique_makers as f64,
            Metric::TotalFidelityBonds => self.total_fidelity_bonds as f64,
            Metric::TotalBondValue => self.total_bond_value,
        }
    }

    /// The row as a metric-name → value mapping, in schema order of names.
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        Metric::ALL
            .iter()
            .map(|m| (m.name(), self.value(*m)))
            .collect()
    }
}

/// Named columns of the statistics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TotalOffers,
    TotalLiquidity,
    AllFeesMean,
    AllFeesMedian,
    AllFeesCount,
    RelativeFeesCount,
    RelativeFeesRatio,
    RelativeFeesSatoshisMean,
    RelativeFeesSatoshisMedian,
    RelativeFeesPercentageMean,
    RelativeFeesPercentageMedian,
    AbsoluteFeesCount,
    AbsoluteFeesRatio,
    AbsoluteFeesSatoshisMean,
    AbsoluteFeesSatoshisMedian,
    OrderSizeMean,
    OrderSizeMedian,
    OrderSizeMin,
    OrderSizeMax,
    TotalUniqueMakers,
    TotalFidelityBonds,
    TotalBondValue,
}

impl Metric {
    /// Every column, in schema order.
    pub const ALL: [Metric; 22] = [
        Metric::TotalOffers,
        Metric::TotalLiquidity,
        Metric::AllFeesMean,
        Metric::AllFeesMedian,
        Metric::AllFeesCount,
        Metric::RelativeFeesCount,
        Metric::RelativeFeesRatio,
        Metric::RelativeFeesSatoshisMean,
        Metric::RelativeFeesSatoshisMedian,
        Metric::RelativeFeesPercentageMean,
        Metric::RelativeFeesPercentageMedian,
        Metric::AbsoluteFeesCount,
        Metric::AbsoluteFeesRatio,
        Metric::AbsoluteFeesSatoshisMean,
        Metric::AbsoluteFeesSatoshisMedian,
        Metric::OrderSizeMean,
        Metric::OrderSizeMedian,
        Metric::OrderSizeMin,
        Metric::OrderSizeMax,
        Metric::TotalUniqueMakers,
        Metric::TotalFidelityBonds,
        Metric::TotalBondValue,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::TotalOffers => "total_offers",
            Metric::TotalLiquidity => "total_liquidity",
            Metric::AllFeesMean => "all_fees_mean",
            Metric::AllFeesMedian => "all_fees_median",
            Metric::AllFeesCount => "all_fees_count",
            Metric::RelativeFeesCount => "relative_fees_count",
            Metric::RelativeFeesRatio => "relative_fees_ratio",
            Metric::RelativeFeesSatoshisMean => "relative_fees_satoshis_mean",
            Metric::RelativeFeesSatoshisMedian => "relative_fees_satoshis_median",
            Metric::RelativeFeesPercentageMean => "relative_fees_percentage_mean",
            Metric::RelativeFeesPercentageMedian => "relative_fees_percentage_median",
            Metric::AbsoluteFeesCount => "absolute_fees_count",
            Metric::AbsoluteFeesRatio => "absolute_fees_ratio",
            Metric::AbsoluteFeesSatoshisMean => "absolute_fees_satoshis_mean",
            Metric::AbsoluteFeesSatoshisMedian => "absolute_fees_satoshis_median",
            Metric::OrderSizeMean => "order_size_mean",
            Metric::OrderSizeMedian => "order_size_median",
            Metric::OrderSizeMin => "order_size_min",
            Metric::OrderSizeMax => "order_size_max",
            Metric::TotalUniqueMakers => "total_unique_makers",
            Metric::TotalFidelityBonds => "total_fidelity_bonds",
            Metric::TotalBondValue => "total_bond_value",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.name() == name)
    }

    /// Whether the column holds a non-negative integer count.
    pub fn is_count(&self) -> bool {
        matches!(
            self,
            Metric::TotalOffers
                | Metric::AllFeesCount
                | Metric::RelativeFeesCount
                | Metric::AbsoluteFeesCount
                | Metric::TotalUniqueMakers
                | Metric::TotalFidelityBonds
        )
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_row_is_all_zero() {
        let row = SnapshotRow::empty(ts());
        for metric in Metric::ALL {
            assert_eq!(row.value(metric), 0.0, "{metric} should be 0");
        }
    }

    #[test]
    fn test_names_are_unique_and_resolvable() {
        let map = SnapshotRow::empty(ts()).to_map();
        assert_eq!(map.len(), Metric::ALL.len());
        for metric in Metric::ALL {
            assert_eq!(Metric::from_name(metric.name()), Some(metric));
        }
        assert_eq!(Metric::from_name("average_fee"), None);
    }

    #[test]
    fn test_serde_name_matches_column_name() {
        let json = serde_json::to_value(Metric::RelativeFeesSatoshisMean).unwrap();
        assert_eq!(json, serde_json::json!("relative_fees_satoshis_mean"));
    }

    #[test]
    fn test_value_reads_fields() {
        let mut row = SnapshotRow::empty(ts());
        row.total_liquidity = 16_502_104;
        row.absolute_fees_satoshis_mean = 1500.0;
        row.total_unique_makers = 2;
        assert_eq!(row.value(Metric::TotalLiquidity), 16_502_104.0);
        assert_eq!(row.value(Metric::AbsoluteFeesSatoshisMean), 1500.0);
        assert_eq!(row.to_map()["total_unique_makers"], 2.0);
        assert!(Metric::TotalUniqueMakers.is_count());
        assert!(!Metric::TotalBondValue.is_count());
    }
}
