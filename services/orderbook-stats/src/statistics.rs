//! Statistics over aggregated offers
//!
//! Every statistic over an empty list is 0. Downstream smoothing treats the
//! table as dense numeric columns, so no NaN or missing marker may leak out
//! of this module.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use types::fee::{ABSOLUTE_OFFER_TAG, RELATIVE_OFFER_TAG};

use crate::aggregation::OfferAggregate;

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median (mean of the two middle values for even lengths), 0 when empty.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn as_f64(values: &[i64]) -> Vec<f64> {
    values.iter().map(|v| *v as f64).collect()
}

/// Mean and median of a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Central {
    pub mean: f64,
    pub median: f64,
}

impl Central {
    pub fn of(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            median: median(values),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeSummary {
    pub mean: f64,
    pub median: f64,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RelativeFeeStatistics {
    pub count: u64,
    /// Share of all offers that are relative offers.
    pub ratio: f64,
    pub satoshis: Central,
    /// Statistics of the raw fractions.
    pub percentages: Central,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AbsoluteFeeStatistics {
    pub count: u64,
    pub ratio: f64,
    pub satoshis: Central,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderSizeStatistics {
    pub mean: f64,
    pub median: f64,
    /// Smallest `minsize`.
    pub min: i64,
    /// Largest `maxsize`.
    pub max: i64,
}

/// Derived statistics for one snapshot's offers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferStatistics {
    pub total_offers: u64,
    pub total_liquidity: i64,
    pub all_fees: FeeSummary,
    pub relative_fees: RelativeFeeStatistics,
    pub absolute_fees: AbsoluteFeeStatistics,
    pub order_sizes: OrderSizeStatistics,
    pub total_unique_makers: u64,
    pub order_type_distribution: BTreeMap<String, u64>,
}

/// Share of each order type among all classified offers.
pub fn order_type_ratios(counts: &BTreeMap<String, u64>) -> BTreeMap<String, f64> {
    let total: u64 = counts.values().sum();
    counts
        .iter()
        .map(|(tag, count)| {
            let ratio = if total > 0 {
                *count as f64 / total as f64
            } else {
                0.0
            };
            (tag.clone(), ratio)
        })
        .collect()
}

/// Reduce raw accumulations to statistics.
pub fn compute_statistics(agg: &OfferAggregate) -> OfferStatistics {
    let ratios = order_type_ratios(&agg.order_type_counts);
    let count_of = |tag: &str| agg.order_type_counts.get(tag).copied().unwrap_or(0);
    let ratio_of = |tag: &str| ratios.get(tag).copied().unwrap_or(0.0);

    let order_sizes = as_f64(&agg.order_sizes);

    OfferStatistics {
        total_offers: agg.total_offers,
        total_liquidity: agg.total_liquidity,
        all_fees: FeeSummary {
            mean: mean(&agg.fees),
            median: median(&agg.fees),
            count: agg.fees.len() as u64,
        },
        relative_fees: RelativeFeeStatistics {
            count: count_of(RELATIVE_OFFER_TAG),
            ratio: ratio_of(RELATIVE_OFFER_TAG),
            satoshis: Central::of(&agg.relative_fees_satoshis),
            percentages: Central::of(&agg.relative_fees_ratios),
        },
        absolute_fees: AbsoluteFeeStatistics {
            count: count_of(ABSOLUTE_OFFER_TAG),
            ratio: ratio_of(ABSOLUTE_OFFER_TAG),
            satoshis: Central::of(&agg.absolute_fees),
        },
        order_sizes: OrderSizeStatistics {
            mean: mean(&order_sizes),
            median: median(&order_sizes),
            min: agg.min_order_sizes.iter().copied().min().unwrap_or(0),
            max: agg.max_order_sizes.iter().copied().max().unwrap_or(0),
        },
        total_unique_makers: agg.unique_makers.len() as u64,
        order_type_distribution: agg.order_type_counts.clone(),
    }
}
