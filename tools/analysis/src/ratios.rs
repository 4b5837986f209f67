//! Derived time-series frames: fee type shares, offer volume, liquidity
//! per maker and stability ratios.

use chrono::NaiveDateTime;
use orderbook_stats::table::Table;
use serde::{Deserialize, Serialize};
use types::row::Metric;

use crate::rolling::Window;
use crate::series::{self, defined, Series};

/// Relative / absolute share of fee-classified offers, raw and smoothed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRatioFrame {
    pub timestamps: Vec<NaiveDateTime>,
    pub relative_ratio: Series,
    pub absolute_ratio: Series,
    pub relative_ratio_smooth: Series,
    pub absolute_ratio_smooth: Series,
}

/// Offer counts by fee type and their shares, raw and smoothed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeFrame {
    pub timestamps: Vec<NaiveDateTime>,
    pub total_volume: Series,
    pub relative_share: Series,
    pub absolute_share: Series,
    pub total_volume_smooth: Series,
    pub relative_share_smooth: Series,
    pub absolute_share_smooth: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityPerMakerFrame {
    pub timestamps: Vec<NaiveDateTime>,
    pub liquidity_per_maker: Series,
    pub liquidity_per_maker_smooth: Series,
}

fn fee_type_counts(table: &Table) -> (Series, Series, Series) {
    let rel = defined(&table.column(Metric::RelativeFeesCount));
    let abs = defined(&table.column(Metric::AbsoluteFeesCount));
    let total = rel
        .iter()
        .zip(&abs)
        .map(|(r, a)| Some(r.unwrap_or(0.0) + a.unwrap_or(0.0)))
        .collect();
    (rel, abs, total)
}

fn divide(num: &[Option<f64>], den: &[Option<f64>]) -> Series {
    num.iter().zip(den).map(|(n, d)| series::ratio(*n, *d)).collect()
}

/// Share of relative vs absolute offers among those two types, per row.
///
/// Rows with neither type have an undefined share.
pub fn compute_fee_ratios(table: &Table, window_size: usize) -> FeeRatioFrame {
    let (rel, abs, total) = fee_type_counts(table);
    let relative_ratio = divide(&rel, &total);
    let absolute_ratio = divide(&abs, &total);
    let window = Window::centered(window_size);

    FeeRatioFrame {
        timestamps: table.timestamps(),
        relative_ratio_smooth: window.mean(&relative_ratio),
        absolute_ratio_smooth: window.mean(&absolute_ratio),
        relative_ratio,
        absolute_ratio,
    }
}

pub fn compute_volume_metrics(table: &Table, window_size: usize) -> VolumeFrame {
    let (rel, abs, total_volume) = fee_type_counts(table);
    let relative_share = divide(&rel, &total_volume);
    let absolute_share = divide(&abs, &total_volume);
    let window = Window::centered(window_size);

    VolumeFrame {
        timestamps: table.timestamps(),
        total_volume_smooth: window.mean(&total_volume),
        relative_share_smooth: window.mean(&relative_share),
        absolute_share_smooth: window.mean(&absolute_share),
        total_volume,
        relative_share,
        absolute_share,
    }
}

/// Liquidity divided by unique makers; undefined for rows with no makers.
pub fn liquidity_per_maker(table: &Table) -> Series {
    let liquidity = defined(&table.column(Metric::TotalLiquidity));
    let makers = defined(&table.column(Metric::TotalUniqueMakers));
    divide(&liquidity, &makers)
}

pub fn liquidity_per_maker_series(table: &Table, window_size: usize) -> LiquidityPerMakerFrame {
    let raw = liquidity_per_maker(table);
    LiquidityPerMakerFrame {
        timestamps: table.timestamps(),
        liquidity_per_maker_smooth: Window::centered(window_size).mean(&raw),
        liquidity_per_maker: raw,
    }
}

/// Trailing rolling std divided by trailing rolling mean.
pub fn stability_series(values: &[Option<f64>], window_size: usize) -> Series {
    let window = Window::trailing(window_size);
    divide(&window.std(values), &window.mean(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use types::row::SnapshotRow;

    fn table(counts: &[(u64, u64, i64, u64)]) -> Table {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let rows = counts
            .iter()
            .enumerate()
            .map(|(i, &(rel, abs, liquidity, makers))| {
                let mut row = SnapshotRow::empty(day.and_hms_opt(i as u32, 0, 0).unwrap());
                row.relative_fees_count = rel;
                row.absolute_fees_count = abs;
                row.total_liquidity = liquidity;
                row.total_unique_makers = makers;
                row
            })
            .collect();
        Table::from_rows(rows)
    }

    #[test]
    fn test_fee_ratios() {
        let t = table(&[(3, 1, 0, 0), (0, 0, 0, 0), (1, 1, 0, 0)]);
        let frame = compute_fee_ratios(&t, 1);
        assert_eq!(frame.relative_ratio, vec![Some(0.75), None, Some(0.5)]);
        assert_eq!(frame.absolute_ratio, vec![Some(0.25), None, Some(0.5)]);
        // window of one reproduces the raw series
        assert_eq!(frame.relative_ratio_smooth, frame.relative_ratio);
    }

    #[test]
    fn test_volume_metrics() {
        let t = table(&[(3, 1, 0, 0), (1, 1, 0, 0), (2, 0, 0, 0)]);
        let frame = compute_volume_metrics(&t, 3);
        assert_eq!(frame.total_volume, vec![Some(4.0), Some(2.0), Some(2.0)]);
        assert_eq!(frame.relative_share[2], Some(1.0));
        assert_eq!(frame.total_volume_smooth, vec![None, Some(8.0 / 3.0), None]);
    }

    #[test]
    fn test_liquidity_per_maker() {
        let t = table(&[(0, 0, 1000, 4), (0, 0, 500, 0)]);
        let frame = liquidity_per_maker_series(&t, 1);
        assert_eq!(frame.liquidity_per_maker, vec![Some(250.0), None]);
        assert_eq!(frame.timestamps.len(), 2);
    }

    #[test]
    fn test_stability_series() {
        let s = defined(&[2.0, 2.0, 4.0, 0.0, 0.0]);
        let out = stability_series(&s, 2);
        assert_eq!(out[0], None);
        assert_eq!(out[1], Some(0.0));
        let expected = 2f64.sqrt() / 3.0;
        assert!((out[2].unwrap() - expected).abs() < 1e-12);
        // zero mean leaves the ratio undefined
        assert_eq!(out[4], None);
    }

    #[test]
    fn test_empty_table() {
        let t = Table::default();
        assert!(compute_fee_ratios(&t, 10).relative_ratio.is_empty());
        assert!(compute_volume_metrics(&t, 10).total_volume.is_empty());
    }
}
