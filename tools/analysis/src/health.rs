//! Whole-table liquidity and market health indicators.

use orderbook_stats::table::Table;
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::row::Metric;

use crate::ratios::{liquidity_per_maker, stability_series};
use crate::series::{self, defined};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LiquidityMetrics {
    pub avg_liquidity: f64,
    /// Mean over rows with at least one maker.
    pub liquidity_per_maker: f64,
    /// Coefficient of variation of total liquidity.
    pub liquidity_volatility: f64,
}

/// Health indicators. Stability values stay `None` until the table holds
/// at least one full window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketHealthMetrics {
    pub maker_stability: Option<f64>,
    pub fee_stability: Option<f64>,
    pub market_depth: f64,
}

pub fn calculate_liquidity_metrics(table: &Table) -> LiquidityMetrics {
    let liquidity = defined(&table.column(Metric::TotalLiquidity));
    let avg = series::mean(&liquidity).unwrap_or(0.0);
    let volatility = match series::std(&liquidity) {
        Some(std) if avg != 0.0 => std / avg,
        _ => 0.0,
    };

    LiquidityMetrics {
        avg_liquidity: avg,
        liquidity_per_maker: series::mean(&liquidity_per_maker(table)).unwrap_or(0.0),
        liquidity_volatility: volatility,
    }
}

pub fn calculate_market_health_metrics(table: &Table, window_size: usize) -> MarketHealthMetrics {
    let makers = table.column(Metric::TotalUniqueMakers);
    let fees = defined(&table.column(Metric::RelativeFeesPercentageMean));
    let liquidity = table.column(Metric::TotalLiquidity);

    let depth: Vec<Option<f64>> = liquidity
        .iter()
        .zip(&makers)
        .map(|(l, m)| Some(l * m))
        .collect();

    let metrics = MarketHealthMetrics {
        maker_stability: series::mean(&stability_series(&defined(&makers), window_size)),
        fee_stability: series::mean(&stability_series(&fees, window_size)),
        market_depth: series::mean(&depth).unwrap_or(0.0),
    };
    debug!(rows = table.len(), window_size, ?metrics, "Market health computed");
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use types::row::SnapshotRow;

    fn table(points: &[(i64, u64, f64)]) -> Table {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Table::from_rows(
            points
                .iter()
                .enumerate()
                .map(|(i, &(liquidity, makers, fee))| {
                    let mut row = SnapshotRow::empty(day.and_hms_opt(0, i as u32, 0).unwrap());
                    row.total_liquidity = liquidity;
                    row.total_unique_makers = makers;
                    row.relative_fees_percentage_mean = fee;
                    row
                })
                .collect(),
        )
    }

    #[test]
    fn test_liquidity_metrics() {
        let t = table(&[(100, 2, 0.0), (300, 0, 0.0)]);
        let m = calculate_liquidity_metrics(&t);
        assert_eq!(m.avg_liquidity, 200.0);
        // row without makers is excluded
        assert_eq!(m.liquidity_per_maker, 50.0);
        let std = (2.0f64 * 100.0 * 100.0).sqrt();
        assert!((m.liquidity_volatility - std / 200.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_table_is_zero() {
        let t = Table::default();
        assert_eq!(calculate_liquidity_metrics(&t), LiquidityMetrics::default());
        assert_eq!(
            calculate_market_health_metrics(&t, 1000),
            MarketHealthMetrics::default()
        );
    }

    #[test]
    fn test_market_health() {
        let t = table(&[(10, 4, 0.001), (20, 4, 0.001), (30, 2, 0.002)]);
        let m = calculate_market_health_metrics(&t, 2);
        assert_eq!(m.market_depth, (40.0 + 80.0 + 60.0) / 3.0);

        // windows: [4,4] -> 0, [4,2] -> sqrt(2)/3
        let expected = (0.0 + 2f64.sqrt() / 3.0) / 2.0;
        assert!((m.maker_stability.unwrap() - expected).abs() < 1e-12);
        assert!(m.fee_stability.is_some());
    }

    #[test]
    fn test_short_table_has_undefined_stability() {
        let t = table(&[(10, 4, 0.001), (20, 5, 0.001)]);
        let m = calculate_market_health_metrics(&t, 1000);
        assert_eq!(m.maker_stability, None);
        assert_eq!(m.fee_stability, None);
        assert_eq!(m.market_depth, 70.0);
    }
}
