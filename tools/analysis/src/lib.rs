//! Order Book Statistics Analysis
//!
//! Everything downstream of the statistics table: rolling smoothing,
//! derived ratio frames, fee and health summaries, time buckets and chart
//! export.
//!
//! # Modules
//! - `series`: Optional-valued columns and their summaries
//! - `rolling`: Trailing and centered fixed-size windows
//! - `ratios`: Fee type shares, offer volume, liquidity per maker, stability
//! - `health`: Liquidity and market health indicators
//! - `fees`: Fee statistics and calendar buckets
//! - `charts`: Chart specifications built from the table
//! - `export`: CSV / JSON chart and report export
//! - `config`: Pipeline configuration
//! - `pipeline`: Cache-or-build table loading

pub mod series;
pub mod rolling;
pub mod ratios;
pub mod health;
pub mod fees;
pub mod charts;
pub mod export;
pub mod config;
pub mod pipeline;

/// Crate version constant
pub const VERSION: &str = "1.0.0";
