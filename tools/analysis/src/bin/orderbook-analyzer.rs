//! orderbook-analyzer - build, summarize and chart order book statistics

use std::path::PathBuf;

use analysis::charts::all_charts;
use analysis::config::PipelineConfig;
use analysis::export::{export_all, write_json};
use analysis::fees::{calculate_fee_statistics, calculate_time_based_statistics, FeeStatistics, Frequency};
use analysis::health::{calculate_liquidity_metrics, calculate_market_health_metrics};
use analysis::pipeline::{load_or_build, rebuild};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use orderbook_stats::table::Table;
use tracing::info;

#[derive(Parser)]
#[command(name = "orderbook-analyzer")]
#[command(about = "Statistics over captured maker order book snapshots")]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Overrides {
    /// Capture root (one directory per day)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Table cache file
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    /// Write the cache uncompressed
    #[arg(long, global = true)]
    no_compress: bool,

    /// Rolling window size in samples
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    window: Option<u64>,

    /// Ignore the cache and rebuild from captures
    #[arg(long, global = true)]
    rebuild: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the table from captures and refresh the cache
    Build,

    /// Print the first rows and whole-table indicators
    Summary {
        /// Rows to preview
        #[arg(long, default_value_t = 5)]
        rows: usize,

        /// Also write the indicators as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Export every chart as CSV plus a JSON manifest
    Charts {
        /// Output directory
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Per-period statistics
    Buckets {
        #[arg(long, value_enum, default_value_t = Frequency::Day)]
        freq: Frequency,
    },
}

impl Overrides {
    fn apply(&self, config: &mut PipelineConfig) {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(cache) = &self.cache {
            config.cache_path = cache.clone();
        }
        if self.no_compress {
            config.compress = false;
        }
        if let Some(window) = self.window {
            config.window_size = window as usize;
        }
        config.force_rebuild |= self.rebuild;
    }
}

fn print_head(table: &Table, n: usize) {
    println!(
        "{:<20} {:>7} {:>16} {:>7} {:>14} {:>14}",
        "timestamp", "offers", "liquidity", "makers", "rel_fee_pct", "abs_fee_sats"
    );
    for row in table.head(n) {
        println!(
            "{:<20} {:>7} {:>16} {:>7} {:>14.8} {:>14.2}",
            row.timestamp.format("%Y-%m-%d %H:%M:%S"),
            row.total_offers,
            row.total_liquidity,
            row.total_unique_makers,
            row.relative_fees_percentage_mean,
            row.absolute_fees_satoshis_mean,
        );
    }
    println!("[{} rows]", table.len());
}

fn print_fee_statistics(name: &str, stats: &FeeStatistics) {
    println!(
        "  {name}: mean={:.6} median={:.6} std={:.6} min={:.6} max={:.6}",
        stats.mean, stats.median, stats.std, stats.min, stats.max
    );
    let pct: Vec<String> = stats
        .percentiles
        .iter()
        .map(|(p, v)| format!("p{p}={v:.6}"))
        .collect();
    println!("    {}", pct.join(" "));
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.6}")).unwrap_or_else(|| "n/a".to_string())
}

fn summary(config: &PipelineConfig, rows: usize, json: Option<PathBuf>) -> Result<()> {
    let table = load_or_build(config)?;
    print_head(&table, rows);

    let liquidity = calculate_liquidity_metrics(&table);
    let health = calculate_market_health_metrics(&table, config.window_size);
    let fees = calculate_fee_statistics(&table);

    println!();
    println!("Liquidity");
    println!("  average: {:.2}", liquidity.avg_liquidity);
    println!("  per maker: {:.2}", liquidity.liquidity_per_maker);
    println!("  volatility: {:.6}", liquidity.liquidity_volatility);
    println!("Market health");
    println!("  maker stability: {}", fmt_opt(health.maker_stability));
    println!("  fee stability: {}", fmt_opt(health.fee_stability));
    println!("  market depth: {:.2}", health.market_depth);
    println!("Fees");
    print_fee_statistics("relative percentage", &fees.relative_percentage);
    print_fee_statistics("absolute satoshis", &fees.absolute_satoshis);

    if let Some(path) = json {
        write_json(
            &serde_json::json!({
                "rows": table.len(),
                "first": table.first_timestamp(),
                "last": table.last_timestamp(),
                "liquidity": liquidity,
                "market_health": health,
                "fees": fees,
            }),
            &path,
        )?;
        info!(path = %path.display(), "Summary written");
    }
    Ok(())
}

fn buckets(config: &PipelineConfig, freq: Frequency) -> Result<()> {
    let table = load_or_build(config)?;
    println!(
        "{:<20} {:>6} {:>14} {:>14} {:>16} {:>16} {:>8}",
        "bucket", "rows", "rel_pct_mean", "abs_sats_mean", "liquidity_min", "liquidity_max", "makers"
    );
    for b in calculate_time_based_statistics(&table, freq) {
        println!(
            "{:<20} {:>6} {:>14.8} {:>14.2} {:>16.0} {:>16.0} {:>8.1}",
            b.bucket.format("%Y-%m-%d %H:%M:%S"),
            b.liquidity.count,
            b.relative_fee_percentage.mean,
            b.absolute_fee_satoshis.mean,
            b.liquidity.min,
            b.liquidity.max,
            b.unique_makers.mean,
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = PipelineConfig::from_env();
    cli.overrides.apply(&mut config);
    config.log_summary();

    match cli.command {
        Commands::Build => {
            let table = rebuild(&config)?;
            println!(
                "Built {} rows ({} .. {})",
                table.len(),
                fmt_ts(table.first_timestamp()),
                fmt_ts(table.last_timestamp())
            );
        }
        Commands::Summary { rows, json } => summary(&config, rows, json)?,
        Commands::Charts { out } => {
            if let Some(out) = out {
                config.output_dir = out;
            }
            let table = load_or_build(&config)?;
            let exported = export_all(&all_charts(&table, config.window_size), &config.output_dir)?;
            println!("Exported {} charts to {}", exported.len(), config.output_dir.display());
        }
        Commands::Buckets { freq } => buckets(&config, freq)?,
    }

    Ok(())
}

fn fmt_ts(ts: Option<chrono::NaiveDateTime>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
