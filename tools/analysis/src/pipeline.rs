//! Cache-or-build entry point for the statistics table.

use orderbook_stats::table::{Table, TableBuilder, TableError};
use persistence::{CacheError, TableCacheLoader, TableCacheWriter};
use thiserror::Error;
use tracing::info;

use crate::config::PipelineConfig;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("table build failed: {0}")]
    Build(#[from] TableError),

    #[error("table cache failed: {0}")]
    Cache(#[from] CacheError),
}

/// Build the table from captures and persist it. Nothing is written when
/// the build fails.
pub fn rebuild(config: &PipelineConfig) -> Result<Table, PipelineError> {
    let mut builder = TableBuilder::new();
    let table = builder.build_from_dir(&config.data_dir)?;

    TableCacheWriter::new(&config.cache_path, config.compress).write(table.rows())?;
    info!(
        rows = table.len(),
        skipped = builder.files_skipped(),
        cache = %config.cache_path.display(),
        "Table rebuilt from captures"
    );
    Ok(table)
}

/// Restore the cached table, or rebuild when there is none or a rebuild
/// is forced.
pub fn load_or_build(config: &PipelineConfig) -> Result<Table, PipelineError> {
    let loader = TableCacheLoader::new(&config.cache_path);
    if config.force_rebuild || !loader.exists() {
        return rebuild(config);
    }

    let table = Table::from_rows(loader.load_rows()?);
    info!(
        rows = table.len(),
        cache = %config.cache_path.display(),
        "Table restored from cache"
    );
    Ok(table)
}
