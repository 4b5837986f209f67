//! Statistics table and table builder
//!
//! The table holds one [`SnapshotRow`] per timestamped capture, sorted by
//! timestamp. Captures mapping to the same instant are all kept, in input
//! order.
//!
//! Building is lenient about paths and strict about content: a path without
//! a timestamp is skipped, a file that fails to parse aborts the build and
//! no partial table is returned.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};
use types::errors::ParseError;
use types::row::{Metric, SnapshotRow};

use crate::discovery::discover_snapshots;
use crate::loader::load_snapshot;
use crate::timestamp::timestamp_from_path;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("snapshot discovery failed under {root}: {source}")]
    Discovery {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Time-ordered statistics table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    rows: Vec<SnapshotRow>,
}

impl Table {
    /// Build a table from rows in any order.
    pub fn from_rows(mut rows: Vec<SnapshotRow>) -> Self {
        rows.sort_by_key(|r| r.timestamp);
        Self { rows }
    }

    pub fn rows(&self) -> &[SnapshotRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.rows.iter().map(|r| r.timestamp).collect()
    }

    /// One metric across all rows, in table order.
    pub fn column(&self, metric: Metric) -> Vec<f64> {
        self.rows.iter().map(|r| r.value(metric)).collect()
    }

    pub fn head(&self, n: usize) -> &[SnapshotRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.rows.first().map(|r| r.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.rows.last().map(|r| r.timestamp)
    }
}

/// Drives snapshot loading across many files and tracks what it did.
#[derive(Debug, Default)]
pub struct TableBuilder {
    files_seen: u64,
    files_skipped: u64,
    rows_built: u64,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from explicit file paths.
    pub fn build<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<Table, TableError> {
        let mut rows = Vec::with_capacity(paths.len());

        for path in paths {
            let path = path.as_ref();
            self.files_seen += 1;

            let Some(timestamp) = timestamp_from_path(path) else {
                self.files_skipped += 1;
                debug!(path = %path.display(), "No timestamp in path, skipping");
                continue;
            };

            let row = load_snapshot(path, timestamp).map_err(|e| {
                error!(path = %path.display(), error = %e, "Snapshot parse failed, aborting build");
                e
            })?;
            rows.push(row);
            self.rows_built += 1;
        }

        let table = Table::from_rows(rows);
        info!(
            files = self.files_seen,
            skipped = self.files_skipped,
            rows = table.len(),
            "Statistics table built"
        );
        Ok(table)
    }

    /// Discover captures under `root` and build a table from them.
    pub fn build_from_dir(&mut self, root: &Path) -> Result<Table, TableError> {
        let paths = discover_snapshots(root).map_err(|source| TableError::Discovery {
            root: root.to_path_buf(),
            source,
        })?;
        self.build(&paths)
    }

    pub fn files_seen(&self) -> u64 {
        self.files_seen
    }

    pub fn files_skipped(&self) -> u64 {
        self.files_skipped
    }

    pub fn rows_built(&self) -> u64 {
        self.rows_built
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_from_rows_sorts_stably() {
        let mut dup_a = SnapshotRow::empty(at(10, 0));
        dup_a.total_offers = 1;
        let mut dup_b = SnapshotRow::empty(at(10, 0));
        dup_b.total_offers = 2;

        let table = Table::from_rows(vec![
            SnapshotRow::empty(at(12, 0)),
            dup_a,
            SnapshotRow::empty(at(9, 30)),
            dup_b,
        ]);

        assert_eq!(table.timestamps(), vec![at(9, 30), at(10, 0), at(10, 0), at(12, 0)]);
        assert_eq!(table.column(Metric::TotalOffers), vec![0.0, 1.0, 2.0, 0.0]);
        assert_eq!(table.first_timestamp(), Some(at(9, 30)));
        assert_eq!(table.last_timestamp(), Some(at(12, 0)));
    }

    #[test]
    fn test_head_clamps() {
        let table = Table::from_rows(vec![SnapshotRow::empty(at(1, 0))]);
        assert_eq!(table.head(5).len(), 1);
        assert!(Table::default().head(5).is_empty());
    }

    #[test]
    fn test_build_skips_unmatched_paths_without_io() {
        let mut builder = TableBuilder::new();
        let table = builder
            .build(&["not/a/snapshot.json", "data/2024-01-01/orderbook.json"])
            .unwrap();
        assert!(table.is_empty());
        assert_eq!(builder.files_seen(), 2);
        assert_eq!(builder.files_skipped(), 2);
        assert_eq!(builder.rows_built(), 0);
    }
}
