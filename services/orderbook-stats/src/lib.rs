//! Order Book Statistics Service
//!
//! Reduces captured maker order book snapshots to one statistics row each
//! and assembles the rows into a time-ordered table.
//!
//! # Architecture
//!
//! ```text
//!  <root>/<YYYY-MM-DD>/orderbook_<HH>-<MM>.json
//!        │
//!   ┌────▼─────┐
//!   │Discovery │  ← sorted candidate paths
//!   └────┬─────┘
//!   ┌────▼─────┐
//!   │Timestamp │  ← unmatched paths skipped
//!   └────┬─────┘
//!   ┌────▼─────┐
//!   │ Loader   │  ← parse document (errors abort the build)
//!   └────┬─────┘
//!   ┌────┴─────────────┬───────────────┐
//! ┌─▼──────────┐  ┌────▼─────┐   ┌─────▼─────┐
//! │Aggregation │─▶│Statistics│   │Bond totals│
//! └────────────┘  └────┬─────┘   └─────┬─────┘
//!                 ┌────▼───────────────▼┐
//!                 │ SnapshotRow → Table │
//!                 └─────────────────────┘
//! ```

pub mod aggregation;
pub mod bonds;
pub mod discovery;
pub mod loader;
pub mod statistics;
pub mod table;
pub mod timestamp;

pub use table::{Table, TableBuilder, TableError};
