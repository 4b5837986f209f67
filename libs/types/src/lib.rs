//! Types library for order book snapshot analysis
//!
//! Typed records for maker offers and fidelity bonds as they appear in
//! captured order book snapshots, the fee-encoding interpretation, and the
//! schema of the per-snapshot statistics row.
//!
//! # Modules
//! - `ids`: Maker identities (Counterparty)
//! - `numeric`: Lenient decoding of numeric fields (RawNumber)
//! - `fee`: Order types and the fee parser
//! - `offer`: Maker offer records
//! - `bond`: Fidelity bond records
//! - `document`: Snapshot documents as read from disk
//! - `row`: Statistics row and metric schema
//! - `errors`: Error taxonomy

pub mod ids;
pub mod numeric;
pub mod fee;
pub mod offer;
pub mod bond;
pub mod document;
pub mod row;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bond::*;
    pub use crate::document::*;
    pub use crate::errors::*;
    pub use crate::fee::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::offer::*;
    pub use crate::row::*;
}
