//! Maker offer records
//!
//! An [`Offer`] is one maker's advertised terms inside a snapshot. Fields a
//! capture omits take the defaults the statistics expect: sizes default to
//! 0, the fee encoding to `"0"`, the order type to the empty tag. Fields
//! present with the wrong JSON type (null, a float size) are read the same
//! lenient way instead of failing the snapshot.

use serde::{Deserialize, Serialize};

use crate::fee::{nominal_amount, FeeQuote, OrderType};
use crate::ids::Counterparty;
use crate::numeric::{deserialize_lenient_i64, deserialize_lenient_text, lenient_f64, RawNumber};

/// One maker offer as captured in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    pub counterparty: Counterparty,
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    pub ordertype: OrderType,
    /// Smallest coinjoin amount accepted, in sats. Fractions truncate.
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub minsize: i64,
    /// Largest coinjoin amount offered, in sats. Fractions truncate.
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub maxsize: i64,
    /// Fee encoding; meaning depends on `ordertype`.
    #[serde(default)]
    pub cjfee: RawNumber,
    /// Miner fee contribution. Not used by the statistics.
    #[serde(default)]
    pub txfee: Option<RawNumber>,
    /// Bond value the directory attached to this offer. Informational only.
    #[serde(default)]
    pub fidelity_bond_value: Option<RawNumber>,
}

impl Offer {
    /// Amount the fee is quoted against.
    pub fn nominal_amount(&self) -> i64 {
        nominal_amount(self.minsize)
    }

    /// The interpreted fee, or `None` when it cannot be interpreted.
    pub fn fee_quote(&self) -> Option<FeeQuote> {
        self.ordertype.quote(&self.cjfee, self.nominal_amount())
    }

    /// Fee in sats, 0 when it cannot be interpreted.
    pub fn fee_satoshis(&self) -> f64 {
        self.fee_quote().map(|q| q.satoshis).unwrap_or(0.0)
    }

    pub fn bond_value(&self) -> f64 {
        lenient_f64(self.fidelity_bond_value.as_ref())
    }
}
