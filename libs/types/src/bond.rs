//! Fidelity bond records

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::Counterparty;
use crate::numeric::{deserialize_lenient_text, lenient_f64, RawNumber};

/// A maker's posted fidelity bond.
///
/// Only `counterparty` and `bond_value` feed the statistics. UTXO and
/// certificate fields are kept as opaque metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FidelityBond {
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    pub counterparty: Counterparty,
    #[serde(default)]
    pub bond_value: Option<RawNumber>,
    #[serde(flatten)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl FidelityBond {
    /// Bond value, 0 when absent or unreadable.
    pub fn value(&self) -> f64 {
        lenient_f64(self.bond_value.as_ref())
    }
}
