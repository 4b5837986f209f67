//! Fidelity bond aggregation

use serde::{Deserialize, Serialize};
use types::bond::FidelityBond;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BondStatistics {
    pub total_fidelity_bonds: u64,
    pub total_bond_value: f64,
}

/// Count bonds and sum their values (missing values count as 0).
pub fn aggregate_bonds(bonds: &[FidelityBond]) -> BondStatistics {
    BondStatistics {
        total_fidelity_bonds: bonds.len() as u64,
        total_bond_value: bonds.iter().map(FidelityBond::value).sum(),
    }
}
