//! Snapshot documents
//!
//! The top-level JSON object of one capture. Both lists are optional in the
//! capture and read as empty when absent or null.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bond::FidelityBond;
use crate::errors::ParseError;
use crate::offer::Offer;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    offers: Option<Vec<Offer>>,
    #[serde(default)]
    fidelitybonds: Option<Vec<FidelityBond>>,
}

impl SnapshotDocument {
    pub fn new(offers: Vec<Offer>, fidelitybonds: Vec<FidelityBond>) -> Self {
        Self {
            offers: Some(offers),
            fidelitybonds: Some(fidelitybonds),
        }
    }

    /// Read and parse a capture file.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ParseError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn offers(&self) -> &[Offer] {
        self.offers.as_deref().unwrap_or(&[])
    }

    pub fn fidelity_bonds(&self) -> &[FidelityBond] {
        self.fidelitybonds.as_deref().unwrap_or(&[])
    }
}
