//! Identifier types for order book participants
//!
//! Makers are identified by their counterparty nick (e.g. `J5EobsvrvAvdTTrP`).
//! The nick is the only identity a snapshot carries, so distinct-maker counts
//! are computed over these values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maker identity as advertised in a snapshot.
///
/// A record without a counterparty carries the empty nick, which still
/// counts as one identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counterparty(String);

impl Counterparty {
    pub fn new(nick: impl Into<String>) -> Self {
        Self(nick.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Counterparty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Counterparty {
    fn from(nick: String) -> Self {
        Self(nick)
    }
}

impl From<&str> for Counterparty {
    fn from(nick: &str) -> Self {
        Self::new(nick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counterparty_transparent_serde() {
        let cp = Counterparty::new("J5FNKhn7mbAUcpiV");
        let json = serde_json::to_string(&cp).unwrap();
        assert_eq!(json, "\"J5FNKhn7mbAUcpiV\"");
        let back: Counterparty = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cp);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(Counterparty::default().is_empty());
    }
}
