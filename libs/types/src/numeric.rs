//! Lenient numeric decoding for snapshot records
//!
//! Captures carry numbers either as JSON numbers or as decimal strings, and
//! corrupted records carry anything at all. Every numeric field read from a
//! record goes through [`RawNumber`]: a value that cannot be read as a finite
//! number resolves to zero instead of failing the snapshot.

use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A numeric field exactly as it appeared in the capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// A JSON number.
    Number(serde_json::Number),
    /// A string that is expected to hold a decimal.
    Text(String),
    /// Anything else (null, bool, array, object).
    Other(serde_json::Value),
}

impl RawNumber {
    /// The encoding used when a record omits the field entirely.
    pub fn zero() -> Self {
        RawNumber::Text("0".to_string())
    }

    /// Read the value as a finite `f64`, if possible.
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            RawNumber::Number(n) => n.as_f64(),
            RawNumber::Text(s) => s.trim().parse::<f64>().ok(),
            RawNumber::Other(_) => None,
        };
        value.filter(|v| v.is_finite())
    }

    /// Read the value as a whole number, truncating any fraction.
    ///
    /// Values beyond the `i64` range clamp to its bounds.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            RawNumber::Number(n) => n
                .as_i64()
                .or_else(|| n.as_u64().map(|_| i64::MAX))
                .or_else(|| self.to_f64().map(|v| v.trunc() as i64)),
            RawNumber::Text(s) => s
                .trim()
                .parse::<i64>()
                .ok()
                .or_else(|| self.to_f64().map(|v| v.trunc() as i64)),
            RawNumber::Other(_) => None,
        }
    }

    /// Read the value as an exact `Decimal`, if possible.
    ///
    /// Decimal strings are parsed exactly (`"0.000009"` stays `0.000009`);
    /// scientific notation and values outside the decimal range fall back
    /// through `f64`.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            RawNumber::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Decimal::from(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Decimal::from(u))
                } else {
                    n.as_f64().and_then(Decimal::from_f64)
                }
            }
            RawNumber::Text(s) => {
                let s = s.trim();
                Decimal::from_str(s)
                    .or_else(|_| Decimal::from_scientific(s))
                    .ok()
                    .or_else(|| self.to_f64().and_then(Decimal::from_f64))
            }
            RawNumber::Other(_) => None,
        }
    }
}

impl Default for RawNumber {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(RawNumber::Number)
            .unwrap_or(RawNumber::Other(serde_json::Value::Null))
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

/// Read an optional raw field as `f64`, resolving anything unreadable to 0.
pub fn lenient_f64(value: Option<&RawNumber>) -> f64 {
    value.and_then(RawNumber::to_f64).unwrap_or(0.0)
}

/// `deserialize_with` helper for integer fields: anything that is not a
/// readable number becomes 0.
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawNumber::deserialize(deserializer)?;
    Ok(raw.to_i64().unwrap_or(0))
}

/// `deserialize_with` helper for text fields: anything that is not a JSON
/// string reads as the empty string.
pub fn deserialize_lenient_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let text = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    };
    Ok(T::from(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_number_forms() {
        assert_eq!(RawNumber::from("1500").to_f64(), Some(1500.0));
        assert_eq!(RawNumber::from(" 0.25 ").to_f64(), Some(0.25));
        assert_eq!(RawNumber::from(12.5).to_f64(), Some(12.5));
        assert_eq!(
            RawNumber::from("0.000009").to_decimal(),
            Some(Decimal::from_str("0.000009").unwrap())
        );
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(RawNumber::from("1e-5").to_f64(), Some(0.00001));
        assert_eq!(
            RawNumber::from("1e-5").to_decimal(),
            Some(Decimal::from_str("0.00001").unwrap())
        );
    }

    #[test]
    fn test_unreadable_values_are_none() {
        assert_eq!(RawNumber::from("abc").to_f64(), None);
        assert_eq!(RawNumber::from("").to_decimal(), None);
        assert_eq!(RawNumber::from("NaN").to_f64(), None);
        assert_eq!(RawNumber::from("inf").to_f64(), None);
        assert_eq!(RawNumber::Other(serde_json::Value::Bool(true)).to_f64(), None);
    }

    #[test]
    fn test_lenient_f64() {
        assert_eq!(lenient_f64(None), 0.0);
        assert_eq!(lenient_f64(Some(&RawNumber::from("x"))), 0.0);
        assert_eq!(lenient_f64(Some(&RawNumber::from("7"))), 7.0);
    }

    #[test]
    fn test_whole_number_reading() {
        assert_eq!(RawNumber::from("191725").to_i64(), Some(191725));
        assert_eq!(RawNumber::from(14436090.0).to_i64(), Some(14436090));
        assert_eq!(RawNumber::from(2.9).to_i64(), Some(2));
        assert_eq!(RawNumber::from("-3.7").to_i64(), Some(-3));
        assert_eq!(RawNumber::from(1e300).to_i64(), Some(i64::MAX));
        let huge: RawNumber = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(huge.to_i64(), Some(i64::MAX));
        assert_eq!(RawNumber::from("size").to_i64(), None);
        assert_eq!(RawNumber::Other(serde_json::Value::Null).to_i64(), None);
    }

    #[derive(Debug, Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "deserialize_lenient_i64")]
        size: i64,
        #[serde(default, deserialize_with = "deserialize_lenient_text")]
        name: String,
    }

    #[test]
    fn test_lenient_field_helpers() {
        let r: Record = serde_json::from_str(r#"{"size": 12.75, "name": "abc"}"#).unwrap();
        assert_eq!((r.size, r.name.as_str()), (12, "abc"));
        let r: Record = serde_json::from_str(r#"{"size": null, "name": null}"#).unwrap();
        assert_eq!((r.size, r.name.as_str()), (0, ""));
        let r: Record = serde_json::from_str(r#"{"size": [1], "name": 42}"#).unwrap();
        assert_eq!((r.size, r.name.as_str()), (0, ""));
        let r: Record = serde_json::from_str("{}").unwrap();
        assert_eq!((r.size, r.name.as_str()), (0, ""));
    }

    #[test]
    fn test_untagged_deserialization() {
        let n: RawNumber = serde_json::from_str("42").unwrap();
        assert!(matches!(n, RawNumber::Number(_)));
        let t: RawNumber = serde_json::from_str("\"0.1\"").unwrap();
        assert_eq!(t, RawNumber::Text("0.1".to_string()));
        let o: RawNumber = serde_json::from_str("[1, 2]").unwrap();
        assert!(matches!(o, RawNumber::Other(_)));
    }
}
