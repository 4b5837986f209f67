//! Fee encodings and the fee parser
//!
//! A maker's `cjfee` only has meaning together with its `ordertype`:
//! relative offers quote a fraction of the coinjoin amount, absolute offers
//! quote a flat satoshi amount. [`OrderType`] carries that interpretation so
//! no other component compares order-type strings.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::numeric::RawNumber;

/// Wire tag of relative-fee offers.
pub const RELATIVE_OFFER_TAG: &str = "sw0reloffer";
/// Wire tag of absolute-fee offers.
pub const ABSOLUTE_OFFER_TAG: &str = "sw0absoffer";

/// Amount (sats) fees are quoted against when an offer has no usable minsize.
pub const DEFAULT_NOMINAL_AMOUNT: i64 = 100_000;

/// Offer order type, keyed by its wire tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderType {
    /// `sw0reloffer`: fee is a decimal fraction of the amount.
    Relative,
    /// `sw0absoffer`: fee is a fixed satoshi amount.
    Absolute,
    /// Any other tag, kept verbatim for the distribution.
    Other(String),
}

impl OrderType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            RELATIVE_OFFER_TAG => OrderType::Relative,
            ABSOLUTE_OFFER_TAG => OrderType::Absolute,
            other => OrderType::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            OrderType::Relative => RELATIVE_OFFER_TAG,
            OrderType::Absolute => ABSOLUTE_OFFER_TAG,
            OrderType::Other(tag) => tag,
        }
    }

    /// Interpret a fee encoding for this order type against `amount` sats.
    ///
    /// Returns `None` for unrecognized order types and for encodings that
    /// are not numbers.
    pub fn quote(&self, encoding: &RawNumber, amount: i64) -> Option<FeeQuote> {
        match self {
            OrderType::Relative => {
                let ratio = encoding.to_f64()?;
                let satoshis = encoding
                    .to_decimal()
                    .and_then(|r| r.checked_mul(Decimal::from(amount)))
                    .and_then(|fee| fee.to_f64())
                    .unwrap_or(ratio * amount as f64);
                Some(FeeQuote {
                    satoshis,
                    ratio: Some(ratio),
                })
            }
            OrderType::Absolute => Some(FeeQuote {
                satoshis: encoding.to_f64()?,
                ratio: None,
            }),
            OrderType::Other(_) => None,
        }
    }
}

impl Default for OrderType {
    fn default() -> Self {
        OrderType::Other(String::new())
    }
}

impl From<String> for OrderType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<OrderType> for String {
    fn from(order_type: OrderType) -> Self {
        order_type.as_tag().to_string()
    }
}

/// A successfully interpreted fee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeQuote {
    /// Fee in satoshis for the quoted amount.
    pub satoshis: f64,
    /// The raw fraction, for relative offers only.
    pub ratio: Option<f64>,
}

/// Amount a fee is quoted against: the offer's minsize, or
/// [`DEFAULT_NOMINAL_AMOUNT`] when minsize is zero or negative.
pub fn nominal_amount(minsize: i64) -> i64 {
    if minsize > 0 {
        minsize
    } else {
        DEFAULT_NOMINAL_AMOUNT
    }
}

/// Fee in satoshis for an offer, with every failure resolved to 0.
pub fn parse_fee(encoding: &RawNumber, order_type: &OrderType, amount: i64) -> f64 {
    order_type
        .quote(encoding, amount)
        .map(|q| q.satoshis)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_relative_fee() {
        let fee = parse_fee(&"0.000009".into(), &OrderType::Relative, 191725);
        assert!((fee - 1.725525).abs() < 1e-9);
    }

    #[test]
    fn test_relative_fee_is_exact_decimal_product() {
        let fee = parse_fee(&"0.000003".into(), &OrderType::Relative, 104012);
        let expected = (Decimal::from_str("0.000003").unwrap() * Decimal::from(104012))
            .to_f64()
            .unwrap();
        assert_eq!(fee, expected);
    }

    #[test]
    fn test_absolute_fee() {
        assert_eq!(parse_fee(&"1500".into(), &OrderType::Absolute, 99320), 1500.0);
        assert_eq!(parse_fee(&RawNumber::from(250.0), &OrderType::Absolute, 1), 250.0);
    }

    #[test]
    fn test_unknown_order_type_is_zero() {
        let other = OrderType::from_tag("swreloffer");
        assert_eq!(parse_fee(&"0.1".into(), &other, 100_000), 0.0);
    }

    #[test]
    fn test_malformed_encoding_is_zero() {
        assert_eq!(parse_fee(&"abc".into(), &OrderType::Relative, 100_000), 0.0);
        assert_eq!(parse_fee(&"".into(), &OrderType::Absolute, 100_000), 0.0);
        let wrong_type = RawNumber::Other(serde_json::json!({"fee": 1}));
        assert_eq!(parse_fee(&wrong_type, &OrderType::Absolute, 100_000), 0.0);
    }

    #[test]
    fn test_quote_carries_ratio_for_relative_only() {
        let rel = OrderType::Relative.quote(&"0.01".into(), 300_000).unwrap();
        assert_eq!(rel.ratio, Some(0.01));
        assert!((rel.satoshis - 3000.0).abs() < 1e-9);

        let abs = OrderType::Absolute.quote(&"500".into(), 300_000).unwrap();
        assert_eq!(abs.ratio, None);
    }

    #[test]
    fn test_nominal_amount_default() {
        assert_eq!(nominal_amount(0), DEFAULT_NOMINAL_AMOUNT);
        assert_eq!(nominal_amount(-5), 100_000);
        assert_eq!(nominal_amount(191725), 191725);
    }

    #[test]
    fn test_order_type_tags_roundtrip() {
        for tag in ["sw0reloffer", "sw0absoffer", "reloffer", ""] {
            let ot: OrderType = serde_json::from_value(serde_json::json!(tag)).unwrap();
            assert_eq!(ot.as_tag(), tag);
            assert_eq!(serde_json::to_value(&ot).unwrap(), serde_json::json!(tag));
        }
        assert_eq!(OrderType::from_tag("sw0reloffer"), OrderType::Relative);
        assert_eq!(OrderType::from_tag("sw0absoffer"), OrderType::Absolute);
    }

    proptest! {
        #[test]
        fn prop_other_order_types_always_zero(tag in "[a-z0-9]{0,12}", fee in any::<f64>()) {
            prop_assume!(tag != RELATIVE_OFFER_TAG && tag != ABSOLUTE_OFFER_TAG);
            let ot = OrderType::from_tag(&tag);
            prop_assert_eq!(parse_fee(&RawNumber::from(fee), &ot, 100_000), 0.0);
        }

        #[test]
        fn prop_relative_is_fraction_times_base(
            micro in 0u32..100_000,
            base in 1i64..10_000_000_000,
        ) {
            let encoding = format!("0.{:06}", micro);
            let fraction: f64 = encoding.parse().unwrap();
            let fee = parse_fee(&RawNumber::Text(encoding), &OrderType::Relative, base);
            let expected = fraction * base as f64;
            prop_assert!((fee - expected).abs() <= 1e-9 * expected.abs().max(1.0));
        }

        #[test]
        fn prop_absolute_is_identity(sats in 0u64..10_000_000) {
            let fee = parse_fee(&RawNumber::Text(sats.to_string()), &OrderType::Absolute, 1);
            prop_assert_eq!(fee, sats as f64);
        }

        #[test]
        fn prop_non_numeric_never_panics(s in "[a-zA-Z ]{1,10}") {
            prop_assume!(s.trim().parse::<f64>().is_err());
            prop_assert_eq!(parse_fee(&RawNumber::Text(s.clone()), &OrderType::Relative, 100), 0.0);
            prop_assert_eq!(parse_fee(&RawNumber::Text(s), &OrderType::Absolute, 100), 0.0);
        }
    }
}
