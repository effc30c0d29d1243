//! Amount parsing for request payloads and the JSON form of amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Clients send amounts either as JSON numbers or as numeric strings (form
//! inputs); both are parsed straight into `rust_decimal::Decimal`. Responses
//! carry amounts as JSON numbers via [`AmountNumber`]; the conversion to a
//! JSON float happens only at serialization time.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{DeserializeAs, SerializeAs};
use thiserror::Error;

/// Decimal places kept for every amount.
pub const AMOUNT_SCALE: u32 = 2;

/// Largest accepted magnitude, the range of the `NUMERIC(18, 2)` columns.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA763_FFFF, 0x0DE0_B6B3, 0, false, AMOUNT_SCALE);

/// Reasons an amount cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Blank string.
    #[error("amount is empty")]
    Empty,
    /// Not a finite decimal number.
    #[error("`{0}` is not a valid number")]
    NotANumber(String),
    /// Magnitude above [`MAX_AMOUNT`].
    #[error("amount exceeds {}", MAX_AMOUNT)]
    OutOfRange,
}

/// A raw amount as it arrives in a JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number.
    Number(serde_json::Number),
    /// A numeric string such as `"12000"` or `"49.90"`.
    Text(String),
    /// Any other JSON value; never parses.
    Other(serde_json::Value),
}

impl AmountInput {
    /// Parses the input into a decimal.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError`] for blank, non-numeric, non-finite or
    /// out-of-range values. Extra decimal places are rounded half away from
    /// zero to [`AMOUNT_SCALE`].
    pub fn to_decimal(&self) -> Result<Decimal, AmountError> {
        match self {
            Self::Number(n) => parse_decimal(&n.to_string()),
            Self::Text(s) => parse_decimal(s),
            Self::Other(v) => Err(AmountError::NotANumber(v.to_string())),
        }
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        Self::Text(value.to_string())
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal, AmountError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| AmountError::NotANumber(trimmed.to_string()))?
        .round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    if amount.abs() > MAX_AMOUNT {
        return Err(AmountError::OutOfRange);
    }
    Ok(amount)
}

/// `serde_with` adapter writing a [`Decimal`] as a JSON number.
///
/// Use as `#[serde_as(as = "AmountNumber")]`, `Option<AmountNumber>` or
/// `BTreeMap<_, AmountNumber>`.
pub struct AmountNumber;

impl SerializeAs<Decimal> for AmountNumber {
    fn serialize_as<S: Serializer>(source: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(source, serializer)
    }
}

impl<'de> DeserializeAs<'de, Decimal> for AmountNumber {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(r#"12000"#, dec!(12000))]
    #[case(r#"49.9"#, dec!(49.9))]
    #[case(r#""250""#, dec!(250))]
    #[case(r#"" 7.50 ""#, dec!(7.5))]
    #[case(r#"1e3"#, dec!(1000))]
    #[case(r#"-5"#, dec!(-5))]
    fn test_parses_numbers_and_strings(#[case] json: &str, #[case] expected: Decimal) {
        let input: AmountInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.to_decimal().unwrap(), expected);
    }

    #[rstest]
    #[case(r#""abc""#)]
    #[case(r#""NaN""#)]
    #[case(r#""inf""#)]
    #[case(r#""12,5""#)]
    #[case(r#"true"#)]
    #[case(r#"null"#)]
    #[case(r#"{"value": 5}"#)]
    #[case(r#"[1, 2]"#)]
    fn test_rejects_non_numbers(#[case] json: &str) {
        let input: AmountInput = serde_json::from_str(json).unwrap();
        assert!(matches!(
            input.to_decimal(),
            Err(AmountError::NotANumber(_))
        ));
    }

    #[rstest]
    #[case("9999999999999999.99", dec!(9999999999999999.99))]
    #[case("-9999999999999999.99", dec!(-9999999999999999.99))]
    #[case("12.345", dec!(12.35))]
    #[case("0.005", dec!(0.01))]
    #[case("19.994", dec!(19.99))]
    fn test_rounds_to_cents_within_range(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(AmountInput::Text(raw.into()).to_decimal().unwrap(), expected);
    }

    #[rstest]
    #[case("10000000000000000")]
    #[case("1e17")]
    #[case("50000000000000000000000000000")]
    #[case("-99999999999999999999")]
    fn test_rejects_amounts_beyond_storage_range(#[case] raw: &str) {
        assert_eq!(
            AmountInput::Text(raw.into()).to_decimal(),
            Err(AmountError::OutOfRange)
        );
    }

    #[test]
    fn test_max_amount_constant() {
        assert_eq!(MAX_AMOUNT, dec!(9999999999999999.99));
        assert_eq!(MAX_AMOUNT.scale(), AMOUNT_SCALE);
    }

    #[serde_with::serde_as]
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Priced {
        #[serde_as(as = "AmountNumber")]
        price: Decimal,
        #[serde_as(as = "Option<AmountNumber>")]
        discount: Option<Decimal>,
    }

    #[test]
    fn test_amount_number_is_a_json_number() {
        let json = serde_json::to_value(Priced {
            price: dec!(9500.5),
            discount: None,
        })
        .unwrap();
        assert_eq!(json["price"], serde_json::json!(9500.5));
        assert!(json["price"].is_number());
        assert!(json["discount"].is_null());

        let back: Priced = serde_json::from_value(serde_json::json!({"price": 12.25, "discount": 1})).unwrap();
        assert_eq!(back.price, dec!(12.25));
        assert_eq!(back.discount, Some(dec!(1)));
    }

    #[test]
    fn test_rejects_blank() {
        let input = AmountInput::Text("   ".into());
        assert_eq!(input.to_decimal(), Err(AmountError::Empty));
    }

    #[test]
    fn test_from_decimal() {
        let input = AmountInput::from(dec!(16500));
        assert_eq!(input.to_decimal().unwrap(), dec!(16500));
    }
}
