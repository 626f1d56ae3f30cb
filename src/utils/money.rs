use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Number of minor units (cents, paise) per major unit.
const MINOR_PER_MAJOR: i64 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("not a number")]
    NotANumber,
    #[error("more than two decimal places")]
    TooPrecise,
    #[error("amount out of range")]
    OutOfRange,
    #[error("amount must not be negative")]
    Negative,
}

/// An amount held as integer minor units so equality is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    pub fn from_major(major: i64) -> Option<Self> {
        major.checked_mul(MINOR_PER_MAJOR).map(Money)
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2).normalize()
    }

    /// Convert a non-negative decimal with at most two fractional digits.
    pub fn from_decimal(value: Decimal) -> Result<Self, MoneyError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MoneyError::Negative);
        }
        let value = value.normalize();
        if value.scale() > 2 {
            return Err(MoneyError::TooPrecise);
        }
        value
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|minor| minor.to_i64())
            .map(Money)
            .ok_or(MoneyError::OutOfRange)
    }

    /// Parse a JSON number or numeric string.
    pub fn from_json(value: &Value) -> Result<Self, MoneyError> {
        match value {
            Value::Number(n) => Self::parse(&n.to_string()),
            Value::String(s) => Self::parse(s),
            _ => Err(MoneyError::NotANumber),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, MoneyError> {
        let raw = raw.trim();
        let value = Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map_err(|_| overflow_or_garbage(raw))?;
        Self::from_decimal(value)
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Multiply by a rate and round half away from zero to a whole major unit.
    pub fn convert_rounded(self, rate: Decimal) -> Option<Money> {
        let converted = self
            .to_decimal()
            .checked_mul(rate)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        converted
            .to_i64()
            .and_then(Money::from_major)
    }
}

/// Well-formed numbers too large for `Decimal` are out of range, not garbage.
fn overflow_or_garbage(raw: &str) -> MoneyError {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => MoneyError::OutOfRange,
        _ => MoneyError::NotANumber,
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

/// Whole amounts go out as JSON integers; anything with a fractional part
/// goes out as an exact decimal string, never through `f64`.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % MINOR_PER_MAJOR == 0 {
            serializer.serialize_i64(self.0 / MINOR_PER_MAJOR)
        } else {
            serializer.collect_str(&self.to_decimal())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(Money::parse("2000"), Ok(Money::from_minor(200_000)));
        assert_eq!(Money::parse(" 1500.5 "), Ok(Money::from_minor(150_050)));
        assert_eq!(Money::parse("0.10"), Ok(Money::from_minor(10)));
    }

    #[test]
    fn test_parse_rejects_garbage_and_precision() {
        assert_eq!(Money::parse("abc"), Err(MoneyError::NotANumber));
        assert_eq!(Money::parse("1.005"), Err(MoneyError::TooPrecise));
        assert_eq!(Money::parse("-5"), Err(MoneyError::Negative));
    }

    #[test]
    fn test_from_json_number_and_string() {
        assert_eq!(Money::from_json(&json!(1000)), Ok(Money::from_minor(100_000)));
        assert_eq!(Money::from_json(&json!(1000.0)), Ok(Money::from_minor(100_000)));
        assert_eq!(Money::from_json(&json!("250.25")), Ok(Money::from_minor(25_025)));
        assert_eq!(Money::from_json(&json!(true)), Err(MoneyError::NotANumber));
    }

    #[test]
    fn test_decimal_sum_is_exact() {
        // 0.1 + 0.2 must equal 0.3 exactly
        let a = Money::parse("0.1").unwrap();
        let b = Money::parse("0.2").unwrap();
        assert_eq!(a.checked_add(b), Some(Money::parse("0.3").unwrap()));
    }

    #[test]
    fn test_convert_rounded() {
        let usd = Money::from_major(1000).unwrap();
        assert_eq!(
            usd.convert_rounded(Decimal::from(83)),
            Money::from_major(83_000)
        );

        // 10.50 * 83 = 871.5 rounds up
        let usd = Money::from_minor(1050);
        assert_eq!(
            usd.convert_rounded(Decimal::from(83)),
            Money::from_major(872)
        );
    }

    #[test]
    fn test_display_and_serialize() {
        assert_eq!(Money::from_minor(200_000).to_string(), "2000");
        assert_eq!(Money::from_minor(150_050).to_string(), "1500.5");
        assert_eq!(serde_json::to_value(Money::from_minor(200_000)).unwrap(), json!(2000));
        assert_eq!(serde_json::to_value(Money::from_minor(150_050)).unwrap(), json!("1500.5"));
    }

    #[test]
    fn test_serialize_large_fractional_is_exact() {
        // 2^53 + 1 paise has no exact f64 representation
        let amount = Money::from_minor(9_007_199_254_740_993);
        assert_eq!(
            serde_json::to_value(amount).unwrap(),
            json!("90071992547409.93")
        );
        assert_eq!(
            Money::from_json(&serde_json::to_value(amount).unwrap()),
            Ok(amount)
        );
    }

    #[test]
    fn test_parse_overflow_is_out_of_range() {
        assert_eq!(Money::parse("1e40"), Err(MoneyError::OutOfRange));
        assert_eq!(Money::parse("1e30"), Err(MoneyError::OutOfRange));
        assert_eq!(
            Money::parse("1000000000000000000000000000000000000"),
            Err(MoneyError::OutOfRange)
        );
        assert_eq!(Money::from_json(&json!(1e40)), Err(MoneyError::OutOfRange));
        assert_eq!(Money::parse("NaN"), Err(MoneyError::NotANumber));
        assert_eq!(Money::parse("inf"), Err(MoneyError::NotANumber));
    }
}
