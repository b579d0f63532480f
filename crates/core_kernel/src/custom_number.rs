//! Custom numeric type with precise decimal arithmetic
//!
//! `CustomNumber` is the domain's own number type. It is stored as text, so a
//! stored value reads back exactly. Aggregates computed by the database are
//! only as exact as its arithmetic. Values compare numerically, so `1332` and
//! `1332.0` are the same value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while building or combining custom numbers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomNumberError {
    #[error("Invalid number: '{0}'")]
    Invalid(String),

    #[error("Overflow during calculation")]
    Overflow,
}

/// A domain number backed by `rust_decimal`
///
/// Equality, ordering and hashing follow the numeric value, so the scale of
/// the underlying decimal is not significant for comparisons. `Display` keeps
/// the scale it was built with: `"1332.0"` prints as `1332.0`, `"1332"` as `1332`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomNumber(Decimal);

impl CustomNumber {
    /// Creates a custom number from a decimal value
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Parses a custom number from its decimal string form (e.g. `"111"`, `"1332.0"`)
    ///
    /// # Errors
    ///
    /// Returns `CustomNumberError::Invalid` when the text is not a decimal number
    pub fn parse(value: &str) -> Result<Self, CustomNumberError> {
        Decimal::from_str(value.trim())
            .map(Self)
            .map_err(|_| CustomNumberError::Invalid(value.to_string()))
    }

    /// Creates a zero value
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns true if the value is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the number of digits after the decimal point
    pub fn scale(&self) -> u32 {
        self.0.scale()
    }

    /// Checked addition that reports overflow instead of panicking
    pub fn checked_add(&self, other: &CustomNumber) -> Result<CustomNumber, CustomNumberError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(CustomNumberError::Overflow)
    }
}

impl Default for CustomNumber {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for CustomNumber {
    type Err = CustomNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for CustomNumber {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<CustomNumber> for Decimal {
    fn from(value: CustomNumber) -> Decimal {
        value.0
    }
}

impl fmt::Display for CustomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for CustomNumber {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("Overflow in CustomNumber::add")
    }
}

impl Neg for CustomNumber {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for CustomNumber {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(CustomNumber::zero(), |acc, n| acc + n)
    }
}

impl<'a> Sum<&'a CustomNumber> for CustomNumber {
    fn sum<I: Iterator<Item = &'a CustomNumber>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_integer_text() {
        let n = CustomNumber::parse("111").unwrap();
        assert_eq!(n.as_decimal(), dec!(111));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let result = CustomNumber::parse("eleven");
        assert!(matches!(result, Err(CustomNumberError::Invalid(_))));
    }

    #[test]
    fn test_equality_ignores_scale() {
        let whole = CustomNumber::parse("1332").unwrap();
        let scaled = CustomNumber::parse("1332.0").unwrap();
        assert_eq!(whole, scaled);
    }

    #[test]
    fn test_display_keeps_scale() {
        let n = CustomNumber::parse("1332.0").unwrap();
        assert_eq!(n.to_string(), "1332.0");
        assert_eq!(CustomNumber::parse("1332").unwrap().to_string(), "1332");
    }

    #[test]
    fn test_sum() {
        let total: CustomNumber = ["111", "222", "444", "555"]
            .iter()
            .map(|s| CustomNumber::parse(s).unwrap())
            .sum();
        assert_eq!(total, CustomNumber::new(dec!(1332)));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn display_then_parse_preserves_value(mantissa in -1_000_000_000i64..1_000_000_000i64, scale in 0u32..6u32) {
            let n = CustomNumber::new(Decimal::new(mantissa, scale));
            let parsed = CustomNumber::parse(&n.to_string()).unwrap();
            prop_assert_eq!(parsed, n);
            prop_assert_eq!(parsed.scale(), n.scale());
        }

        #[test]
        fn addition_is_commutative(a in -1_000_000i64..1_000_000i64, b in -1_000_000i64..1_000_000i64) {
            let na = CustomNumber::new(Decimal::new(a, 2));
            let nb = CustomNumber::new(Decimal::new(b, 1));
            prop_assert_eq!(na + nb, nb + na);
        }
    }
}
