//! Raw scalar values as delivered by a storage driver

use rust_decimal::Decimal;
use std::fmt;

/// A scalar decoded by the storage driver before any domain conversion
///
/// The variant reflects what the driver produced, not what the query
/// declared. Native coercion normalizes it to the declared type afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Decimal(Decimal),
}

impl RawValue {
    /// Returns the runtime type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "Null",
            RawValue::Integer(_) => "Integer",
            RawValue::Real(_) => "Real",
            RawValue::Text(_) => "Text",
            RawValue::Decimal(_) => "Decimal",
        }
    }

    /// Returns true for SQL `NULL`
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => write!(f, "null"),
            RawValue::Integer(i) => write!(f, "{}", i),
            RawValue::Real(r) => write!(f, "{:?}", r),
            RawValue::Text(s) => write!(f, "'{}'", s),
            RawValue::Decimal(d) => write!(f, "{}", d),
        }
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Real(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<Decimal> for RawValue {
    fn from(value: Decimal) -> Self {
        RawValue::Decimal(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Null, Into::into)
    }
}
