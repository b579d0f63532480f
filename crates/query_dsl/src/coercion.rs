//! Native result coercion
//!
//! Between decoding a row and materializing it, an engine normalizes every
//! raw value to the result type of the column that produced it. Attribute
//! paths are normalized to their storage type, because their codec finishes
//! the job. Every other expression is normalized to its declared type, and a
//! user-defined declared type cannot be produced here:
//!
//! ```text
//! select sum(entry.amount)            -> Unsupported target type : CustomNumber
//! select cast(sum(entry.amount), Decimal) -> Decimal
//! ```
//!
//! A REAL only converts to `Decimal` when it has at most 14 significant
//! digits. Anything longer may already have been rounded by the database's
//! float arithmetic and fails with `QueryError::Conversion`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::QueryError;
use crate::expr::Expr;
use crate::types::{TypeDescriptor, TypeKind};
use crate::value::RawValue;

/// Returns the type a fetched column is coerced to
///
/// # Errors
///
/// * `QueryError::UnsupportedTargetType` for a user-defined declared type
/// * `QueryError::InvalidQuery` for a factory node, which is never fetched directly
pub fn result_type(expr: &Expr) -> Result<TypeDescriptor, QueryError> {
    let descriptor = match expr {
        Expr::Path(path) => path.storage,
        Expr::Constant(constant) => constant.value_type,
        Expr::Operation(operation) => operation.value_type,
        Expr::Factory { value_type, .. } => {
            return Err(QueryError::InvalidQuery(format!(
                "factory {} must be flattened before coercion",
                value_type
            )))
        }
    };

    if descriptor.is_custom() {
        return Err(QueryError::UnsupportedTargetType(descriptor.name().to_string()));
    }
    Ok(descriptor)
}

/// Normalizes a raw value to `target`
///
/// `NULL` passes through unchanged for every target.
pub fn coerce(raw: RawValue, target: &TypeDescriptor) -> Result<RawValue, QueryError> {
    match (target.kind(), raw) {
        (_, RawValue::Null) => Ok(RawValue::Null),
        (TypeKind::Custom, _) => Err(QueryError::UnsupportedTargetType(target.name().to_string())),

        (TypeKind::Text, RawValue::Text(s)) => Ok(RawValue::Text(s)),
        (TypeKind::Text, RawValue::Integer(i)) => Ok(RawValue::Text(i.to_string())),
        (TypeKind::Text, RawValue::Decimal(d)) => Ok(RawValue::Text(d.to_string())),
        (TypeKind::Text, RawValue::Real(r)) => Ok(RawValue::Text(format!("{:?}", r))),

        (TypeKind::Integer, RawValue::Integer(i)) => Ok(RawValue::Integer(i)),
        (TypeKind::Integer, RawValue::Real(r)) if r.fract() == 0.0 => r
            .to_i64()
            .map(RawValue::Integer)
            .ok_or_else(|| QueryError::conversion(format!("{} does not fit in an integer", r))),
        (TypeKind::Integer, RawValue::Decimal(d)) if d.fract().is_zero() => d
            .to_i64()
            .map(RawValue::Integer)
            .ok_or_else(|| QueryError::conversion(format!("{} does not fit in an integer", d))),
        (TypeKind::Integer, RawValue::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(RawValue::Integer)
            .map_err(|_| QueryError::conversion(format!("'{}' is not an integer", s))),

        (TypeKind::Real, RawValue::Real(r)) => Ok(RawValue::Real(r)),
        (TypeKind::Real, RawValue::Integer(i)) => Ok(RawValue::Real(i as f64)),
        (TypeKind::Real, RawValue::Decimal(d)) => d
            .to_f64()
            .map(RawValue::Real)
            .ok_or_else(|| QueryError::conversion(format!("{} is not representable as a real", d))),
        (TypeKind::Real, RawValue::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(RawValue::Real)
            .map_err(|_| QueryError::conversion(format!("'{}' is not a real number", s))),

        (TypeKind::Decimal, RawValue::Decimal(d)) => Ok(RawValue::Decimal(d)),
        (TypeKind::Decimal, RawValue::Integer(i)) => Ok(RawValue::Decimal(Decimal::from(i))),
        (TypeKind::Decimal, RawValue::Real(r)) => real_to_decimal(r).map(RawValue::Decimal),
        (TypeKind::Decimal, RawValue::Text(s)) => parse_decimal(&s).map(RawValue::Decimal),

        (_, other) => Err(QueryError::type_mismatch(target.name(), &other)),
    }
}

/// Coerces a whole row, one target per value
pub fn coerce_row(values: Vec<RawValue>, targets: &[TypeDescriptor]) -> Result<Vec<RawValue>, QueryError> {
    if values.len() != targets.len() {
        return Err(QueryError::ArityMismatch {
            expected: targets.len(),
            found: values.len(),
        });
    }

    values
        .into_iter()
        .zip(targets)
        .map(|(value, target)| coerce(value, target))
        .collect()
}

/// Significant digits a REAL reproduces exactly
const REAL_DIGITS: usize = 15;

fn real_to_decimal(real: f64) -> Result<Decimal, QueryError> {
    if !real.is_finite() {
        return Err(QueryError::conversion(format!("{} is not a decimal", real)));
    }
    let rendered = format!("{:.*e}", REAL_DIGITS - 1, real);
    let decimal = Decimal::from_scientific(&rendered)
        .map_err(|e| QueryError::conversion(format!("{} is not a decimal: {}", real, e)))?
        .normalize();

    if decimal.mantissa().unsigned_abs().to_string().len() >= REAL_DIGITS {
        return Err(QueryError::conversion(format!(
            "{} has more significant digits than a real keeps exactly",
            rendered
        )));
    }
    Ok(decimal)
}

// SQLite prints large reals in scientific notation
fn parse_decimal(text: &str) -> Result<Decimal, QueryError> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| QueryError::conversion(format!("'{}' is not a decimal", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Operation, Operator, PathMetadata};
    use rust_decimal_macros::dec;

    const CUSTOM: TypeDescriptor = TypeDescriptor::custom("CustomNumber");

    fn amount_path() -> Expr {
        Expr::Path(PathMetadata {
            root: "entry".to_string(),
            column: "amount".to_string(),
            storage: TypeDescriptor::TEXT,
            value_type: CUSTOM,
        })
    }

    #[test]
    fn test_path_coerces_to_storage_type() {
        assert_eq!(result_type(&amount_path()), Ok(TypeDescriptor::TEXT));
    }

    #[test]
    fn test_aggregate_over_custom_type_is_unsupported() {
        let sum = Expr::Operation(Operation::new(Operator::Sum, vec![amount_path()], CUSTOM));
        assert_eq!(
            result_type(&sum),
            Err(QueryError::UnsupportedTargetType("CustomNumber".to_string()))
        );
    }

    #[test]
    fn test_text_to_decimal_keeps_scale() {
        let value = coerce(RawValue::from("1332.0"), &TypeDescriptor::DECIMAL).unwrap();
        match value {
            RawValue::Decimal(d) => {
                assert_eq!(d, dec!(1332));
                assert_eq!(d.to_string(), "1332.0");
            }
            other => panic!("expected a decimal, got {:?}", other),
        }
    }

    #[test]
    fn test_scientific_text_to_decimal() {
        let value = coerce(RawValue::from("1.5e3"), &TypeDescriptor::DECIMAL).unwrap();
        assert_eq!(value, RawValue::Decimal(dec!(1500)));
    }

    #[test]
    fn test_real_to_decimal_drops_float_noise() {
        assert_eq!(
            coerce(RawValue::Real(3.75), &TypeDescriptor::DECIMAL),
            Ok(RawValue::Decimal(dec!(3.75)))
        );
        assert_eq!(
            coerce(RawValue::Real(0.1 + 0.2), &TypeDescriptor::DECIMAL),
            Ok(RawValue::Decimal(dec!(0.3)))
        );
    }

    #[test]
    fn test_real_beyond_exact_digits_is_rejected() {
        let err = coerce(RawValue::Real(12345678901234.56 + 0.01), &TypeDescriptor::DECIMAL)
            .unwrap_err();
        assert!(matches!(err, QueryError::Conversion(_)));
    }

    #[test]
    fn test_non_finite_real_is_rejected() {
        let err = coerce(RawValue::Real(f64::NAN), &TypeDescriptor::DECIMAL).unwrap_err();
        assert!(matches!(err, QueryError::Conversion(_)));
    }

    #[test]
    fn test_null_passes_through() {
        assert_eq!(coerce(RawValue::Null, &TypeDescriptor::DECIMAL), Ok(RawValue::Null));
    }

    #[test]
    fn test_fractional_real_is_not_an_integer() {
        let err = coerce(RawValue::Real(1.5), &TypeDescriptor::INTEGER).unwrap_err();
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn test_coerce_row_checks_width() {
        let err = coerce_row(vec![RawValue::Integer(1)], &[]).unwrap_err();
        assert_eq!(err, QueryError::ArityMismatch { expected: 0, found: 1 });
    }
}
