//! Result type coercion adapter
//!
//! Native coercion refuses aggregates whose declared type is user-defined.
//! `TypeWrapper` wraps a natively coercible child (typically a cast of that
//! aggregate) and reports itself as a factory, so the engine hands it the
//! child's raw value and lets it build the domain value itself.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::QueryError;
use crate::expr::Expr;
use crate::expression::{Expression, FactoryExpression, Projection};
use crate::types::{NativeType, TypeDescriptor};
use crate::value::RawValue;
use crate::visitor::Visitor;

/// Converts the raw result of one child expression into a `T`
///
/// Arity is always one. Construction does not validate anything: if the
/// engine delivers a value that is not an `S`, `new_instance` fails with
/// `QueryError::TypeMismatch`.
pub struct TypeWrapper<S, T> {
    value_type: TypeDescriptor,
    factory: Arc<dyn Fn(S) -> T + Send + Sync>,
    args: [Expr; 1],
}

impl<S: NativeType, T> TypeWrapper<S, T> {
    /// Wraps `arg`, declaring `value_type` and converting with `factory`
    ///
    /// # Example
    ///
    /// ```rust
    /// use query_dsl::{Expression, FactoryExpression, Path, RawValue, TypeDescriptor, TypeWrapper};
    /// use rust_decimal::Decimal;
    ///
    /// let amount: Path<String> = Path::native("entry", "amount");
    /// let total = TypeWrapper::new(
    ///     amount.sum().cast_to_num::<Decimal>(),
    ///     TypeDescriptor::TEXT,
    ///     |value: Decimal| value.to_string(),
    /// );
    ///
    /// assert_eq!(total.args().len(), 1);
    /// assert_eq!(
    ///     total.new_instance(&[RawValue::Decimal(Decimal::new(13320, 1))]).unwrap(),
    ///     "1332.0"
    /// );
    /// ```
    pub fn new<E, F>(arg: E, value_type: TypeDescriptor, factory: F) -> Self
    where
        E: Expression<S>,
        F: Fn(S) -> T + Send + Sync + 'static,
    {
        Self {
            value_type,
            factory: Arc::new(factory),
            args: [arg.to_expr()],
        }
    }

    /// Returns the wrapped child expression
    pub fn arg(&self) -> &Expr {
        &self.args[0]
    }
}

impl<S, T> Clone for TypeWrapper<S, T> {
    fn clone(&self) -> Self {
        Self {
            value_type: self.value_type,
            factory: Arc::clone(&self.factory),
            args: self.args.clone(),
        }
    }
}

impl<S, T> fmt::Debug for TypeWrapper<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeWrapper")
            .field("value_type", &self.value_type)
            .field("arg", &self.args[0])
            .finish()
    }
}

impl<S: NativeType, T> Expression<T> for TypeWrapper<S, T> {
    fn value_type(&self) -> TypeDescriptor {
        self.value_type
    }

    fn to_expr(&self) -> Expr {
        Expr::Factory {
            value_type: self.value_type,
            args: self.args.to_vec(),
        }
    }

    fn accept<V, C>(&self, visitor: &mut V, context: C) -> V::Output
    where
        V: Visitor<C>,
    {
        visitor.visit_factory(&self.value_type, &self.args, context)
    }
}

impl<S: NativeType, T> FactoryExpression<T> for TypeWrapper<S, T> {
    fn args(&self) -> &[Expr] {
        &self.args
    }

    fn new_instance(&self, args: &[RawValue]) -> Result<T, QueryError> {
        debug!(target_type = %self.value_type, arg = %self.args[0], "TypeWrapper::new_instance called");

        let raw = args.first().cloned().ok_or(QueryError::ArityMismatch {
            expected: 1,
            found: 0,
        })?;
        let source = S::from_raw(raw)?;
        Ok((self.factory)(source))
    }
}

impl<S: NativeType, T> Projection<T> for TypeWrapper<S, T> {
    fn materialize(&self, values: &[RawValue]) -> Result<T, QueryError> {
        self.new_instance(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn doubled() -> TypeWrapper<i64, i64> {
        TypeWrapper::new(
            Path::<i64>::native("t", "n").sum(),
            TypeDescriptor::INTEGER,
            |n: i64| n * 2,
        )
    }

    #[test]
    fn test_value_type_is_target() {
        assert_eq!(doubled().value_type(), TypeDescriptor::INTEGER);
    }

    #[test]
    fn test_args_is_the_single_child() {
        let child = Path::<i64>::native("t", "n").sum().to_expr();
        assert_eq!(doubled().args(), &[child]);
    }

    #[test]
    fn test_new_instance_applies_factory() {
        assert_eq!(doubled().new_instance(&[RawValue::Integer(21)]), Ok(42));
    }

    #[test]
    fn test_new_instance_rejects_wrong_runtime_type() {
        let err = doubled()
            .new_instance(&[RawValue::Decimal(dec!(21))])
            .unwrap_err();
        assert_eq!(
            err,
            QueryError::TypeMismatch {
                expected: "Integer".to_string(),
                found: "Decimal".to_string()
            }
        );
    }

    #[test]
    fn test_new_instance_without_values() {
        assert_eq!(
            doubled().new_instance(&[]),
            Err(QueryError::ArityMismatch { expected: 1, found: 0 })
        );
    }

    #[test]
    fn test_optional_source_tolerates_null() {
        let wrapper: TypeWrapper<Option<Decimal>, Decimal> = TypeWrapper::new(
            Path::<Decimal>::native("t", "n").sum().cast_to_num::<Option<Decimal>>(),
            TypeDescriptor::DECIMAL,
            |value: Option<Decimal>| value.unwrap_or_default(),
        );
        assert_eq!(wrapper.new_instance(&[RawValue::Null]), Ok(Decimal::ZERO));
    }
}
