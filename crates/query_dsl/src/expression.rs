//! Typed expression handles
//!
//! `Expression<T>` is anything whose result is a `T`. `FactoryExpression<T>`
//! builds its result from the raw values of its arguments, and
//! `Projection<T>` is the contract an engine uses to turn a fetched row into a
//! `T`.

use std::fmt;

use crate::error::QueryError;
use crate::expr::Expr;
use crate::types::TypeDescriptor;
use crate::value::RawValue;
use crate::visitor::Visitor;

pub trait Expression<T>: fmt::Debug + Send + Sync {
    /// Declared result type
    fn value_type(&self) -> TypeDescriptor;

    /// Lowers the handle to the untyped tree
    fn to_expr(&self) -> Expr;

    fn accept<V, C>(&self, visitor: &mut V, context: C) -> V::Output
    where
        V: Visitor<C>,
        Self: Sized,
    {
        self.to_expr().accept(visitor, context)
    }
}

/// A composite expression that constructs its result from its arguments
pub trait FactoryExpression<T>: Expression<T> {
    /// Argument expressions, in the order `new_instance` expects their values
    fn args(&self) -> &[Expr];

    /// Builds a result from the raw values fetched for `args`
    fn new_instance(&self, args: &[RawValue]) -> Result<T, QueryError>;
}

/// Something a query can select
pub trait Projection<T>: Expression<T> {
    /// Leaf expressions to fetch for every result row
    fn columns(&self) -> Vec<Expr> {
        self.to_expr().flatten()
    }

    /// Builds one result from values coerced in `columns` order
    fn materialize(&self, values: &[RawValue]) -> Result<T, QueryError>;
}

impl<T, E: Expression<T> + ?Sized> Expression<T> for &E {
    fn value_type(&self) -> TypeDescriptor {
        (**self).value_type()
    }

    fn to_expr(&self) -> Expr {
        (**self).to_expr()
    }
}

impl<T, P: Projection<T> + ?Sized> Projection<T> for &P {
    fn columns(&self) -> Vec<Expr> {
        (**self).columns()
    }

    fn materialize(&self, values: &[RawValue]) -> Result<T, QueryError> {
        (**self).materialize(values)
    }
}

/// Returns the only value of a single-column row
pub(crate) fn single_value(values: &[RawValue]) -> Result<RawValue, QueryError> {
    match values {
        [value] => Ok(value.clone()),
        other => Err(QueryError::ArityMismatch {
            expected: 1,
            found: other.len(),
        }),
    }
}
