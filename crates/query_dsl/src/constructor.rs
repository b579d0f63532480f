//! Constructor projections
//!
//! A `ConstructorExpression` selects several expressions and passes their
//! materialized values to a Rust constructor, one result per row.

use std::fmt;
use std::sync::Arc;

use crate::error::QueryError;
use crate::expr::Expr;
use crate::expression::{Expression, FactoryExpression, Projection};
use crate::types::TypeDescriptor;
use crate::value::RawValue;
use crate::visitor::Visitor;

type Builder<T> = dyn Fn(&[RawValue]) -> Result<T, QueryError> + Send + Sync;

pub struct ConstructorExpression<T> {
    value_type: TypeDescriptor,
    args: Vec<Expr>,
    builder: Arc<Builder<T>>,
}

impl<T: 'static> ConstructorExpression<T> {
    /// Creates a constructor from raw argument expressions and a row builder
    ///
    /// The builder receives the flattened values of `args`.
    pub fn new<F>(value_type: TypeDescriptor, args: Vec<Expr>, builder: F) -> Self
    where
        F: Fn(&[RawValue]) -> Result<T, QueryError> + Send + Sync + 'static,
    {
        Self {
            value_type,
            args,
            builder: Arc::new(builder),
        }
    }

    /// Creates a two-argument constructor
    ///
    /// Each argument materializes from its own slice of the row, so either
    /// one may itself be a factory spanning several columns.
    pub fn of2<A, B, P, Q, F>(value_type: TypeDescriptor, first: P, second: Q, constructor: F) -> Self
    where
        A: 'static,
        B: 'static,
        P: Projection<A> + 'static,
        Q: Projection<B> + 'static,
        F: Fn(A, B) -> T + Send + Sync + 'static,
    {
        let args = vec![first.to_expr(), second.to_expr()];
        let split = first.columns().len();
        let width = split + second.columns().len();

        Self::new(value_type, args, move |values: &[RawValue]| {
            if values.len() != width {
                return Err(QueryError::ArityMismatch {
                    expected: width,
                    found: values.len(),
                });
            }
            let (head, tail) = values.split_at(split);
            let a = first.materialize(head)?;
            let b = second.materialize(tail)?;
            Ok(constructor(a, b))
        })
    }
}

impl<T> Clone for ConstructorExpression<T> {
    fn clone(&self) -> Self {
        Self {
            value_type: self.value_type,
            args: self.args.clone(),
            builder: Arc::clone(&self.builder),
        }
    }
}

impl<T> fmt::Debug for ConstructorExpression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorExpression")
            .field("value_type", &self.value_type)
            .field("args", &self.args)
            .finish()
    }
}

impl<T> Expression<T> for ConstructorExpression<T> {
    fn value_type(&self) -> TypeDescriptor {
        self.value_type
    }

    fn to_expr(&self) -> Expr {
        Expr::Factory {
            value_type: self.value_type,
            args: self.args.clone(),
        }
    }

    fn accept<V, C>(&self, visitor: &mut V, context: C) -> V::Output
    where
        V: Visitor<C>,
    {
        visitor.visit_factory(&self.value_type, &self.args, context)
    }
}

impl<T> FactoryExpression<T> for ConstructorExpression<T> {
    fn args(&self) -> &[Expr] {
        &self.args
    }

    fn new_instance(&self, args: &[RawValue]) -> Result<T, QueryError> {
        (self.builder)(args)
    }
}

impl<T> Projection<T> for ConstructorExpression<T> {
    fn materialize(&self, values: &[RawValue]) -> Result<T, QueryError> {
        self.new_instance(values)
    }
}
