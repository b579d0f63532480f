//! Attribute paths and operations built from them

use std::fmt;
use std::sync::Arc;

use crate::codec::{NativeCodec, ValueCodec};
use crate::error::QueryError;
use crate::expr::{Constant, Expr, Operation, Operator, Order, OrderSpecifier, PathMetadata, Predicate};
use crate::expression::{single_value, Expression, Projection};
use crate::types::{NativeType, TypeDescriptor};
use crate::value::RawValue;

/// The root of a set of paths: a stored entity under an alias
pub trait EntityPath {
    /// Name of the backing table
    fn table_name(&self) -> &str;

    /// Alias every attribute path of this entity is rooted at
    fn alias(&self) -> &str;
}

/// A typed reference to a stored attribute
pub struct Path<T> {
    metadata: PathMetadata,
    codec: Arc<dyn ValueCodec<T>>,
}

impl<T> Path<T> {
    /// Creates a path whose column is converted through `codec`
    ///
    /// # Arguments
    ///
    /// * `root` - Alias of the owning entity
    /// * `column` - Column name in storage
    /// * `storage` - Type of the stored column
    /// * `value_type` - Type of the attribute once decoded
    /// * `codec` - Converter between the two
    pub fn new<C>(
        root: &str,
        column: &str,
        storage: TypeDescriptor,
        value_type: TypeDescriptor,
        codec: C,
    ) -> Self
    where
        C: ValueCodec<T> + 'static,
    {
        Self {
            metadata: PathMetadata {
                root: root.to_string(),
                column: column.to_string(),
                storage,
                value_type,
            },
            codec: Arc::new(codec),
        }
    }

    /// Creates a path for a column stored as the attribute's own native type
    pub fn native(root: &str, column: &str) -> Self
    where
        T: NativeType,
    {
        Self::new(root, column, T::DESCRIPTOR, T::DESCRIPTOR, NativeCodec::<T>::new())
    }

    pub fn metadata(&self) -> &PathMetadata {
        &self.metadata
    }

    /// Decodes a stored column value into the attribute type
    pub fn decode(&self, raw: RawValue) -> Result<T, QueryError> {
        self.codec.decode(raw)
    }

    /// Encodes an attribute value the way the column stores it
    pub fn encode(&self, value: &T) -> RawValue {
        self.codec.encode(value)
    }

    /// `sum(path)`, declared as the attribute's own type
    pub fn sum(&self) -> NumberExpression<T> {
        self.aggregate(Operator::Sum)
    }

    /// `min(path)`, declared as the attribute's own type
    pub fn min(&self) -> NumberExpression<T> {
        self.aggregate(Operator::Min)
    }

    /// `max(path)`, declared as the attribute's own type
    pub fn max(&self) -> NumberExpression<T> {
        self.aggregate(Operator::Max)
    }

    /// `count(path)`
    pub fn count(&self) -> NumberExpression<i64> {
        NumberExpression::new(
            Operation::new(Operator::Count, vec![self.to_expr()], TypeDescriptor::INTEGER),
            Arc::new(NativeCodec::<i64>::new()),
        )
    }

    /// `path = value`, with `value` encoded the same way the column is stored
    pub fn eq(&self, value: &T) -> Predicate {
        let constant = Expr::Constant(Constant {
            value: self.codec.encode(value),
            value_type: self.metadata.storage,
        });
        Predicate::new(Expr::Operation(Operation::new(
            Operator::Eq,
            vec![self.to_expr(), constant],
            TypeDescriptor::INTEGER,
        )))
    }

    pub fn asc(&self) -> OrderSpecifier {
        OrderSpecifier {
            expr: self.to_expr(),
            order: Order::Asc,
        }
    }

    pub fn desc(&self) -> OrderSpecifier {
        OrderSpecifier {
            expr: self.to_expr(),
            order: Order::Desc,
        }
    }

    fn aggregate(&self, operator: Operator) -> NumberExpression<T> {
        NumberExpression::new(
            Operation::new(operator, vec![self.to_expr()], self.metadata.value_type),
            Arc::clone(&self.codec),
        )
    }
}

impl<T> Clone for Path<T> {
    fn clone(&self) -> Self {
        Self {
            metadata: self.metadata.clone(),
            codec: Arc::clone(&self.codec),
        }
    }
}

impl<T> fmt::Debug for Path<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("metadata", &self.metadata)
            .field("codec", &self.codec)
            .finish()
    }
}

impl<T> Expression<T> for Path<T> {
    fn value_type(&self) -> TypeDescriptor {
        self.metadata.value_type
    }

    fn to_expr(&self) -> Expr {
        Expr::Path(self.metadata.clone())
    }
}

impl<T> Projection<T> for Path<T> {
    fn materialize(&self, values: &[RawValue]) -> Result<T, QueryError> {
        self.codec.decode(single_value(values)?)
    }
}

/// A numeric operation such as an aggregate or a cast
pub struct NumberExpression<T> {
    operation: Operation,
    codec: Arc<dyn ValueCodec<T>>,
}

impl<T> NumberExpression<T> {
    fn new(operation: Operation, codec: Arc<dyn ValueCodec<T>>) -> Self {
        Self { operation, codec }
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// `sum(self)`, declared as this expression's type
    pub fn sum(&self) -> NumberExpression<T> {
        NumberExpression::new(
            Operation::new(Operator::Sum, vec![self.to_expr()], self.operation.value_type),
            Arc::clone(&self.codec),
        )
    }

    /// Casts the result to a native numeric type
    ///
    /// The cast changes the declared type, so native coercion can handle the
    /// result even when this expression's own type is user-defined.
    pub fn cast_to_num<U: NativeType>(&self) -> NumberExpression<U> {
        NumberExpression::new(
            Operation::new(Operator::Cast, vec![self.to_expr()], U::DESCRIPTOR),
            Arc::new(NativeCodec::<U>::new()),
        )
    }
}

impl<T> Clone for NumberExpression<T> {
    fn clone(&self) -> Self {
        Self {
            operation: self.operation.clone(),
            codec: Arc::clone(&self.codec),
        }
    }
}

impl<T> fmt::Debug for NumberExpression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberExpression")
            .field("operation", &self.operation)
            .finish()
    }
}

impl<T> Expression<T> for NumberExpression<T> {
    fn value_type(&self) -> TypeDescriptor {
        self.operation.value_type
    }

    fn to_expr(&self) -> Expr {
        Expr::Operation(self.operation.clone())
    }
}

impl<T> Projection<T> for NumberExpression<T> {
    fn materialize(&self, values: &[RawValue]) -> Result<T, QueryError> {
        self.codec.decode(single_value(values)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_sum_keeps_attribute_type() {
        let amount: Path<Decimal> = Path::native("entry", "amount");
        assert_eq!(amount.sum().value_type(), TypeDescriptor::DECIMAL);
        assert_eq!(amount.sum().to_expr().to_string(), "sum(entry.amount)");
    }

    #[test]
    fn test_cast_changes_declared_type() {
        let amount: Path<String> = Path::native("entry", "amount");
        let cast = amount.sum().cast_to_num::<Decimal>();
        assert_eq!(cast.value_type(), TypeDescriptor::DECIMAL);
        assert_eq!(cast.to_expr().to_string(), "cast(sum(entry.amount), Decimal)");
    }

    #[test]
    fn test_count_is_integer() {
        let category: Path<String> = Path::native("entry", "category");
        assert_eq!(category.count().value_type(), TypeDescriptor::INTEGER);
    }

    #[test]
    fn test_eq_binds_encoded_constant() {
        let category: Path<String> = Path::native("entry", "category");
        let predicate = category.eq(&"aaa".to_string());
        assert_eq!(predicate.expr().to_string(), "entry.category = 'aaa'");
    }

    #[test]
    fn test_path_materialize_rejects_extra_values() {
        let category: Path<String> = Path::native("entry", "category");
        let err = category
            .materialize(&[RawValue::from("a"), RawValue::from("b")])
            .unwrap_err();
        assert_eq!(err, QueryError::ArityMismatch { expected: 1, found: 2 });
    }
}
