//! Untyped expression tree
//!
//! Every typed handle in this crate lowers to an `Expr`. Engines serialize and
//! inspect queries through this tree only, dispatching on its variants with a
//! `Visitor`.

use std::fmt;

use crate::types::TypeDescriptor;
use crate::value::RawValue;
use crate::visitor::{ToStringVisitor, Visitor};

/// A reference to a stored attribute, e.g. `entry.amount`
#[derive(Debug, Clone, PartialEq)]
pub struct PathMetadata {
    /// Alias of the root entity the attribute belongs to
    pub root: String,
    /// Column name in storage
    pub column: String,
    /// Type of the stored column, which is what the driver delivers
    pub storage: TypeDescriptor,
    /// Type of the attribute after its codec has been applied
    pub value_type: TypeDescriptor,
}

/// A literal bound into the query
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub value: RawValue,
    pub value_type: TypeDescriptor,
}

/// Operators understood by the engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Sum,
    Min,
    Max,
    Count,
    /// Cast to the operation's declared type
    Cast,
    Eq,
    And,
}

impl Operator {
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Sum => "sum",
            Operator::Min => "min",
            Operator::Max => "max",
            Operator::Count => "count",
            Operator::Cast => "cast",
            Operator::Eq => "eq",
            Operator::And => "and",
        }
    }
}

/// An operator applied to argument expressions with a declared result type
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub operator: Operator,
    pub args: Vec<Expr>,
    pub value_type: TypeDescriptor,
}

impl Operation {
    pub fn new(operator: Operator, args: Vec<Expr>, value_type: TypeDescriptor) -> Self {
        Self {
            operator,
            args,
            value_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(Constant),
    Path(PathMetadata),
    Operation(Operation),
    /// A composite expression that builds its result from its arguments
    Factory {
        value_type: TypeDescriptor,
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Returns the declared result type
    pub fn value_type(&self) -> TypeDescriptor {
        match self {
            Expr::Constant(constant) => constant.value_type,
            Expr::Path(path) => path.value_type,
            Expr::Operation(operation) => operation.value_type,
            Expr::Factory { value_type, .. } => *value_type,
        }
    }

    /// Dispatches to the visitor callback matching this node
    pub fn accept<V, C>(&self, visitor: &mut V, context: C) -> V::Output
    where
        V: Visitor<C> + ?Sized,
    {
        match self {
            Expr::Constant(constant) => visitor.visit_constant(constant, context),
            Expr::Path(path) => visitor.visit_path(path, context),
            Expr::Operation(operation) => visitor.visit_operation(operation, context),
            Expr::Factory { value_type, args } => visitor.visit_factory(value_type, args, context),
        }
    }

    /// Replaces factory nodes with their arguments, recursively
    ///
    /// The result lists the leaf expressions an engine has to fetch, in the
    /// order factories expect their raw values.
    pub fn flatten(self) -> Vec<Expr> {
        match self {
            Expr::Factory { args, .. } => args.into_iter().flat_map(Expr::flatten).collect(),
            other => vec![other],
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.accept(&mut ToStringVisitor, ()))
    }
}

/// A boolean expression used in `WHERE` clauses
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate(Expr);

impl Predicate {
    pub fn new(expr: Expr) -> Self {
        Self(expr)
    }

    /// Combines two predicates with `AND`
    pub fn and(self, other: Predicate) -> Predicate {
        Predicate(Expr::Operation(Operation::new(
            Operator::And,
            vec![self.0, other.0],
            TypeDescriptor::INTEGER,
        )))
    }

    pub fn expr(&self) -> &Expr {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

/// An `ORDER BY` term
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSpecifier {
    pub expr: Expr,
    pub order: Order,
}
