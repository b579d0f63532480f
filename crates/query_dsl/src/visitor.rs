//! Visitor contract for walking expression trees
//!
//! Engines never match on concrete typed handles. They lower a handle to an
//! `Expr` and walk it through these four callbacks, so any composite
//! expression that reports itself as a factory is handled uniformly.

use crate::expr::{Constant, Expr, Operation, Operator, PathMetadata};
use crate::types::TypeDescriptor;

/// Double-dispatch target for `Expr::accept`
///
/// `C` is a context value handed down by the caller, e.g. the SQL clause being
/// rendered. It is passed by value so visitors can re-use it for children.
pub trait Visitor<C> {
    type Output;

    fn visit_constant(&mut self, constant: &Constant, context: C) -> Self::Output;

    fn visit_path(&mut self, path: &PathMetadata, context: C) -> Self::Output;

    fn visit_operation(&mut self, operation: &Operation, context: C) -> Self::Output;

    fn visit_factory(&mut self, value_type: &TypeDescriptor, args: &[Expr], context: C) -> Self::Output;
}

/// Renders expressions in a compact, engine-independent form
///
/// `sum(entry.amount)`, `cast(sum(entry.amount), Decimal)`,
/// `new CategoryTotal(entry.category, entry.amount)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ToStringVisitor;

impl ToStringVisitor {
    fn join(&mut self, args: &[Expr]) -> String {
        args.iter()
            .map(|arg| arg.accept(&mut *self, ()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Visitor<()> for ToStringVisitor {
    type Output = String;

    fn visit_constant(&mut self, constant: &Constant, _: ()) -> String {
        constant.value.to_string()
    }

    fn visit_path(&mut self, path: &PathMetadata, _: ()) -> String {
        format!("{}.{}", path.root, path.column)
    }

    fn visit_operation(&mut self, operation: &Operation, _: ()) -> String {
        match operation.operator {
            Operator::Cast => format!(
                "cast({}, {})",
                self.join(&operation.args),
                operation.value_type
            ),
            Operator::Eq | Operator::And => {
                let symbol = if operation.operator == Operator::Eq { " = " } else { " && " };
                operation
                    .args
                    .iter()
                    .map(|arg| arg.accept(&mut *self, ()))
                    .collect::<Vec<_>>()
                    .join(symbol)
            }
            other => format!("{}({})", other.name(), self.join(&operation.args)),
        }
    }

    fn visit_factory(&mut self, value_type: &TypeDescriptor, args: &[Expr], _: ()) -> String {
        format!("new {}({})", value_type, self.join(args))
    }
}
