//! SQL serialization
//!
//! `SqlSerializer` walks expression trees through the `Visitor` contract and
//! renders SQLite SQL. Constants are never inlined; they become `?`
//! placeholders with their values collected as bindings.

use query_dsl::{
    Constant, Expr, Operation, Operator, Order, OrderSpecifier, PathMetadata, Predicate,
    QueryError, RawValue, TypeDescriptor, TypeKind, Visitor,
};

/// Clause an expression is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    Select,
    Where,
    GroupBy,
    OrderBy,
}

/// The table a query reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub table: String,
    pub alias: String,
}

/// Everything needed to render one `SELECT`
#[derive(Debug, Clone, Default)]
pub struct QueryMetadata {
    /// Leaf expressions to fetch, already flattened
    pub projection: Vec<Expr>,
    pub source: Option<Source>,
    pub filter: Option<Predicate>,
    pub group_by: Vec<Expr>,
    pub order_by: Vec<OrderSpecifier>,
    pub limit: Option<u64>,
}

/// Rendered SQL with its positional bindings
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub bindings: Vec<RawValue>,
}

#[derive(Debug, Default)]
pub struct SqlSerializer {
    sql: String,
    bindings: Vec<RawValue>,
}

impl SqlSerializer {
    /// Renders a full `SELECT` statement
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidQuery` for an empty projection
    pub fn serialize(metadata: &QueryMetadata) -> Result<Statement, QueryError> {
        if metadata.projection.is_empty() {
            return Err(QueryError::InvalidQuery("empty projection".to_string()));
        }

        let mut serializer = SqlSerializer::default();

        serializer.sql.push_str("SELECT ");
        serializer.write_list(&metadata.projection, Clause::Select);

        if let Some(source) = &metadata.source {
            serializer.sql.push_str(" FROM ");
            serializer.sql.push_str(&source.table);
            serializer.sql.push(' ');
            serializer.sql.push_str(&source.alias);
        }

        if let Some(filter) = &metadata.filter {
            serializer.sql.push_str(" WHERE ");
            filter.expr().accept(&mut serializer, Clause::Where);
        }

        if !metadata.group_by.is_empty() {
            serializer.sql.push_str(" GROUP BY ");
            serializer.write_list(&metadata.group_by, Clause::GroupBy);
        }

        for (index, specifier) in metadata.order_by.iter().enumerate() {
            serializer.sql.push_str(if index == 0 { " ORDER BY " } else { ", " });
            specifier.expr.accept(&mut serializer, Clause::OrderBy);
            serializer.sql.push_str(match specifier.order {
                Order::Asc => " ASC",
                Order::Desc => " DESC",
            });
        }

        if let Some(limit) = metadata.limit {
            serializer.sql.push_str(&format!(" LIMIT {}", limit));
        }

        Ok(serializer.finish())
    }

    /// Renders a single expression, e.g. for logging or tests
    pub fn render(expr: &Expr, clause: Clause) -> Statement {
        let mut serializer = SqlSerializer::default();
        expr.accept(&mut serializer, clause);
        serializer.finish()
    }

    fn finish(self) -> Statement {
        Statement {
            sql: self.sql,
            bindings: self.bindings,
        }
    }

    fn write_list(&mut self, exprs: &[Expr], clause: Clause) {
        for (index, expr) in exprs.iter().enumerate() {
            if index > 0 {
                self.sql.push_str(", ");
            }
            expr.accept(&mut *self, clause);
        }
    }
}

/// SQLite type a cast to `target` renders as
///
/// SQLite has no decimal type, and `CAST(real AS TEXT)` keeps only 15
/// significant digits. Decimal casts are left to native coercion, which
/// sees the exact INTEGER or TEXT value and rejects an imprecise REAL.
fn cast_type(target: &TypeDescriptor) -> Option<&'static str> {
    match target.kind() {
        TypeKind::Text => Some("TEXT"),
        TypeKind::Integer => Some("INTEGER"),
        TypeKind::Real => Some("REAL"),
        TypeKind::Decimal | TypeKind::Custom => None,
    }
}

impl Visitor<Clause> for SqlSerializer {
    type Output = ();

    fn visit_constant(&mut self, constant: &Constant, _clause: Clause) {
        self.sql.push('?');
        self.bindings.push(constant.value.clone());
    }

    fn visit_path(&mut self, path: &PathMetadata, _clause: Clause) {
        self.sql.push_str(&path.root);
        self.sql.push('.');
        self.sql.push_str(&path.column);
    }

    fn visit_operation(&mut self, operation: &Operation, clause: Clause) {
        match operation.operator {
            Operator::Sum | Operator::Min | Operator::Max | Operator::Count => {
                self.sql.push_str(&operation.operator.name().to_uppercase());
                self.sql.push('(');
                self.write_list(&operation.args, clause);
                self.sql.push(')');
            }
            Operator::Cast => match cast_type(&operation.value_type) {
                Some(sql_type) => {
                    self.sql.push_str("CAST(");
                    self.write_list(&operation.args, clause);
                    self.sql.push_str(" AS ");
                    self.sql.push_str(sql_type);
                    self.sql.push(')');
                }
                // These casts only change how the result is coerced
                None => self.write_list(&operation.args, clause),
            },
            Operator::Eq | Operator::And => {
                let keyword = if operation.operator == Operator::Eq { " = " } else { " AND " };
                self.sql.push('(');
                for (index, arg) in operation.args.iter().enumerate() {
                    if index > 0 {
                        self.sql.push_str(keyword);
                    }
                    arg.accept(&mut *self, clause);
                }
                self.sql.push(')');
            }
        }
    }

    fn visit_factory(&mut self, _value_type: &TypeDescriptor, args: &[Expr], clause: Clause) {
        match clause {
            Clause::Select | Clause::GroupBy => self.write_list(args, clause),
            Clause::Where | Clause::OrderBy => {
                self.sql.push('(');
                self.write_list(args, clause);
                self.sql.push(')');
            }
        }
    }
}
