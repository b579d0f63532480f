//! Query builder and executor
//!
//! A `SqlQuery<T>` selects one `Projection<T>`. Executing it renders the
//! projection's leaf columns, decodes every fetched row, coerces each value
//! to its column's result type and lets the projection build the result.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_entry::{QCategoryTotal, ENTRY};
//! use infra_db::SqlQuery;
//!
//! let totals = SqlQuery::select(QCategoryTotal::new(ENTRY.category.clone(), ENTRY.amount_total()))
//!     .from(&*ENTRY)
//!     .group_by(&ENTRY.category)
//!     .order_by(ENTRY.category.asc())
//!     .fetch(&pool)
//!     .await?;
//! ```

use query_dsl::coercion::{coerce_row, result_type};
use query_dsl::{
    EntityPath, Expr, Expression, OrderSpecifier, Predicate, Projection, QueryError, RawValue,
    TypeDescriptor,
};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use tracing::debug;

use crate::error::DatabaseError;
use crate::pool::DatabasePool;
use crate::row::decode_row;
use crate::serializer::{QueryMetadata, Source, SqlSerializer, Statement};

pub struct SqlQuery<'a, T> {
    projection: Box<dyn Projection<T> + 'a>,
    source: Option<Source>,
    filter: Option<Predicate>,
    group_by: Vec<Expr>,
    order_by: Vec<OrderSpecifier>,
    limit: Option<u64>,
}

impl<'a, T> SqlQuery<'a, T> {
    /// Starts a query selecting `projection`
    pub fn select<P>(projection: P) -> Self
    where
        P: Projection<T> + 'a,
    {
        Self {
            projection: Box::new(projection),
            source: None,
            filter: None,
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    pub fn from<E: EntityPath + ?Sized>(mut self, entity: &E) -> Self {
        self.source = Some(Source {
            table: entity.table_name().to_string(),
            alias: entity.alias().to_string(),
        });
        self
    }

    /// Adds a `WHERE` predicate, combined with `AND` if one is already set
    pub fn where_(mut self, predicate: Predicate) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn group_by<X, E: Expression<X>>(mut self, expr: &E) -> Self {
        self.group_by.push(expr.to_expr());
        self
    }

    pub fn order_by(mut self, specifier: OrderSpecifier) -> Self {
        self.order_by.push(specifier);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Renders the statement this query executes
    pub fn statement(&self) -> Result<Statement, QueryError> {
        SqlSerializer::serialize(&self.metadata(self.projection.columns()))
    }

    /// Fetches every result
    ///
    /// # Errors
    ///
    /// * `DatabaseError::Query` if a column's result type cannot be coerced
    ///   natively, or a row cannot be materialized
    /// * `DatabaseError::SqlError` if SQLite rejects the statement
    pub async fn fetch(&self, pool: &DatabasePool) -> Result<Vec<T>, DatabaseError> {
        let columns = self.projection.columns();
        let targets = columns
            .iter()
            .map(result_type)
            .collect::<Result<Vec<TypeDescriptor>, QueryError>>()?;
        let statement = SqlSerializer::serialize(&self.metadata(columns))?;

        debug!(sql = %statement.sql, bindings = statement.bindings.len(), "Executing query");

        let query = statement
            .bindings
            .iter()
            .fold(sqlx::query(&statement.sql), bind_value);
        let rows = query.fetch_all(pool).await?;

        debug!(rows = rows.len(), "Query returned");

        rows.iter()
            .map(|row| -> Result<T, DatabaseError> {
                let values = coerce_row(decode_row(row)?, &targets)?;
                Ok(self.projection.materialize(&values)?)
            })
            .collect()
    }

    /// Fetches at most one result
    ///
    /// # Errors
    ///
    /// Returns `QueryError::NonUniqueResult` (wrapped) if more than one row matches
    pub async fn fetch_one(&self, pool: &DatabasePool) -> Result<Option<T>, DatabaseError> {
        let mut results = self.fetch(pool).await?;
        match results.len() {
            0 | 1 => Ok(results.pop()),
            found => Err(QueryError::NonUniqueResult(found).into()),
        }
    }

    fn metadata(&self, projection: Vec<Expr>) -> QueryMetadata {
        QueryMetadata {
            projection,
            source: self.source.clone(),
            filter: self.filter.clone(),
            group_by: self.group_by.clone(),
            order_by: self.order_by.clone(),
            limit: self.limit,
        }
    }
}

/// Binds a raw value as the next positional parameter
pub(crate) fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &RawValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        RawValue::Null => query.bind(None::<String>),
        RawValue::Integer(i) => query.bind(*i),
        RawValue::Real(r) => query.bind(*r),
        RawValue::Text(s) => query.bind(s.clone()),
        RawValue::Decimal(d) => query.bind(d.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_dsl::Path;

    struct Things;

    impl EntityPath for Things {
        fn table_name(&self) -> &str {
            "things"
        }

        fn alias(&self) -> &str {
            "t"
        }
    }

    #[test]
    fn test_statement_for_filtered_query() {
        let name: Path<String> = Path::native("t", "name");
        let statement = SqlQuery::select(name.clone())
            .from(&Things)
            .where_(name.eq(&"a".to_string()))
            .where_(name.eq(&"b".to_string()))
            .statement()
            .unwrap();

        assert_eq!(
            statement.sql,
            "SELECT t.name FROM things t WHERE ((t.name = ?) AND (t.name = ?))"
        );
        assert_eq!(statement.bindings, vec![RawValue::from("a"), RawValue::from("b")]);
    }
}
