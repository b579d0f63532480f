//! Infrastructure Database Layer
//!
//! This crate is the query engine behind `query_dsl`, running on SQLite
//! through SQLx.
//!
//! # Architecture
//!
//! A query goes through four steps:
//! - `serializer`: the projection's leaf columns are rendered to SQL by a visitor
//! - `row`: each fetched column is decoded into a `RawValue` by its runtime storage class
//! - native coercion (`query_dsl::coercion`) normalizes each value to the column's result type
//! - the projection materializes one result per row
//!
//! The repository pattern from `domain_entry::EntryStore` covers writes.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, SqlQuery};
//! use domain_entry::ENTRY;
//!
//! let pool = create_pool(DatabaseConfig::in_memory()).await?;
//! run_migrations(&pool).await?;
//! let total = SqlQuery::select(ENTRY.amount_total()).from(&*ENTRY).fetch_one(&pool).await?;
//! ```

pub mod pool;
pub mod error;
pub mod serializer;
pub mod row;
pub mod query;
pub mod repositories;

pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool};
pub use error::DatabaseError;
pub use serializer::{Clause, QueryMetadata, Source, SqlSerializer, Statement};
pub use query::SqlQuery;
pub use repositories::EntryRepository;
