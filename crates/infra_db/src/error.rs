//! Database error types
//!
//! This module defines the error types that can occur during database operations,
//! providing meaningful error messages and proper error chaining.

use query_dsl::QueryError;
use thiserror::Error;

/// Errors that can occur during database operations
///
/// Query-layer failures (coercion, materialization) are carried unchanged in
/// `DatabaseError::Query` so callers can match on the `QueryError` itself.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique or primary key constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Other constraint violation (NOT NULL, CHECK, foreign key)
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Migration error
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A column could not be decoded into a raw value
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Coercion or materialization of a result failed
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Generic SQL error
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Creates a not found error for a specific entity type and identifier
    ///
    /// # Example
    ///
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::not_found("Entry", "ENT-123");
    /// assert!(error.to_string().contains("Entry"));
    /// ```
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{} with id '{}' not found", entity, id))
    }

    /// Returns the query-layer error, if this is one
    pub fn query_error(&self) -> Option<&QueryError> {
        match self {
            DatabaseError::Query(error) => Some(error),
            _ => None,
        }
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }

    /// Checks if this error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry(_) | DatabaseError::ConstraintViolation(_)
        )
    }
}

/// Converts SQLx errors to more specific DatabaseError variants
///
/// SQLite reports extended result codes, e.g. 2067 for a UNIQUE violation.
impl From<&sqlx::Error> for DatabaseError {
    fn from(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                // SQLITE_CONSTRAINT_PRIMARYKEY, SQLITE_CONSTRAINT_UNIQUE
                Some("1555") | Some("2067") => {
                    DatabaseError::DuplicateEntry(db_err.message().to_string())
                }
                // SQLITE_CONSTRAINT_CHECK, _FOREIGNKEY, _NOTNULL
                Some("275") | Some("787") | Some("1299") => {
                    DatabaseError::ConstraintViolation(db_err.message().to_string())
                }
                _ => DatabaseError::QueryFailed(db_err.message().to_string()),
            },
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

impl From<config::ConfigError> for DatabaseError {
    fn from(error: config::ConfigError) -> Self {
        DatabaseError::Configuration(error.to_string())
    }
}
