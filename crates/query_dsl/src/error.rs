//! Query error types

use thiserror::Error;

use crate::value::RawValue;

/// Errors raised while building, coercing or materializing query results
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// A raw value's runtime type does not match what the consumer expects
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Native result coercion cannot produce the declared target type
    #[error("Unsupported target type : {0}")]
    UnsupportedTargetType(String),

    /// A factory received a different number of raw values than it declares
    #[error("Arity mismatch: expected {expected} value(s), got {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// A codec could not convert a stored value into its domain type
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// A single-result fetch matched more than one row
    #[error("Expected at most one result, got {0}")]
    NonUniqueResult(usize),

    /// The query itself is malformed
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl QueryError {
    /// Creates a type mismatch error for a raw value that could not be used as `expected`
    pub fn type_mismatch(expected: impl Into<String>, found: &RawValue) -> Self {
        QueryError::TypeMismatch {
            expected: expected.into(),
            found: found.type_name().to_string(),
        }
    }

    /// Creates a conversion error
    pub fn conversion(message: impl Into<String>) -> Self {
        QueryError::Conversion(message.into())
    }

    /// Checks if this error is a runtime type mismatch
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, QueryError::TypeMismatch { .. })
    }
}
