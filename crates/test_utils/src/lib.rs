//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! query engine test suite.
//!
//! # Modules
//!
//! - `fixtures`: The four reference entries and their expected totals
//! - `builders`: Builder patterns for test data construction
//! - `database`: Isolated in-memory databases, optionally pre-seeded
//! - `assertions`: Custom assertion helpers for query results
//! - `generators`: Property-based test data generators
//! - `logging`: One-time tracing initialisation

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;
pub mod logging;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
pub use logging::init_tracing;
