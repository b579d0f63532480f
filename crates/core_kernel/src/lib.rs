//! Core Kernel - Foundational value types for custom-number aggregates
//!
//! This crate provides the building blocks shared by the query layer and the
//! storage layer:
//! - `CustomNumber`, a domain number backed by precise decimal arithmetic
//! - Strongly-typed entity identifiers

pub mod custom_number;
pub mod identifiers;

pub use custom_number::{CustomNumber, CustomNumberError};
pub use identifiers::EntryId;
