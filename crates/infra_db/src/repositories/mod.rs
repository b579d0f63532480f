//! Repository implementations for domain entities
//!
//! Repositories own writes and simple lookups. Reads that aggregate or
//! project go through `SqlQuery` directly.

pub mod entry;

pub use entry::EntryRepository;
