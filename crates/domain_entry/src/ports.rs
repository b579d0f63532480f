//! Persistence port for entries
//!
//! The storage layer implements this trait; tests and callers depend on the
//! trait only.
//!
//! ```rust,ignore
//! let repository = EntryRepository::new(pool);
//! repository.persist_all(&entries).await?;
//! ```

use async_trait::async_trait;
use core_kernel::EntryId;

use crate::entry::Entry;

#[async_trait]
pub trait EntryStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Stores a new entry
    async fn persist(&self, entry: &Entry) -> Result<(), Self::Error>;

    /// Stores several entries in one transaction
    async fn persist_all(&self, entries: &[Entry]) -> Result<(), Self::Error>;

    /// Loads an entry by identifier
    async fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>, Self::Error>;

    /// Number of stored entries
    async fn count(&self) -> Result<i64, Self::Error>;

    /// Removes every entry, returning how many were removed
    async fn delete_all(&self) -> Result<u64, Self::Error>;
}
