//! Entry repository implementation
//!
//! Inserts bind values through the same attribute codecs the metamodel uses
//! to decode them, so stored text always parses back.

use async_trait::async_trait;
use core_kernel::EntryId;
use domain_entry::{Entry, EntryStore, ENTRY, ENTRY_TABLE};
use sqlx::SqliteConnection;
use tracing::{debug, info};

use crate::error::DatabaseError;
use crate::pool::DatabasePool;
use crate::query::{bind_value, SqlQuery};

/// Repository for entries
#[derive(Debug, Clone)]
pub struct EntryRepository {
    pool: DatabasePool,
}

impl EntryRepository {
    /// Creates a new EntryRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The SQLite connection pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    async fn insert(connection: &mut SqliteConnection, entry: &Entry) -> Result<(), DatabaseError> {
        let sql = format!(
            "INSERT INTO {} (id, category, amount) VALUES (?, ?, ?)",
            ENTRY_TABLE
        );
        let values = [
            ENTRY.id.encode(&entry.id()),
            ENTRY.category.encode(&entry.category().to_string()),
            ENTRY.amount.encode(&entry.amount()),
        ];

        values
            .iter()
            .fold(sqlx::query(&sql), bind_value)
            .execute(connection)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        debug!(id = %entry.id(), category = entry.category(), "Entry inserted");
        Ok(())
    }
}

#[async_trait]
impl EntryStore for EntryRepository {
    type Error = DatabaseError;

    async fn persist(&self, entry: &Entry) -> Result<(), DatabaseError> {
        let mut connection = self.pool.acquire().await?;
        Self::insert(&mut connection, entry).await
    }

    /// Inserts all entries in one transaction; either all are stored or none
    async fn persist_all(&self, entries: &[Entry]) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        for entry in entries {
            Self::insert(&mut tx, entry).await?;
        }
        tx.commit().await?;

        info!(count = entries.len(), "Entries persisted");
        Ok(())
    }

    async fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>, DatabaseError> {
        SqlQuery::select(&*ENTRY)
            .from(&*ENTRY)
            .where_(ENTRY.id.eq(&id))
            .fetch_one(&self.pool)
            .await
    }

    async fn count(&self) -> Result<i64, DatabaseError> {
        let count = SqlQuery::select(ENTRY.id.count())
            .from(&*ENTRY)
            .fetch_one(&self.pool)
            .await?;
        Ok(count.unwrap_or(0))
    }

    async fn delete_all(&self) -> Result<u64, DatabaseError> {
        let result = sqlx::query(&format!("DELETE FROM {}", ENTRY_TABLE))
            .execute(&self.pool)
            .await?;

        info!(deleted = result.rows_affected(), "Entries deleted");
        Ok(result.rows_affected())
    }
}
