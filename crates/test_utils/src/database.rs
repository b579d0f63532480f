//! Database Test Utilities
//!
//! Every `TestDatabase` is a private in-memory SQLite database with the
//! schema applied, so tests never share state.

use domain_entry::{Entry, EntryStore};
use infra_db::{create_pool, run_migrations, DatabaseConfig, DatabasePool, EntryRepository};
use sqlx::sqlite::SqliteQueryResult;

use crate::fixtures::EntryFixtures;
use crate::logging::init_tracing;

/// An isolated in-memory database
pub struct TestDatabase {
    pool: DatabasePool,
}

impl TestDatabase {
    /// Creates an empty database with the schema applied
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be created or the schema fails to apply
    pub async fn new() -> anyhow::Result<Self> {
        init_tracing();
        let pool = create_pool(DatabaseConfig::in_memory()).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Creates a database holding the four reference entries
    pub async fn seeded() -> anyhow::Result<Self> {
        let db = Self::new().await?;
        db.insert(&EntryFixtures::all()).await?;
        Ok(db)
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    pub fn repository(&self) -> EntryRepository {
        EntryRepository::new(self.pool.clone())
    }

    pub async fn insert(&self, entries: &[Entry]) -> anyhow::Result<()> {
        self.repository().persist_all(entries).await?;
        Ok(())
    }

    /// Clears all data while preserving the schema
    pub async fn clear_data(&self) -> anyhow::Result<()> {
        self.repository().delete_all().await?;
        Ok(())
    }
}

/// Helper macro for running database tests against a seeded database
#[macro_export]
macro_rules! db_test {
    ($name:ident, |$pool:ident| $body:block) => {
        #[tokio::test]
        async fn $name() {
            let db = $crate::database::TestDatabase::seeded()
                .await
                .expect("Failed to create test database");
            let $pool = db.pool();
            $body
        }
    };
}

/// Helper trait for test assertions on database results
pub trait DatabaseTestAssertions {
    /// Asserts that a specific number of rows were affected
    fn assert_rows_affected(&self, expected: u64);
}

impl DatabaseTestAssertions for SqliteQueryResult {
    fn assert_rows_affected(&self, expected: u64) {
        assert_eq!(
            self.rows_affected(),
            expected,
            "Expected {} rows affected, got {}",
            expected,
            self.rows_affected()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_databases_are_isolated() {
        let seeded = TestDatabase::seeded().await.unwrap();
        let empty = TestDatabase::new().await.unwrap();

        assert_eq!(seeded.repository().count().await.unwrap(), 4);
        assert_eq!(empty.repository().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_data() {
        let db = TestDatabase::seeded().await.unwrap();
        db.clear_data().await.unwrap();
        assert_eq!(db.repository().count().await.unwrap(), 0);
    }
}
