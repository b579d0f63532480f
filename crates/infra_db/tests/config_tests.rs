//! Tests for environment configuration
//!
//! Kept in their own binary because they change process environment variables.

use infra_db::{create_pool, run_migrations, DatabaseConfig};
use std::time::Duration;

#[tokio::test]
async fn test_from_env() {
    std::env::remove_var("DATABASE_URL");
    std::env::remove_var("DATABASE_MAX_CONNECTIONS");

    let defaults = DatabaseConfig::from_env().unwrap();
    assert!(defaults.is_in_memory());

    std::env::set_var("DATABASE_URL", "sqlite::memory:");
    std::env::set_var("DATABASE_MAX_CONNECTIONS", "3");
    std::env::set_var("DATABASE_CONNECT_TIMEOUT_SECS", "7");

    let config = DatabaseConfig::from_env().unwrap();
    assert_eq!(config.max_connections, 3);
    assert_eq!(config.connect_timeout, Duration::from_secs(7));

    // The in-memory pool is pinned regardless of the requested size
    let pool = create_pool(config).await.unwrap();
    run_migrations(&pool).await.unwrap();
    assert_eq!(pool.size(), 1);

    std::env::set_var("DATABASE_MAX_CONNECTIONS", "many");
    assert!(DatabaseConfig::from_env().is_err());
}
