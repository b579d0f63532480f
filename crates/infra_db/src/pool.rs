//! Database connection pool management
//!
//! This module provides connection pool configuration and creation for SQLite
//! using SQLx, plus the schema bootstrap used by the engine and its tests.

use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::DatabaseError;

/// Type alias for the SQLite connection pool
pub type DatabasePool = SqlitePool;

const DEFAULT_URL: &str = "sqlite::memory:";

const SCHEMA: &str = include_str!("../../../migrations/20240101_000001_create_entries.sql");

/// Configuration options for the database connection pool
///
/// # Example
///
/// ```rust
/// use infra_db::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("sqlite://entries.db")
///     .max_connections(4)
///     .min_connections(1)
///     .connect_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection string
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout duration
    pub connect_timeout: Duration,
    /// Maximum lifetime of a connection, `None` to keep connections forever
    pub max_lifetime: Option<Duration>,
    /// Idle timeout before closing a connection, `None` to never close idle ones
    pub idle_timeout: Option<Duration>,
}

/// Settings read from `DATABASE_*` environment variables
#[derive(Debug, Deserialize)]
struct DatabaseSettings {
    url: String,
    max_connections: u32,
    min_connections: u32,
    connect_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Creates a new database configuration with the given connection URL
    ///
    /// # Arguments
    ///
    /// * `url` - SQLite connection string (e.g., "sqlite://entries.db" or "sqlite::memory:")
    ///
    /// # Returns
    ///
    /// A new `DatabaseConfig` with sensible defaults
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            max_lifetime: Some(Duration::from_secs(30 * 60)), // 30 minutes
            idle_timeout: Some(Duration::from_secs(10 * 60)), // 10 minutes
        }
    }

    /// Creates a configuration for a private in-memory database
    pub fn in_memory() -> Self {
        Self::new(DEFAULT_URL)
            .max_connections(1)
            .min_connections(1)
            .max_lifetime(None)
            .idle_timeout(None)
    }

    /// Loads the configuration from the environment
    ///
    /// A `.env` file is read first when present. Recognized variables are
    /// `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`, `DATABASE_MIN_CONNECTIONS`
    /// and `DATABASE_CONNECT_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Configuration` if a variable cannot be parsed
    pub fn from_env() -> Result<Self, DatabaseError> {
        dotenvy::dotenv().ok();

        let settings: DatabaseSettings = config::Config::builder()
            .set_default("url", DEFAULT_URL)?
            .set_default("max_connections", 5_i64)?
            .set_default("min_connections", 1_i64)?
            .set_default("connect_timeout_secs", 30_i64)?
            .add_source(config::Environment::with_prefix("DATABASE").try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(Self::new(settings.url)
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs)))
    }

    /// Sets the maximum number of connections in the pool
    ///
    /// # Arguments
    ///
    /// * `max` - Maximum connection count (default: 5)
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections to maintain
    ///
    /// # Arguments
    ///
    /// * `min` - Minimum connection count (default: 1)
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout duration
    ///
    /// # Arguments
    ///
    /// * `timeout` - Duration to wait for a connection (default: 30s)
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the maximum lifetime of a connection
    pub fn max_lifetime(mut self, lifetime: Option<Duration>) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    /// Sets the idle timeout before closing a connection
    pub fn idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Returns true if the URL names an in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    /// Every connection to an in-memory database opens its own empty
    /// database, so the pool must hold exactly one connection forever.
    fn effective(mut self) -> Self {
        if self.is_in_memory()
            && (self.max_connections != 1
                || self.min_connections != 1
                || self.max_lifetime.is_some()
                || self.idle_timeout.is_some())
        {
            warn!(
                url = %self.url,
                max_connections = self.max_connections,
                "In-memory database: pinning the pool to a single persistent connection"
            );
            self.max_connections = 1;
            self.min_connections = 1;
            self.max_lifetime = None;
            self.idle_timeout = None;
        }
        self
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Creates a database connection pool with the given configuration
///
/// File databases are created if missing. In-memory databases get a pool of
/// one connection that is never recycled.
///
/// # Arguments
///
/// * `config` - Database configuration options
///
/// # Errors
///
/// Returns `DatabaseError::ConnectionFailed` if the pool cannot be created
///
/// # Example
///
/// ```rust,ignore
/// use infra_db::{DatabaseConfig, create_pool};
///
/// let pool = create_pool(DatabaseConfig::in_memory()).await?;
/// ```
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    let config = config.effective();
    info!(
        "Creating database pool with max_connections={}, min_connections={}",
        config.max_connections, config.min_connections
    );

    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| DatabaseError::Configuration(e.to_string()))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout)
        .max_lifetime(config.max_lifetime)
        .idle_timeout(config.idle_timeout)
        .connect_with(options)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Database pool created successfully");
    Ok(pool)
}

/// Creates the schema if it does not exist yet
///
/// # Errors
///
/// Returns `DatabaseError::MigrationFailed` if the schema script fails
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

    info!("Database schema is up to date");
    Ok(())
}
