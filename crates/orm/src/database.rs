//! Database Integration - SQLite connection pooling
//!
//! [`Database`] owns the process-wide pool. It is built once at startup,
//! cloned cheaply into whatever needs it, and closed at shutdown.

use crate::error::{ModelError, ModelResult};
use crate::transaction::Transaction;
use quill_core::{parse_env, get_env_or_default, AppConfigTrait, ConfigError, ConfigSource};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Default database location, relative to the working directory
pub const DEFAULT_DATABASE_URL: &str = "sqlite://posts.db";

/// URL of a private in-memory database
pub const IN_MEMORY_DATABASE_URL: &str = "sqlite::memory:";

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Seconds to wait for a free connection
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            acquire_timeout_secs: 30,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a file-backed database at `url`
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Configuration for a private in-memory database
    pub fn in_memory() -> Self {
        Self {
            url: IN_MEMORY_DATABASE_URL.to_string(),
            max_connections: 1,
            ..Self::default()
        }
    }

    /// An in-memory database lives inside a single connection, so the pool
    /// must never open a second one.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl AppConfigTrait for DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = get_env_or_default("DATABASE_URL", DEFAULT_DATABASE_URL);
        let max_connections = parse_env(
            "DATABASE_MAX_CONNECTIONS",
            "5",
            "max_connections",
            "positive number of connections",
        )?;
        let acquire_timeout_secs = parse_env(
            "DATABASE_ACQUIRE_TIMEOUT",
            "30",
            "acquire_timeout_secs",
            "valid number of seconds",
        )?;

        Ok(DatabaseConfig {
            url,
            max_connections,
            acquire_timeout_secs,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.url.starts_with("sqlite:") {
            return Err(ConfigError::invalid_value(
                "url",
                self.url.clone(),
                "a sqlite: URL such as sqlite://posts.db",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation_failed(
                "Maximum connections must be greater than 0",
            ));
        }

        if self.acquire_timeout_secs == 0 {
            return Err(ConfigError::validation_failed(
                "Acquire timeout must be greater than 0",
            ));
        }

        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert("url".to_string(), ConfigSource::EnvVar("DATABASE_URL".to_string()));
        sources.insert(
            "max_connections".to_string(),
            ConfigSource::EnvVar("DATABASE_MAX_CONNECTIONS".to_string()),
        );
        sources.insert(
            "acquire_timeout_secs".to_string(),
            ConfigSource::EnvVar("DATABASE_ACQUIRE_TIMEOUT".to_string()),
        );
        sources
    }
}

/// Handle to the connection pool
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    url: String,
}

impl Database {
    /// Open the pool described by `config`, creating the database file if it
    /// does not exist yet.
    pub async fn connect(config: &DatabaseConfig) -> ModelResult<Self> {
        config.validate()?;

        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| ModelError::Configuration(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(config.acquire_timeout());

        pool_options = if config.is_in_memory() {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            pool_options.max_connections(config.max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| ModelError::Connection(format!("Failed to open {}: {}", config.url, e)))?;

        info!(url = %config.url, "Database pool ready");

        Ok(Self {
            pool,
            url: config.url.clone(),
        })
    }

    /// Open a private in-memory database
    pub async fn in_memory() -> ModelResult<Self> {
        Self::connect(&DatabaseConfig::in_memory()).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Begin a scoped transaction
    pub async fn begin(&self) -> ModelResult<Transaction> {
        Transaction::begin(&self.pool).await
    }

    /// Run idempotent DDL statements (`CREATE TABLE IF NOT EXISTS ...`)
    /// inside one transaction.
    pub async fn ensure_schema(&self, statements: &[&str]) -> ModelResult<()> {
        let mut tx = self.begin().await?;
        for statement in statements {
            sqlx::query(statement)
                .execute(tx.connection()?)
                .await
                .map_err(|e| ModelError::Schema(e.to_string()))?;
        }
        tx.commit().await?;
        debug!(statements = statements.len(), "Schema ensured");
        Ok(())
    }

    /// Round-trip a trivial query through the pool
    pub async fn health_check(&self) -> ModelResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to return
    pub async fn close(&self) {
        self.pool.close().await;
        info!(url = %self.url, "Database pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_default_config() {
        let config = DatabaseConfig::default();
        assert_eq!(config.url, "sqlite://posts.db");
        assert!(!config.is_in_memory());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_in_memory_config() {
        let config = DatabaseConfig::in_memory();
        assert!(config.is_in_memory());
        assert_eq!(config.max_connections, 1);
    }

    #[test]
    fn test_rejects_non_sqlite_url() {
        let config = DatabaseConfig::with_url("postgres://localhost/blog");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "url"
        ));
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        env::set_var("DATABASE_URL", "sqlite://blog.db");
        env::set_var("DATABASE_MAX_CONNECTIONS", "3");

        let config = DatabaseConfig::from_env().unwrap();
        assert_eq!(config.url, "sqlite://blog.db");
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.acquire_timeout_secs, 30);

        env::remove_var("DATABASE_URL");
        env::remove_var("DATABASE_MAX_CONNECTIONS");
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_number() {
        env::set_var("DATABASE_MAX_CONNECTIONS", "many");
        let result = DatabaseConfig::from_env();
        env::remove_var("DATABASE_MAX_CONNECTIONS");

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[tokio::test]
    async fn test_connect_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.db");
        let config = DatabaseConfig::with_url(format!("sqlite://{}", path.display()));

        let db = Database::connect(&config).await.unwrap();
        db.health_check().await.unwrap();

        assert!(path.exists());
        db.close().await;
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        let ddl = ["CREATE TABLE IF NOT EXISTS notes (id INTEGER PRIMARY KEY, text TEXT NOT NULL)"];

        db.ensure_schema(&ddl).await.unwrap();
        db.ensure_schema(&ddl).await.unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }
}
