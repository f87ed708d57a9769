use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseSettings;
use crate::models::ModelError;
use crate::services::{EnquiryRepository, SqliteChildRepository};

/// Errors that can occur when interacting with the local database
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Model error: {0}")]
    ModelError(#[from] ModelError),

    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// SQLite client for the on-device record store
///
/// Owns the connection pool and applies the embedded migrations when it
/// connects. Repositories are handed clones of the pool.
pub struct SqliteClient {
    pool: SqlitePool,
}

impl SqliteClient {
    /// Open (creating if needed) the database at `database_url`
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .test_before_acquire(true)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        tracing::info!("Opening SQLite database at {}", settings.url);

        Self::new(
            &settings.url,
            settings.max_connections.unwrap_or(4),
            settings.min_connections.unwrap_or(1),
            Duration::from_secs(settings.acquire_timeout_secs.unwrap_or(5)),
        )
        .await
    }

    /// Single-connection in-memory database, mostly for tests
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::new("sqlite::memory:", 1, 1, Duration::from_secs(5)).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn enquiries(&self) -> EnquiryRepository {
        EnquiryRepository::new(self.pool.clone())
    }

    pub fn children(&self) -> SqliteChildRepository {
        SqliteChildRepository::new(self.pool.clone())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
