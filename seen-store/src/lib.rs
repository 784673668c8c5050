use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use fretwatch_core::{SeenStore, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

/// SQLite-backed record of every listing URL already alerted on. The table
/// is append-only: a row is inserted at the moment of a listing's first
/// successful alert and never updated or deleted.
pub struct SqliteSeenStore {
    pool: SqlitePool,
}

impl SqliteSeenStore {
    /// Opens the store at `path`, creating the file and schema on first run.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        // Single writer; the notify step is sequential within a pass.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Open {
                path: path.display().to_string(),
                source: e,
            })?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS listings(\
                 url TEXT UNIQUE NOT NULL, \
                 discovered_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP\
             )",
        )
        .execute(&pool)
        .await?;

        info!(path = %path.display(), "listing store ready");
        Ok(Self { pool })
    }

    /// When the URL was first alerted on, if ever.
    pub async fn discovered_at(&self, url: &str) -> Result<Option<NaiveDateTime>, StoreError> {
        let row: Option<(NaiveDateTime,)> =
            sqlx::query_as("SELECT discovered_at FROM listings WHERE url = ?")
                .bind(url)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(at,)| at))
    }

    pub async fn seen_count(&self) -> Result<i64, StoreError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM listings")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }
}

#[async_trait]
impl SeenStore for SqliteSeenStore {
    async fn has_seen(&self, url: &str) -> Result<bool, StoreError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM listings WHERE url = ?")
            .bind(url)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0 > 0)
    }

    async fn mark_seen(&self, url: &str) -> Result<(), StoreError> {
        let result = sqlx::query("INSERT INTO listings(url) VALUES (?)")
            .bind(url)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                debug!(url, "recorded listing as seen");
                Ok(())
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::DuplicateUrl {
                    url: url.to_string(),
                })
            }
            Err(e) => Err(StoreError::Sql(e)),
        }
    }
}
