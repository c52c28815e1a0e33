//! Persistence layer.
//!
//! [`DownloadStore`] covers the `download_summary` table owned by this crate;
//! [`CatalogStore`] covers the read-only lookups into the host catalog's
//! `resource` table. Both are implemented by [`SqliteStore`]. To swap to
//! another database, implement the traits for your new type and hand it to
//! [`crate::DownloadService::new`].
//!
//! All trait methods use `impl Future` in their signatures so no extra
//! `async-trait` crate is required.

pub mod catalog;
pub mod dao;
pub mod download;

pub use catalog::CatalogStore;
pub use dao::{DownloadSummary, ResourceDownloadCount, ResourceRecord};
pub use download::DownloadStore;

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::info;

/// Connection settings for [`SqliteStore::connect_with`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// sqlx-compatible SQLite URL, e.g. `"sqlite://feedback.db?mode=rwc"`.
    pub url: String,
    /// Upper bound on pooled connections shared by all request handlers.
    pub max_connections: u32,
    /// How long a writer waits for a competing writer before failing.
    pub busy_timeout: Duration,
}

impl StoreOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 8,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

/// SQLite-backed download and catalog store.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database at `url` with default pool settings.
    ///
    /// The schema is **not** provisioned here so that a missing
    /// `download_summary` table stays observable; see [`Self::init_schema`].
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        Self::connect_with(&StoreOptions::new(url)).await
    }

    pub async fn connect_with(options: &StoreOptions) -> Result<Self, sqlx::Error> {
        let connect_options = SqliteConnectOptions::from_str(&options.url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(options.busy_timeout)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .connect_with(connect_options)
            .await?;
        Ok(Self { pool })
    }

    /// Private in-memory database on a single long-lived connection.
    ///
    /// Dropping the last connection of an in-memory SQLite database discards
    /// it, so idle reaping is disabled.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_options)
            .await?;
        Ok(Self { pool })
    }

    /// Create the `download_summary` table and its indexes.
    ///
    /// Idempotent; already-applied migrations are skipped.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        // Path is resolved relative to CARGO_MANIFEST_DIR at compile time.
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("download_summary schema ready");
        Ok(())
    }

    /// Underlying pool, for host-side queries that share this database.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Fixed-width RFC 3339 with microseconds, so text order is time order.
pub(crate) fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_owned(),
            source: Box::new(e),
        })
}
