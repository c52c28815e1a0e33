use std::future::Future;

use chrono::{DateTime, Utc};

use crate::entities::dao::{DownloadSummary, ResourceDownloadCount};
use crate::entities::{SqliteStore, decode_timestamp, encode_timestamp};

/// Access to the `download_summary` table.
pub trait DownloadStore: Send + Sync + 'static {
    /// Record one download for `resource_id` in a single atomic statement.
    ///
    /// Creates the row with `download_count = 1` (using `id` and `now` for
    /// both timestamps) if absent, otherwise adds one and refreshes
    /// `updated_at`. Returns the row as committed.
    fn upsert_increment(
        &self,
        id: &str,
        resource_id: &str,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<DownloadSummary, sqlx::Error>> + Send;

    fn get_summary(
        &self,
        resource_id: &str,
    ) -> impl Future<Output = Result<Option<DownloadSummary>, sqlx::Error>> + Send;

    fn get_resource_count(
        &self,
        resource_id: &str,
    ) -> impl Future<Output = Result<Option<i64>, sqlx::Error>> + Send;

    /// Sum over every summary row whose resource belongs to `package_id`;
    /// `None` when there are no such rows.
    fn get_package_total(
        &self,
        package_id: &str,
    ) -> impl Future<Output = Result<Option<i64>, sqlx::Error>> + Send;

    fn list_package_counts(
        &self,
        package_id: &str,
    ) -> impl Future<Output = Result<Vec<ResourceDownloadCount>, sqlx::Error>> + Send;
}

type SummaryRow = (String, String, i64, String, String);

fn summary_from_row(
    (id, resource_id, download_count, created_at, updated_at): SummaryRow,
) -> Result<DownloadSummary, sqlx::Error> {
    Ok(DownloadSummary {
        id,
        resource_id,
        download_count,
        created_at: decode_timestamp("created_at", &created_at)?,
        updated_at: decode_timestamp("updated_at", &updated_at)?,
    })
}

impl DownloadStore for SqliteStore {
    async fn upsert_increment(
        &self,
        id: &str,
        resource_id: &str,
        now: DateTime<Utc>,
    ) -> Result<DownloadSummary, sqlx::Error> {
        let now = encode_timestamp(now);
        // An uncommitted transaction is rolled back when `tx` drops.
        let mut tx = self.pool.begin().await?;
        let row: SummaryRow = sqlx::query_as(
            "INSERT INTO download_summary (id, resource_id, download_count, created_at, updated_at) \
             VALUES (?1, ?2, 1, ?3, ?3) \
             ON CONFLICT(resource_id) DO UPDATE \
             SET download_count = download_summary.download_count + 1, \
                 updated_at = MAX(download_summary.updated_at, excluded.updated_at) \
             RETURNING id, resource_id, download_count, created_at, updated_at",
        )
        .bind(id)
        .bind(resource_id)
        .bind(&now)
        .fetch_one(&mut *tx)
        .await?;
        let summary = summary_from_row(row)?;
        tx.commit().await?;
        Ok(summary)
    }

    async fn get_summary(&self, resource_id: &str) -> Result<Option<DownloadSummary>, sqlx::Error> {
        let row: Option<SummaryRow> = sqlx::query_as(
            "SELECT id, resource_id, download_count, created_at, updated_at \
             FROM download_summary WHERE resource_id = ?1",
        )
        .bind(resource_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(summary_from_row).transpose()
    }

    async fn get_resource_count(&self, resource_id: &str) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar("SELECT download_count FROM download_summary WHERE resource_id = ?1")
            .bind(resource_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_package_total(&self, package_id: &str) -> Result<Option<i64>, sqlx::Error> {
        // SUM over zero rows is NULL.
        sqlx::query_scalar(
            "SELECT SUM(ds.download_count) \
             FROM download_summary ds \
             JOIN resource r ON r.id = ds.resource_id \
             WHERE r.package_id = ?1",
        )
        .bind(package_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_package_counts(
        &self,
        package_id: &str,
    ) -> Result<Vec<ResourceDownloadCount>, sqlx::Error> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT ds.resource_id, ds.download_count \
             FROM download_summary ds \
             JOIN resource r ON r.id = ds.resource_id \
             WHERE r.package_id = ?1 \
             ORDER BY ds.resource_id",
        )
        .bind(package_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(resource_id, download_count)| ResourceDownloadCount {
                resource_id,
                download_count,
            })
            .collect())
    }
}
