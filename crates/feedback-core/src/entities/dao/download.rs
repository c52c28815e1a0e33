use chrono::{DateTime, Utc};

/// A row in the `download_summary` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    pub id: String,
    pub resource_id: String,
    pub download_count: i64,
    pub created_at: DateTime<Utc>,
    /// Never earlier than `created_at`; refreshed on every increment.
    pub updated_at: DateTime<Utc>,
}

/// One resource's counter within a package breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDownloadCount {
    pub resource_id: String,
    pub download_count: i64,
}
