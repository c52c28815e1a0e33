//! Download counter service.
//!
//! Request handlers call [`DownloadService::increase_resource_download_count`]
//! once per served file and the `get_*` methods when rendering resource and
//! package pages.
//!
//! # Failure policy
//!
//! A missing `download_summary` table is logged distinctly. Read paths then
//! degrade to "no data" so pages keep rendering before the schema has been
//! provisioned; the write path returns [`DownloadError::SchemaMissing`] so a
//! download event is never dropped silently. Every other store fault is
//! returned to the caller.

use tracing::{debug, error};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::entities::{DownloadStore, DownloadSummary, ResourceDownloadCount};
use crate::error::DownloadError;

const SCHEMA_MISSING_LOG: &str = "download_summary table does not exist; run \"feedback-server init\"";

/// Records and aggregates per-resource download counters.
#[derive(Debug, Clone)]
pub struct DownloadService<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: DownloadStore> DownloadService<S> {
    /// Service over `store` using wall-clock timestamps.
    pub fn with_system_clock(store: S) -> Self {
        Self::new(store, SystemClock)
    }
}

impl<S: DownloadStore, C: Clock> DownloadService<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Total downloads across every resource of `package_id`.
    ///
    /// `Ok(None)` means no resource of the package has ever been downloaded,
    /// as opposed to `Ok(Some(0))`.
    pub async fn get_package_download_count(
        &self,
        package_id: &str,
    ) -> Result<Option<i64>, DownloadError> {
        let total = self.store.get_package_total(package_id).await;
        degrade_read("get_package_download_count", package_id, total)
    }

    /// The stored counter for `resource_id`, or `Ok(None)` if it has no row.
    pub async fn get_resource_download_count(
        &self,
        resource_id: &str,
    ) -> Result<Option<i64>, DownloadError> {
        let count = self.store.get_resource_count(resource_id).await;
        degrade_read("get_resource_download_count", resource_id, count)
    }

    /// The full summary row for `resource_id`, including its timestamps.
    pub async fn get_resource_download_summary(
        &self,
        resource_id: &str,
    ) -> Result<Option<DownloadSummary>, DownloadError> {
        let summary = self.store.get_summary(resource_id).await;
        degrade_read("get_resource_download_summary", resource_id, summary)
    }

    /// Per-resource counters of `package_id`, ordered by resource id. Only
    /// resources with a summary row are listed.
    pub async fn get_package_resource_counts(
        &self,
        package_id: &str,
    ) -> Result<Vec<ResourceDownloadCount>, DownloadError> {
        let counts = self.store.list_package_counts(package_id).await;
        degrade_read("get_package_resource_counts", package_id, counts.map(Some))
            .map(Option::unwrap_or_default)
    }

    /// Record exactly one download of `resource_id`.
    ///
    /// Not idempotent: every call adds one. Concurrent calls for the same
    /// resource never lose an increment.
    pub async fn increase_resource_download_count(
        &self,
        resource_id: &str,
    ) -> Result<DownloadSummary, DownloadError> {
        let id = Uuid::new_v4().to_string();
        let now = self.clock.now();
        match self.store.upsert_increment(&id, resource_id, now).await {
            Ok(summary) => {
                debug!(
                    resource_id,
                    download_count = summary.download_count,
                    "download recorded"
                );
                Ok(summary)
            }
            Err(e) => {
                let err = DownloadError::from(e);
                if err.is_schema_missing() {
                    error!(
                        operation = "increase_resource_download_count",
                        resource_id, "{SCHEMA_MISSING_LOG}"
                    );
                }
                Err(err)
            }
        }
    }
}

/// Applies the read-path policy: a missing table becomes `Ok(None)` after
/// being logged, anything else propagates.
fn degrade_read<T>(
    operation: &'static str,
    key: &str,
    result: Result<Option<T>, sqlx::Error>,
) -> Result<Option<T>, DownloadError> {
    match result {
        Ok(value) => Ok(value),
        Err(e) => match DownloadError::from(e) {
            DownloadError::SchemaMissing => {
                error!(operation, key, "{SCHEMA_MISSING_LOG}");
                Ok(None)
            }
            other => Err(other),
        },
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
