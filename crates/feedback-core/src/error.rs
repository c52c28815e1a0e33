//! Error taxonomy for the download counter.

use thiserror::Error;

/// Name of the table owned by this crate.
pub const DOWNLOAD_SUMMARY_TABLE: &str = "download_summary";

/// PostgreSQL SQLSTATE for `undefined_table`.
const PG_UNDEFINED_TABLE: &str = "42P01";

/// Failures surfaced by [`crate::DownloadService`].
///
/// "No summary row yet" is not an error; it is reported as `Ok(None)`.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The `download_summary` table does not exist. Expected only before
    /// the schema has been provisioned with `feedback-server init`.
    #[error("download_summary table does not exist; run \"feedback-server init\"")]
    SchemaMissing,

    /// Any other persistence fault (connectivity, constraint violation, ...).
    #[error("store error: {0}")]
    Store(#[source] sqlx::Error),
}

impl DownloadError {
    pub fn is_schema_missing(&self) -> bool {
        matches!(self, DownloadError::SchemaMissing)
    }
}

impl From<sqlx::Error> for DownloadError {
    fn from(e: sqlx::Error) -> Self {
        if is_missing_download_table(&e) {
            DownloadError::SchemaMissing
        } else {
            DownloadError::Store(e)
        }
    }
}

/// Returns `true` when `e` reports that `download_summary` is absent.
///
/// Other missing tables (e.g. the host's `resource` table) are ordinary
/// store faults.
pub fn is_missing_download_table(e: &sqlx::Error) -> bool {
    let sqlx::Error::Database(db_err) = e else {
        return false;
    };
    let message = db_err.message();
    if !message.contains(DOWNLOAD_SUMMARY_TABLE) {
        return false;
    }
    // SQLite: "no such table: download_summary"
    // PostgreSQL: relation "download_summary" does not exist (42P01)
    message.contains("no such table") || db_err.code().as_deref() == Some(PG_UNDEFINED_TABLE)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn non_database_errors_are_store_faults() {
        let err = DownloadError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DownloadError::Store(sqlx::Error::RowNotFound)));
        assert!(!err.is_schema_missing());
    }

    #[test]
    fn schema_missing_message_names_init_command() {
        let msg = DownloadError::SchemaMissing.to_string();
        assert!(msg.contains("download_summary"));
        assert!(msg.contains("init"));
    }
}
