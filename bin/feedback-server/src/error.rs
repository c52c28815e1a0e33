//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are converted to a JSON-body
//! HTTP response with an appropriate status code.
//!
//! Internal errors are logged with full detail but only a generic message is
//! returned to the caller so that SQL or file paths never leak to clients.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use feedback_core::DownloadError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// All errors that can occur in the feedback-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Propagated from the download counter service.
    #[error("download counter error: {0}")]
    Download(#[from] DownloadError),

    /// Propagated from a direct store query (catalog lookups, health).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The caller referenced a resource that does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            ServerError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),

            ServerError::Download(DownloadError::SchemaMissing) => {
                error!("download recorded against a missing download_summary table");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "download statistics are not initialised; run `feedback-server init`"
                        .to_owned(),
                )
            }
            ServerError::Download(DownloadError::Store(e)) | ServerError::Database(e) => {
                error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn schema_missing_is_service_unavailable() {
        let resp = ServerError::from(DownloadError::SchemaMissing).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn store_faults_are_internal_errors() {
        let resp = ServerError::from(DownloadError::Store(sqlx::Error::PoolTimedOut)).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let resp = ServerError::from(sqlx::Error::PoolClosed).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_keeps_its_message() {
        let resp = ServerError::NotFound("resource r-1 not found".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
