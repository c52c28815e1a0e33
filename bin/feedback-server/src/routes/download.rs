//! File download entry point. Every request served here counts as one
//! download of the resource.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use feedback_core::CatalogStore;
use tracing::info;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(download_resource))]
pub struct DownloadApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/download/{resource_id}", get(download_resource))
}

/// Count a download and redirect to the resource file.
#[utoipa::path(
    get,
    path = "/download/{resource_id}",
    tag = "downloads",
    params(("resource_id" = String, Path, description = "Catalog resource id")),
    responses(
        (status = 307, description = "Download counted; redirect to the file"),
        (status = 204, description = "Download counted; resource has no file URL"),
        (status = 404, description = "Unknown resource"),
        (status = 503, description = "Download statistics not initialised"),
    )
)]
pub async fn download_resource(
    State(state): State<Arc<AppState>>,
    Path(resource_id): Path<String>,
) -> Result<Response, ServerError> {
    let resource = state
        .store
        .get_resource(&resource_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("resource {resource_id} not found")))?;

    let summary = state
        .downloads
        .increase_resource_download_count(&resource.id)
        .await?;
    info!(
        resource_id = %resource.id,
        package_id = %resource.package_id,
        download_count = summary.download_count,
        "resource downloaded"
    );

    Ok(match resource.url.filter(|url| !url.is_empty()) {
        Some(url) => Redirect::temporary(&url).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}
