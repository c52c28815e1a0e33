//! Read-only download counters for resource and package pages.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::v1::downloads::{
    PackageDownloadsResponse, ResourceCountResponse, ResourceDownloadsResponse,
};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(resource_downloads, package_downloads),
    components(schemas(
        ResourceDownloadsResponse,
        ResourceCountResponse,
        PackageDownloadsResponse
    ))
)]
pub struct DownloadsApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/resources/{resource_id}/downloads", get(resource_downloads))
        .route("/packages/{package_id}/downloads",   get(package_downloads))
}

#[utoipa::path(
    get,
    path = "/v1/resources/{resource_id}/downloads",
    tag = "downloads",
    params(("resource_id" = String, Path, description = "Catalog resource id")),
    responses(
        (status = 200, description = "Resource counter", body = ResourceDownloadsResponse),
        (status = 500, description = "Store error"),
    )
)]
pub async fn resource_downloads(
    State(state): State<Arc<AppState>>,
    Path(resource_id): Path<String>,
) -> Result<Json<ResourceDownloadsResponse>, ServerError> {
    let summary = state
        .downloads
        .get_resource_download_summary(&resource_id)
        .await?;
    Ok(Json(ResourceDownloadsResponse::from_summary(resource_id, summary)))
}

#[utoipa::path(
    get,
    path = "/v1/packages/{package_id}/downloads",
    tag = "downloads",
    params(("package_id" = String, Path, description = "Catalog package id")),
    responses(
        (status = 200, description = "Package total and per-resource counters", body = PackageDownloadsResponse),
        (status = 500, description = "Store error"),
    )
)]
pub async fn package_downloads(
    State(state): State<Arc<AppState>>,
    Path(package_id): Path<String>,
) -> Result<Json<PackageDownloadsResponse>, ServerError> {
    let download_count = state.downloads.get_package_download_count(&package_id).await?;
    let resources = state
        .downloads
        .get_package_resource_counts(&package_id)
        .await?
        .into_iter()
        .map(ResourceCountResponse::from)
        .collect();
    Ok(Json(PackageDownloadsResponse {
        package_id,
        download_count,
        resources,
    }))
}
