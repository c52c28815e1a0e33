//! Health / heartbeat endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tracing::warn;
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_health))]
pub struct HealthApi;

/// Register health-check routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// Heartbeat endpoint.
///
/// Always HTTP 200; `database` is `"unavailable"` when the pool cannot
/// answer a trivial query.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is up", body = Value)
    )
)]
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let database = match sqlx::query("SELECT 1").execute(state.store.pool()).await {
        Ok(_) => "ok",
        Err(e) => {
            warn!(error = %e, "health probe could not reach the database");
            "unavailable"
        }
    };
    Json(json!({
        "status":   "ok",
        "version":  env!("CARGO_PKG_VERSION"),
        "database": database,
    }))
}
