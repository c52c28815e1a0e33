//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Per-request trace-ID middleware
//! - Optional OpenAPI document (disable with `FEEDBACK_ENABLE_DOCS=false`)
//! - Health / heartbeat route
//! - The counting `/download/{resource_id}` route
//! - Read-only `/v1` counter routes

pub mod doc;
mod download;
mod health;
mod v1;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router, middleware};

use crate::middleware::trace;
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .merge(health::router())
        .merge(download::router())
        .nest("/v1", v1::router());

    if state.config.enable_docs {
        let api_doc = doc::get_docs();
        app = app.route(
            "/api-docs/openapi.json",
            get(move || {
                let api_doc = api_doc.clone();
                async move { Json(api_doc) }
            }),
        );
    }

    app.layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use feedback_core::SqliteStore;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::middleware::trace::X_TRACE_ID;

    async fn catalog_store() -> SqliteStore {
        let store = SqliteStore::in_memory().await.unwrap();
        sqlx::query("CREATE TABLE resource (id TEXT PRIMARY KEY, package_id TEXT NOT NULL, url TEXT)")
            .execute(store.pool())
            .await
            .unwrap();
        for (id, package_id, url) in [
            ("res-a", "pkg-1", Some("https://files.example.org/a.csv")),
            ("res-b", "pkg-1", None),
            ("res-c", "pkg-2", Some("https://files.example.org/c.csv")),
        ] {
            sqlx::query("INSERT INTO resource (id, package_id, url) VALUES (?1, ?2, ?3)")
                .bind(id)
                .bind(package_id)
                .bind(url)
                .execute(store.pool())
                .await
                .unwrap();
        }
        store
    }

    fn app(store: SqliteStore) -> Router {
        build(Arc::new(AppState::new(Config::from_env(), store)))
    }

    async fn get(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn download_counts_and_redirects() {
        let store = catalog_store().await;
        store.init_schema().await.unwrap();
        let app = app(store);

        let resp = get(&app, "/download/res-a").await;
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            resp.headers()[header::LOCATION],
            "https://files.example.org/a.csv"
        );
        assert!(resp.headers().contains_key(X_TRACE_ID));

        let resp = get(&app, "/download/res-b").await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        get(&app, "/download/res-a").await;

        let body = json_body(get(&app, "/v1/resources/res-a/downloads").await).await;
        assert_eq!(body["download_count"], 2);
        assert!(body["updated_at"].is_string());

        let body = json_body(get(&app, "/v1/packages/pkg-1/downloads").await).await;
        assert_eq!(body["download_count"], 3);
        assert_eq!(body["resources"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn unknown_resource_is_not_counted() {
        let store = catalog_store().await;
        store.init_schema().await.unwrap();
        let app = app(store);

        let resp = get(&app, "/download/res-missing").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = json_body(get(&app, "/v1/resources/res-missing/downloads").await).await;
        assert!(body["download_count"].is_null());
    }

    #[tokio::test]
    async fn never_downloaded_counters_are_null() {
        let store = catalog_store().await;
        store.init_schema().await.unwrap();
        let app = app(store);

        let body = json_body(get(&app, "/v1/packages/pkg-2/downloads").await).await;
        assert!(body["download_count"].is_null());
        assert_eq!(body["resources"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn uninitialised_schema_fails_downloads_but_not_pages() {
        let app = app(catalog_store().await);

        let resp = get(&app, "/download/res-a").await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(resp).await;
        assert!(body["error"].as_str().unwrap_or_default().contains("init"));

        let resp = get(&app, "/v1/packages/pkg-1/downloads").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(json_body(resp).await["download_count"].is_null());
    }

    #[tokio::test]
    async fn health_reports_database() {
        let app = app(catalog_store().await);
        let body = json_body(get(&app, "/health").await).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "ok");
        assert!(!body["version"].as_str().unwrap_or("").is_empty());
    }

    #[tokio::test]
    async fn openapi_document_lists_download_routes() {
        let app = app(catalog_store().await);
        let body = json_body(get(&app, "/api-docs/openapi.json").await).await;
        assert!(body["paths"]["/download/{resource_id}"].is_object());
        assert!(body["paths"]["/v1/packages/{package_id}/downloads"].is_object());
    }

    #[tokio::test]
    async fn incoming_trace_id_is_echoed() {
        let app = app(catalog_store().await);
        let trace_id = "7f1b7e4e-8d1c-4c36-9a55-0b9d2f0c8a11";
        let resp = app
            .oneshot(
                Request::get("/health")
                    .header(X_TRACE_ID, trace_id)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.headers()[X_TRACE_ID], trace_id);
    }
}
