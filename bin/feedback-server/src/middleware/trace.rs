//! Per-request tracing span and trace-ID propagation.

use std::time::Instant;

use axum::body::Body;
use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

pub static X_TRACE_ID: &str = "x-trace-id";

/// Wraps each request in an `http_request` span keyed by a trace ID.
///
/// A valid UUID in the incoming `x-trace-id` header is reused, otherwise a
/// fresh one is generated. The ID is echoed on the response.
pub async fn trace_middleware(mut req: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("request started");
        // A hyphenated UUID is always a valid header value.
        let header = HeaderValue::from_str(&trace_id.to_string()).ok();
        if let Some(value) = header.clone() {
            req.headers_mut().insert(X_TRACE_ID, value);
        }

        let mut response = next.run(req).await;

        if let Some(value) = header {
            response.headers_mut().insert(X_TRACE_ID, value);
        }
        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis() as u64,
            "response finished"
        );
        response
    }
    .instrument(span)
    .await
}
