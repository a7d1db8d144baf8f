//! # HTTP Request Tracing Middleware
//!
//! Axum middleware that wraps each request in a span, logs its outcome, and
//! records request counters and latency histograms.

use std::time::Instant;

use axum::{extract::MatchedPath, extract::Request, middleware::Next, response::Response};
use metrics::{counter, histogram};
use tracing::Instrument;

/// Axum middleware that traces and measures every HTTP request.
pub async fn trace_http_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    // Route templates keep label cardinality bounded; unmatched paths are the SPA.
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| "static".to_string());
    let start = Instant::now();

    let span = crate::request_span!(method, path, route = %route);
    let response = next.run(request).instrument(span.clone()).await;

    let status = response.status().as_u16();
    let elapsed = start.elapsed();

    span.in_scope(|| {
        if status >= 500 {
            tracing::error!(status, elapsed_ms = elapsed.as_millis() as u64, "Request failed");
        } else {
            tracing::info!(status, elapsed_ms = elapsed.as_millis() as u64, "Request completed");
        }
    });

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!("http_request_duration_seconds", "method" => method, "route" => route)
        .record(elapsed.as_secs_f64());

    response
}
