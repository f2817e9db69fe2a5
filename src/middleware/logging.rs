//! Request logging middleware

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// Log method, path, status and latency of every request
///
/// Every failure is mapped to a 500, so server errors log at `warn` and
/// the cause is found in the error log of the same request.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    if response.status().is_server_error() {
        tracing::warn!(%method, %path, status, %duration_ms, "Request failed");
    } else {
        tracing::info!(%method, %path, status, %duration_ms, "Request completed");
    }

    response
}
