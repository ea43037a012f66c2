//! Request logging middleware.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use log::Level;
use std::time::Instant;

/// Emits one `http_request` event per request.
///
/// Only method, path, status and timing are logged; query strings and
/// bodies may carry user text and are left out.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started_at = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let (level, outcome) = if status.is_server_error() {
        (Level::Error, "error")
    } else if status.is_client_error() {
        (Level::Warn, "rejected")
    } else {
        (Level::Info, "ok")
    };
    log::log!(
        level,
        "event=http_request module=server status={outcome} method={method} path={path} http_status={} duration_ms={}",
        status.as_u16(),
        started_at.elapsed().as_millis()
    );

    response
}
