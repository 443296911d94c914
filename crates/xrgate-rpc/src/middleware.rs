// crates/xrgate-rpc/src/middleware.rs
//
// Middleware for the gateway: request logging and CORS.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::CorsLayer;

/// Logs method, path, status and latency of every request.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        "{} {} -> {} ({} ms)",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

/// Any origin, method and header may call the gateway.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
