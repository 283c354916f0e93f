//! HTTP API route definitions.

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::docs::openapi_json;
use super::handlers::{health, hello, hello_name, prometheus_metrics, AppState};
use crate::metrics::track_requests;

/// Create the API router.
///
/// `/api/hello/` (empty name) does not match `/api/hello/:name` and falls
/// through to the router's 404.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/api/hello", get(hello))
        .route("/api/hello/:name", get(hello_name))
        .route("/api/health", get(health))
        .route_layer(middleware::from_fn(track_requests))
        .route("/api-docs/openapi.json", get(openapi_json));

    if let Some(handle) = state.metrics.clone() {
        router = router.route("/metrics", get(move || prometheus_metrics(handle)));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
