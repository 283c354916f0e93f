//! HTTP API handlers.

use axum::{extract::Path, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Greeting returned by `GET /api/hello`.
pub const HELLO_MESSAGE: &str = "Hello from Spring Boot Microservice!";
/// Status reported alongside every greeting.
pub const STATUS_SUCCESS: &str = "success";
/// Status reported by the health endpoint.
pub const STATUS_UP: &str = "UP";
/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "microservice";

/// Application state shared with handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// Prometheus handle, present when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state without a metrics exporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state that exposes `/metrics` through the given handle.
    pub fn with_metrics(handle: PrometheusHandle) -> Self {
        Self {
            metrics: Some(handle),
        }
    }
}

/// Greeting response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GreetingResponse {
    /// Greeting text.
    #[schema(example = "Hello, World!")]
    pub message: String,
    /// Always "success".
    #[schema(example = "success")]
    pub status: String,
}

impl GreetingResponse {
    /// Build a successful greeting carrying `message`.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: STATUS_SUCCESS.to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always "UP".
    #[schema(example = "UP")]
    pub status: String,
    /// Service name.
    #[schema(example = "microservice")]
    pub service: String,
}

impl HealthResponse {
    /// The only health state this service reports.
    pub fn up() -> Self {
        Self {
            status: STATUS_UP.to_string(),
            service: SERVICE_NAME.to_string(),
        }
    }
}

/// Format the personalised greeting. `name` is used verbatim.
pub fn greeting_for(name: &str) -> String {
    format!("Hello, {}!", name)
}

/// Constant greeting handler.
#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "greeting",
    responses((status = 200, description = "Constant greeting", body = GreetingResponse))
)]
pub async fn hello() -> Json<GreetingResponse> {
    Json(GreetingResponse::success(HELLO_MESSAGE))
}

/// Personalised greeting handler.
#[utoipa::path(
    get,
    path = "/api/hello/{name}",
    tag = "greeting",
    params(("name" = String, Path, description = "Name to greet, used verbatim")),
    responses((status = 200, description = "Personalised greeting", body = GreetingResponse))
)]
pub async fn hello_name(Path(name): Path<String>) -> Json<GreetingResponse> {
    tracing::debug!(name = %name, "greeting by name");
    Json(GreetingResponse::success(greeting_for(&name)))
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::up())
}

/// Prometheus exposition handler.
pub async fn prometheus_metrics(handle: PrometheusHandle) -> String {
    handle.render()
}
