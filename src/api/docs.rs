//! OpenAPI document for the public routes.

use axum::Json;
use utoipa::OpenApi;

use super::handlers::{self, GreetingResponse, HealthResponse};

/// OpenAPI description of the `/api` routes.
#[derive(OpenApi)]
#[openapi(
    info(title = "microservice", description = "Greeting and health endpoints"),
    paths(handlers::hello, handlers::hello_name, handlers::health),
    components(schemas(GreetingResponse, HealthResponse)),
    tags(
        (name = "greeting", description = "Greeting endpoints"),
        (name = "health", description = "Liveness endpoint")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
