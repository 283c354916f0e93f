//! Greeting and health JSON microservice.
//!
//! Serves three fixed routes:
//!
//! ```text
//! GET /api/hello         -> {"message": "Hello from Spring Boot Microservice!", "status": "success"}
//! GET /api/hello/{name}  -> {"message": "Hello, {name}!", "status": "success"}
//! GET /api/health        -> {"status": "UP", "service": "microservice"}
//! ```
//!
//! Any other path is answered by the router's 404.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: Handlers, route table, and OpenAPI document
//! - [`metrics`]: Prometheus request metrics
//! - [`server`]: Listener binding and graceful shutdown
//! - [`utils`]: Signal handling

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod server;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
