//! HTTP server lifecycle.

use std::future::Future;

use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::error::Result;
use crate::utils::shutdown_signal;

/// Bind the configured address and serve until a shutdown signal arrives.
pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;

    serve_with_shutdown(listener, state, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
