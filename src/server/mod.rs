/// HTTP health endpoint for the load balancer

pub mod handlers;
pub mod routes;

pub use routes::create_router;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::core::HealthState;

/// Bind `addr` and serve the health endpoint until the process is killed
pub async fn run(addr: &str, state: HealthState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {}", addr))?;

    serve(listener, state).await
}

/// Serve the health endpoint on an already bound listener
pub async fn serve(listener: TcpListener, state: HealthState) -> Result<()> {
    let local_addr = listener.local_addr().context("Failed to read listener address")?;
    info!(addr = %local_addr, "HTTP server listening");

    axum::serve(listener, create_router(state))
        .await
        .context("HTTP server failed")?;

    Ok(())
}
