//! Headless server binary.
//!
//! Starts the generation scheduler and the axum web server, then waits for Ctrl+C.

use std::sync::Arc;

use qr_engine::StyledRenderer;
use tracing_subscriber::EnvFilter;

use qr_studio_lib::app::SharedState;
use qr_studio_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting QR Studio");

    let (settings, config, fonts) = qr_studio_lib::init_foundation()?;
    let state = SharedState::new(settings, config, fonts, Arc::new(StyledRenderer));

    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(server_state).await {
            tracing::error!("Server failed: {e}");
        }
    });

    // Initial card with the default form values
    if let Err(e) = state.request_generation().await {
        tracing::error!("Initial generation failed: {e}");
    }

    tracing::info!(port = state.server_port(), "Server running. Press Ctrl+C to stop.");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    state.shutdown_token().cancel();
    if let Err(e) = server_handle.await {
        tracing::error!("Server task failed: {e}");
    }
    Ok(())
}
