//! HTTP server for the search page

pub mod routes;
pub mod state;

use crate::config::Config;
use crate::error::Result;
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Start the HTTP server
///
/// # Arguments
/// * `config` - Loaded configuration; becomes immutable from here on
///
/// # Returns
/// Never returns unless the server shuts down
pub async fn run(config: Config) -> Result<()> {
    let addr: SocketAddr = config.server_addr().parse().map_err(|e| {
        crate::error::Error::Server(format!("Invalid server address: {}", e))
    })?;

    info!("Backend: {}", config.backend_url());
    if config.maps_key().is_none() {
        info!("No maps embed key configured; results will not include a map");
    }

    let state = Arc::new(AppState::from_config(config)?);
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = TcpListener::bind(addr).await.map_err(|e| {
        crate::error::Error::Server(format!("Failed to bind to {}: {}", addr, e))
    })?;

    axum::serve(listener, app).await.map_err(|e| {
        crate::error::Error::Server(format!("Server error: {}", e))
    })?;

    Ok(())
}
