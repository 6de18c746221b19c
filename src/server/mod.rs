//! HTTP server for mashup
//!
//! Serves the map page and the JSON endpoints it polls.

pub mod routes;
pub mod state;

use crate::config::Config;
use crate::error::{Error, Result};
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Start the HTTP server
///
/// # Arguments
/// * `config` - Server configuration
///
/// # Returns
/// Never returns unless the server shuts down
pub async fn run(config: Config) -> Result<()> {
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| Error::Server(format!("Invalid server address: {}", e)))?;

    info!("Opening places database {}", config.database.path.display());
    let state = AppState::from_config(&config).await?;

    if state.maps_api_key.is_none() {
        warn!("No map API key configured (set API_KEY or api_keys.maps); the map page will fail");
    }
    info!("Article lookups use the {} news source", state.news.name());

    serve(addr, Arc::new(state)).await
}

/// Serve prepared state on a specific address
///
/// Useful for tests or when the state is built by hand
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(format!("Server error: {}", e)))?;

    Ok(())
}
