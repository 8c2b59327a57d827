//! AI Service
//!
//! Liveness check on `GET /` and message processing on `POST /process`,
//! backed by a fallback chain of AI agents.

use std::net::SocketAddr;

use ai_service::agents::AgentManager;
use ai_service::config::Config;
use ai_service::server::{build_router, shutdown_signal};
use ai_service::AppState;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Shared client (connection pooling) for all HTTP-backed agents
    let client = reqwest::Client::builder()
        .timeout(config.agents.timeout())
        .build()?;

    let manager = AgentManager::from_config(&config, client);
    if manager.is_empty() {
        warn!("No agents registered; /process will answer 503");
    }
    let state = AppState::from_manager(manager);

    let app = build_router(state);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!("🚀 Server running on http://{}", addr);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
