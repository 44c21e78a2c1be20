// Main entry point - Dependency injection and server setup
use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use fleet_dashboard::infrastructure::config::load_app_config;
use fleet_dashboard::infrastructure::simulated_source::SimulatedFleetSource;
use fleet_dashboard::presentation::router::{build_router, build_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config().context("Failed to load configuration")?;

    // Create snapshot source (infrastructure layer)
    let source = Arc::new(SimulatedFleetSource::new(&config.generator));

    // Create services and router (application + presentation layers)
    let router = build_router(build_state(source, config.dashboard));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Starting fleet-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
