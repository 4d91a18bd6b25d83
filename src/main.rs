//! Wanderhub - a travel booking storefront service

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wanderhub::{
    api,
    config::{Config, DataMode},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wanderhub=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Wanderhub...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    match config.backend.mode() {
        DataMode::Demo => {
            tracing::info!("No backend configured, running in demo mode with bundled fixtures")
        }
        DataMode::Live => tracing::info!("Backend configured: {}", config.backend.url),
    }
    if config.assistant.enabled() {
        tracing::info!("Assistant relay enabled ({})", config.assistant.model);
    } else {
        tracing::info!("Assistant relay not configured, serving canned responses");
    }

    // Wire data source and services, then build the router
    let state = api::build_state(&config);
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
