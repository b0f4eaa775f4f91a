mod assistant;
mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;
mod stats;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::assistant::gateway::CompletionGateway;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::MemStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tagged Assistant API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion gateway (credential checked here, not per request)
    let gateway = CompletionGateway::from_config(&config.gateway_config())?;
    info!(
        "Completion gateway initialized (model: {}, mode: {})",
        llm_client::MODEL,
        gateway.mode()
    );
    if !gateway.is_live() {
        warn!("OPENAI_API_KEY is missing or a placeholder");
    }

    // In-memory store; contents are lost on restart
    let store = MemStore::new();

    let state = AppState {
        store: Arc::new(store),
        gateway: Arc::new(gateway),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
