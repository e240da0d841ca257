mod config;
mod embeddings;
mod errors;
mod models;
mod ranking;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embeddings::{CosineSimilarity, Encoder, HttpEncoder};
use crate::ranking::ranker::RelevanceRanker;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting relevance ranker v{}", env!("CARGO_PKG_VERSION"));

    // Initialize embedding client
    let encoder = HttpEncoder::new(config.encoder_config())
        .context("Failed to build embedding HTTP client")?;
    info!(
        "Encoder initialized (model: {}, endpoint: {})",
        encoder.model(),
        config.embedding_api_url
    );

    let ranker = RelevanceRanker::new(Arc::new(encoder), Arc::new(CosineSimilarity));

    let state = AppState {
        config: config.clone(),
        ranker,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
