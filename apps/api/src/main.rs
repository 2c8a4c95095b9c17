mod config;
mod errors;
mod models;
mod optimization;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::optimization::keywords::KeywordVocabulary;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Load the known-keyword vocabulary once; it is read-only from here on
    let vocabulary = match &config.known_keywords_path {
        Some(path) => KeywordVocabulary::load(path)
            .with_context(|| format!("Failed to load keywords from {}", path.display()))?,
        None => KeywordVocabulary::bundled().context("Bundled keyword list is invalid")?,
    };
    if vocabulary.is_empty() {
        warn!("Keyword vocabulary is empty; no job keywords will be extracted");
    }
    info!("Keyword vocabulary ready ({} entries)", vocabulary.len());

    let state = AppState {
        vocabulary: Arc::new(vocabulary),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // editor runs on a different origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
