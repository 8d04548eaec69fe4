mod analysis;
mod config;
mod errors;
mod keywords;
mod models;
mod parsing;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::keywords::dictionary::KeywordDictionary;
use crate::parsing::pdf::PdfExtractor;
use crate::parsing::upload::format_file_size;
use crate::routes::build_router;
use crate::state::AppState;

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

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Keyword dictionary is built once and shared read-only by every request
    let dictionary = Arc::new(KeywordDictionary::builtin());
    info!("Keyword dictionary loaded ({} keywords)", dictionary.total_keywords());

    info!(
        "Upload limit: {}",
        format_file_size(config.max_upload_bytes)
    );

    let state = AppState {
        config: config.clone(),
        dictionary,
        extractor: Arc::new(PdfExtractor),
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
