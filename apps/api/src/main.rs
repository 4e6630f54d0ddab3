mod config;
mod errors;
mod generation;
mod llm_client;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skillcheck API v{}", env!("CARGO_PKG_VERSION"));

    // The key is read per request; only warn here so the server still starts.
    if std::env::var(&config.gemini_api_key_var).is_err() {
        warn!(
            "{} is not set; generation requests will fail until it is",
            config.gemini_api_key_var
        );
    }

    let llm = GeminiClient::new(&config).context("Failed to build HTTP client")?;
    info!(
        "Gemini client initialized (model: {}, timeout: {}s)",
        llm.model(),
        config.upstream_timeout_secs
    );

    let state = AppState {
        llm,
        config: config.clone(),
    };

    // The quiz client is a separate process and may be served from another origin.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
