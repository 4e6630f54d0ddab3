mod app;
mod client;
mod config;
mod controller;
mod question;
mod render;
mod session;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app::Terminal;
use crate::client::ApiClient;
use crate::config::QuizConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = QuizConfig::from_env()?;

    // Logs go to stderr so they never interleave with the quiz on stdout.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Using Skillcheck API at {}", config.api_url);

    let source = Arc::new(ApiClient::new(&config.api_url).context("Failed to build HTTP client")?);
    let mut terminal = Terminal::new(BufReader::new(tokio::io::stdin()), std::io::stdout());

    app::run(&mut terminal, &config, source).await
}
