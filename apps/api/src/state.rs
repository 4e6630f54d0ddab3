use crate::config::Config;
use crate::llm_client::GeminiClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; each request works on its own data.
#[derive(Clone)]
pub struct AppState {
    pub llm: GeminiClient,
    pub config: Config,
}
