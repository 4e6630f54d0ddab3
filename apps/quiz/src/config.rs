use anyhow::{Context, Result};
use reqwest::Url;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// Base URL of the Skillcheck API.
    pub api_url: String,
    /// Address of the external interview tool shown on the landing menu.
    pub interview_url: String,
    pub rust_log: String,
}

impl QuizConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_url = env_or("SKILLCHECK_API_URL", "http://localhost:8080");
        Url::parse(&api_url)
            .with_context(|| format!("SKILLCHECK_API_URL '{api_url}' is not a valid URL"))?;

        Ok(QuizConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
            interview_url: env_or("INTERVIEW_URL", "http://localhost:8501"),
            rust_log: env_or("RUST_LOG", "warn"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
