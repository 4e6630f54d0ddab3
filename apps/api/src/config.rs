use anyhow::{Context, Result};

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Application configuration loaded from environment variables.
///
/// The Gemini API key itself is NOT part of the config: only the name of the
/// variable holding it. The key is read on every generation request.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub gemini_api_key_var: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub upstream_timeout_secs: u64,
    pub max_questions: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            gemini_api_key_var: optional_env("GEMINI_API_KEY_VAR", "GEMINI_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_base_url: optional_env("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            upstream_timeout_secs: parse_env("UPSTREAM_TIMEOUT_SECS", 60)
                .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?,
            max_questions: parse_env("MAX_QUESTIONS", 20)
                .context("MAX_QUESTIONS must be a positive integer")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            gemini_api_key_var: "GEMINI_API_KEY".to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            upstream_timeout_secs: 60,
            max_questions: 20,
        }
    }
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for environment variable '{key}'")),
        _ => Ok(default),
    }
}
