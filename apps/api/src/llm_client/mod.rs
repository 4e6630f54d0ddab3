//! LLM Client: the single point of entry for all Gemini API calls in Skillcheck.
//!
//! No other module may call the generative-language API directly.
//! One call per invocation: there is no retry here, failures go straight back
//! to the caller.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    /// The environment variable holding the API key is unset or empty.
    #[error("Missing {0}")]
    MissingApiKey(String),

    /// Transport failure. Always built through `From`, which drops the
    /// request URL from the error.
    #[error("HTTP error")]
    Http(#[source] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Http(err.without_url())
    }
}

/// Header carrying the API key, so the key never appears in a URL.
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate, if the model produced one.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// Thin wrapper over the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key_var: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.upstream_timeout_secs))
                .build()?,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            api_key_var: config.gemini_api_key_var.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Reads the API key from the environment. Called per request, so a key
    /// added or rotated while the server runs is picked up immediately.
    fn api_key(&self) -> Result<String, LlmError> {
        std::env::var(&self.api_key_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey(self.api_key_var.clone()))
    }

    /// Sends a single prompt and returns the decoded response envelope.
    /// A non-success status is returned as `LlmError::Api` with the raw body.
    pub async fn generate_content(&self, prompt: &str) -> Result<GeminiResponse, LlmError> {
        let api_key = self.api_key()?;

        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let url = format!(
            "{}/v1/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key.as_str())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let gemini_response: GeminiResponse = response.json().await?;

        if let Some(usage) = &gemini_response.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(gemini_response)
    }
}

/// Removes every ```json and ``` marker from model output and trims whitespace.
/// Applying it to already-clean text is a no-op.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}
