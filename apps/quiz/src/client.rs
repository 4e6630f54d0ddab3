//! HTTP access to the question generation endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::question::{GenerationRequest, Question};

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure, or a success response whose body could not be read.
    #[error("Network or server error")]
    Network(#[from] reqwest::Error),

    /// The service answered with an error status; `message` is its `error` field.
    #[error("{message}")]
    Service { status: u16, message: String },
}

/// Where the quiz gets its questions from.
///
/// The controller holds an `Arc<dyn QuestionSource>`, so tests can swap the
/// HTTP client for a canned source.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Question>, ClientError>;
}

#[derive(Debug, Deserialize)]
struct GenerateQuestionsResponse {
    #[serde(default)]
    questions: Vec<Question>,
}

/// Client for the Skillcheck API. No timeout: a hung request waits forever.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl QuestionSource for ApiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Question>, ClientError> {
        let url = format!("{}/api/generate-questions", self.base_url);
        debug!("POST {url} ({} {} questions)", request.num_questions, request.difficulty);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .inspect_err(|e| warn!("Fetch failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("API error ({status}): {body}");
            return Err(ClientError::Service {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body: GenerateQuestionsResponse = response.json().await?;
        Ok(body.questions)
    }
}

/// The `error` field of an error body, or a generic message.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| "Server error".to_string())
}
