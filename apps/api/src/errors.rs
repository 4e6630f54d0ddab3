use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as a JSON object with a top-level `error` string.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The upstream credential variable is unset. Carries the variable name.
    #[error("Missing {0}")]
    Configuration(String),

    #[error("Gemini API failed with status {status}")]
    Upstream { status: u16, details: Value },

    #[error("Invalid JSON from Gemini")]
    MalformedResponse { raw: String },

    #[error("Invalid question format from Gemini: {reason}")]
    InvalidQuestions { reason: String, raw: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey(var) => AppError::Configuration(var),
            LlmError::Api { status, body } => AppError::Upstream {
                status,
                // Pass the upstream error body through as-is; fall back to the raw text.
                details: serde_json::from_str(&body).unwrap_or(Value::String(body)),
            },
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Configuration(var) => {
                tracing::error!("{var} missing");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": format!("Missing {var}") }),
                )
            }
            AppError::Upstream { status, details } => {
                tracing::error!("Gemini API error (status {status}): {details}");
                (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    json!({ "error": "Gemini API failed", "details": details }),
                )
            }
            AppError::MalformedResponse { raw } => {
                tracing::error!("JSON parse error, raw: {raw:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Invalid JSON from Gemini", "raw": raw }),
                )
            }
            AppError::InvalidQuestions { reason, raw } => {
                tracing::error!("Question shape error: {reason}, raw: {raw:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Invalid question format from Gemini",
                        "details": reason,
                        "raw": raw
                    }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error", "details": format!("{e:#}") }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Converts a handler panic into the same JSON shape as `AppError::Internal`.
/// Installed through `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!("Handler panicked: {details}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error", "details": details })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_configuration_error_names_the_variable() {
        let response = AppError::Configuration("GEMINI_API_KEY".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Missing GEMINI_API_KEY" })
        );
    }

    #[tokio::test]
    async fn test_upstream_error_keeps_upstream_status() {
        let err: AppError = LlmError::Api {
            status: 429,
            body: r#"{"error":{"code":429,"message":"quota"}}"#.to_string(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Gemini API failed");
        assert_eq!(body["details"]["error"]["message"], "quota");
    }

    #[tokio::test]
    async fn test_upstream_error_with_plain_text_body() {
        let err: AppError = LlmError::Api {
            status: 503,
            body: "overloaded".to_string(),
        }
        .into();
        let body = body_json(err.into_response()).await;
        assert_eq!(body["details"], "overloaded");
    }

    #[tokio::test]
    async fn test_malformed_response_surfaces_raw_text() {
        let response = AppError::MalformedResponse {
            raw: "not json".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Invalid JSON from Gemini", "raw": "not json" })
        );
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let response = AppError::Validation("description cannot be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "description cannot be empty");
    }

    #[tokio::test]
    async fn test_transport_error_details_list_each_cause_once() {
        let base_url = crate::test_support::closed_base_url().await;
        let transport = reqwest::Client::new().get(&base_url).send().await.unwrap_err();
        let err: AppError = LlmError::from(transport).into();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        let details = body["details"].as_str().unwrap();
        assert!(details.starts_with("HTTP error: error sending request"), "{details}");
        assert_eq!(details.matches("error sending request").count(), 1, "{details}");
        assert!(!details.contains(&base_url), "{details}");
    }

    #[tokio::test]
    async fn test_panic_response_reports_message() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["details"], "boom");
    }
}
