//! Axum route handlers for the Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::generate_questions;
use crate::generation::models::{GenerateQuestionsRequest, GenerateQuestionsResponse};
use crate::state::AppState;

/// POST /api/generate-questions
///
/// Generates MCQs for a job description. Returns `{questions}` on success;
/// every failure is rendered by `AppError` as a JSON error body.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    payload: Result<Json<GenerateQuestionsRequest>, JsonRejection>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    let Json(request) =
        payload.map_err(|e| AppError::Validation(format!("Invalid request body: {}", e.body_text())))?;

    validate_request(&request, state.config.max_questions)?;

    let generation_id = Uuid::new_v4();
    let questions = generate_questions(&state.llm, &request)
        .instrument(info_span!("generation", %generation_id))
        .await?;

    info!(%generation_id, "Generated {} questions", questions.len());

    Ok(Json(GenerateQuestionsResponse { questions }))
}

/// Rejects requests that must never reach the upstream API.
fn validate_request(request: &GenerateQuestionsRequest, max_questions: u32) -> Result<(), AppError> {
    if request.description.trim().is_empty() {
        return Err(AppError::Validation(
            "description cannot be empty".to_string(),
        ));
    }
    if request.num_questions == 0 || request.num_questions > max_questions {
        return Err(AppError::Validation(format!(
            "numQuestions must be between 1 and {max_questions}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::models::Difficulty;

    fn request(description: &str, num_questions: u32) -> GenerateQuestionsRequest {
        GenerateQuestionsRequest {
            description: description.to_string(),
            num_questions,
            difficulty: Difficulty::Medium,
        }
    }

    #[test]
    fn test_validate_accepts_typical_request() {
        assert!(validate_request(&request("Site reliability engineer", 3), 20).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_description() {
        let err = validate_request(&request("  \n\t", 3), 20).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("description")));
    }

    #[test]
    fn test_validate_rejects_zero_questions() {
        assert!(matches!(
            validate_request(&request("Data engineer", 0), 20),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_more_than_max() {
        assert!(validate_request(&request("Data engineer", 20), 20).is_ok());
        assert!(matches!(
            validate_request(&request("Data engineer", 21), 20),
            Err(AppError::Validation(msg)) if msg.contains("between 1 and 20")
        ));
    }
}
