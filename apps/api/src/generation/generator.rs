//! Question Generation: turns a job description into MCQs with one Gemini call.
//!
//! Flow: build prompt → generate_content → first candidate text →
//!       strip fences → parse JSON → shape check → return.
//!
//! The model's text is untrusted input. Every step after the call is fallible
//! and maps to a distinct `AppError` variant.

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::models::{GenerateQuestionsRequest, Question};
use crate::generation::prompts::QUESTION_PROMPT_TEMPLATE;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{strip_code_fences, GeminiClient};

/// Used when the model returns no candidate text at all.
const EMPTY_QUESTION_LIST: &str = "[]";

/// Runs the generation pipeline for one request.
///
/// The returned list is exactly what the model produced: it is never
/// truncated or padded to `num_questions`.
pub async fn generate_questions(
    llm: &GeminiClient,
    request: &GenerateQuestionsRequest,
) -> Result<Vec<Question>, AppError> {
    let prompt = build_question_prompt(request);

    info!(
        "Requesting {} {} questions from {}",
        request.num_questions,
        request.difficulty,
        llm.model()
    );
    let response = llm.generate_content(&prompt).await?;

    let raw_text = response
        .text()
        .filter(|text| !text.is_empty())
        .unwrap_or(EMPTY_QUESTION_LIST);

    let questions = parse_questions(raw_text)?;

    if questions.len() != request.num_questions as usize {
        warn!(
            "Model returned {} questions, {} requested",
            questions.len(),
            request.num_questions
        );
    }

    Ok(questions)
}

/// Fills the prompt template for a request.
pub fn build_question_prompt(request: &GenerateQuestionsRequest) -> String {
    QUESTION_PROMPT_TEMPLATE
        .replace("{num_questions}", &request.num_questions.to_string())
        .replace("{difficulty}", request.difficulty.as_str())
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        // Last, so placeholder-like text inside the description is left alone.
        .replace("{description}", request.description.trim())
}

/// Parses model output into questions.
///
/// Errors carry `raw_text` as the model returned it, fences included.
pub fn parse_questions(raw_text: &str) -> Result<Vec<Question>, AppError> {
    let cleaned = strip_code_fences(raw_text);

    let value: Value = serde_json::from_str(&cleaned).map_err(|e| {
        warn!("Model output is not JSON: {e}");
        AppError::MalformedResponse {
            raw: raw_text.to_string(),
        }
    })?;

    let questions: Vec<Question> =
        serde_json::from_value(value).map_err(|e| AppError::InvalidQuestions {
            reason: e.to_string(),
            raw: raw_text.to_string(),
        })?;

    for (index, question) in questions.iter().enumerate() {
        question
            .check_shape()
            .map_err(|reason| AppError::InvalidQuestions {
                reason: format!("question {}: {reason}", index + 1),
                raw: raw_text.to_string(),
            })?;
    }

    Ok(questions)
}
