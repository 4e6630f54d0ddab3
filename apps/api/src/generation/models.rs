//! Wire types for question generation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_NUM_QUESTIONS: u32 = 3;

/// Target difficulty passed through to the prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single multiple-choice question as produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    /// Option key ("A".."D") to option text.
    pub options: BTreeMap<String, String>,
    /// Key of the correct option.
    pub answer: String,
}

impl Question {
    /// Checks what serde cannot: non-empty text and options, and an answer
    /// that names one of the options.
    pub fn check_shape(&self) -> Result<(), String> {
        if self.question.trim().is_empty() {
            return Err("question text is empty".to_string());
        }
        if self.options.is_empty() {
            return Err("options are empty".to_string());
        }
        if !self.options.contains_key(&self.answer) {
            return Err(format!(
                "answer '{}' is not one of the options {:?}",
                self.answer,
                self.options.keys().collect::<Vec<_>>()
            ));
        }
        Ok(())
    }
}

/// Request body for `POST /api/generate-questions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsRequest {
    // Missing and empty are reported the same way by request validation.
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_num_questions")]
    pub num_questions: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
}

fn default_num_questions() -> u32 {
    DEFAULT_NUM_QUESTIONS
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: Vec<Question>,
}
