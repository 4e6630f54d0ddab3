//! Question types as served by the Skillcheck API.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "e" => Ok(Difficulty::Easy),
            "medium" | "m" => Ok(Difficulty::Medium),
            "hard" | "h" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty '{other}' (easy, medium or hard)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: BTreeMap<String, String>,
    pub answer: String,
}

impl Question {
    /// The option key the user meant by `input`: an exact match wins,
    /// otherwise the first key equal to it ignoring ASCII case.
    pub fn option_key(&self, input: &str) -> Option<&str> {
        if let Some((key, _)) = self.options.get_key_value(input) {
            return Some(key);
        }
        self.options
            .keys()
            .find(|key| key.eq_ignore_ascii_case(input))
            .map(String::as_str)
    }
}

/// A question the user has moved past. Never changes once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsweredQuestion {
    pub question: Question,
    pub selected: String,
    pub correct: bool,
}

/// Body of `POST /api/generate-questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub description: String,
    pub num_questions: u32,
    pub difficulty: Difficulty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parses_short_and_long_forms() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" e ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    fn question_with_keys(keys: &[&str]) -> Question {
        Question {
            question: "Q1".to_string(),
            options: keys.iter().map(|k| (k.to_string(), format!("text {k}"))).collect(),
            answer: keys[0].to_string(),
        }
    }

    #[test]
    fn test_option_key_matches_either_case() {
        let upper = question_with_keys(&["A", "B"]);
        assert_eq!(upper.option_key("b"), Some("B"));
        assert_eq!(upper.option_key("B"), Some("B"));

        let lower = question_with_keys(&["a", "b"]);
        assert_eq!(lower.option_key("B"), Some("b"));
        assert_eq!(lower.option_key("b"), Some("b"));
        assert_eq!(lower.option_key("c"), None);
    }

    #[test]
    fn test_option_key_prefers_exact_match() {
        let mixed = question_with_keys(&["A", "a"]);
        assert_eq!(mixed.option_key("a"), Some("a"));
        assert_eq!(mixed.option_key("A"), Some("A"));
    }

    #[test]
    fn test_generation_request_uses_wire_names() {
        let request = GenerationRequest {
            description: "Backend engineer".to_string(),
            num_questions: 2,
            difficulty: Difficulty::Easy,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"description": "Backend engineer", "numQuestions": 2, "difficulty": "easy"})
        );
    }
}
