//! Plain-text views of the landing menu, the current question and the review.

use std::fmt::Write;

use crate::session::SessionState;

pub fn render_landing() -> String {
    [
        "Welcome to Skillcheck",
        "Choose one of the options below to proceed.",
        "",
        "  1) Interview",
        "  2) MCQ Test",
        "  q) Quit",
    ]
    .join("\n")
}

pub fn render_interview(interview_url: &str) -> String {
    format!("The interview tool runs at {interview_url}\nOpen it in your browser to start.")
}

/// The current question, with the tentative selection marked `>`.
pub fn render_question(state: &SessionState) -> String {
    let Some(question) = state.current_question() else {
        return String::new();
    };

    let mut out = format!("Q{}. {}\n", state.current_index() + 1, question.question);
    for (key, text) in &question.options {
        let marker = if state.selected() == Some(key.as_str()) { ">" } else { " " };
        let _ = writeln!(out, "  {marker} {key}: {text}");
    }
    out
}

/// Final score plus every answered question. The correct option is marked
/// `✓`; a wrong selection is marked `✗`.
pub fn render_review(state: &SessionState) -> String {
    let mut out = format!(
        "Test Complete! Score: {}/{}\n",
        state.score(),
        state.questions().len()
    );

    for (i, answered) in state.answered().iter().enumerate() {
        let _ = write!(out, "\nQ{}. {}\n", i + 1, answered.question.question);
        for (key, text) in &answered.question.options {
            let mark = if *key == answered.question.answer {
                "✓"
            } else if *key == answered.selected {
                "✗"
            } else {
                " "
            };
            let _ = writeln!(out, "  {mark} {key}: {text}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::tests::question;
    use crate::session::Action;

    fn answering() -> SessionState {
        SessionState::new()
            .apply(Action::EditDescription("Backend engineer".to_string()))
            .and_then(|s| s.apply(Action::Generate))
            .and_then(|s| s.apply(Action::GenerationSucceeded(vec![question("Q1", "B"), question("Q2", "A")])))
            .unwrap()
    }

    #[test]
    fn test_render_question_marks_selection() {
        let state = answering().apply(Action::Select("C".to_string())).unwrap();
        let text = render_question(&state);
        assert!(text.starts_with("Q1. Q1\n"));
        assert!(text.contains("  > C: c\n"));
        assert!(text.contains("    A: a\n"));
    }

    #[test]
    fn test_render_question_in_idle_is_empty() {
        assert_eq!(render_question(&SessionState::new()), "");
    }

    #[test]
    fn test_render_review_marks_correct_and_wrong() {
        let state = answering()
            .apply(Action::Select("B".to_string()))
            .and_then(|s| s.apply(Action::Next))
            .and_then(|s| s.apply(Action::Select("D".to_string())))
            .and_then(|s| s.apply(Action::Next))
            .unwrap();

        let text = render_review(&state);
        assert!(text.starts_with("Test Complete! Score: 1/2\n"));
        // Q2: correct A, wrong pick D
        let q2 = text.split("Q2. Q2\n").nth(1).unwrap();
        assert!(q2.contains("  ✓ A: a\n"));
        assert!(q2.contains("  ✗ D: d\n"));
        assert!(q2.contains("    B: b\n"));
    }

    #[test]
    fn test_render_interview_shows_address() {
        assert!(render_interview("http://localhost:8501").contains("http://localhost:8501"));
    }
}
