//! Drives a `SessionState` with user actions and the generation call.

use std::sync::Arc;

use tracing::{info, warn};

use crate::client::QuestionSource;
use crate::session::{Action, Phase, SessionError, SessionState};

pub struct QuizController {
    source: Arc<dyn QuestionSource>,
    state: SessionState,
}

impl QuizController {
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self {
            source,
            state: SessionState::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Applies one action. On rejection the current state is kept.
    pub fn dispatch(&mut self, action: Action) -> Result<&SessionState, SessionError> {
        self.state = self.state.apply(action)?;
        Ok(&self.state)
    }

    /// Runs `Generate`, then the request if the form passed validation.
    /// Always settles out of `Loading`: success, empty result and failure
    /// each produce their own next state.
    pub async fn generate(&mut self) -> Result<&SessionState, SessionError> {
        self.dispatch(Action::Generate)?;
        if self.state.phase() != Phase::Loading {
            return Ok(&self.state);
        }

        let request = self.state.generation_request();
        let outcome = match self.source.generate(&request).await {
            Ok(questions) => {
                info!("Received {} questions", questions.len());
                Action::GenerationSucceeded(questions)
            }
            Err(err) => {
                warn!("Question generation failed: {err:?}");
                Action::GenerationFailed(err.to_string())
            }
        };

        self.dispatch(outcome)
    }
}
