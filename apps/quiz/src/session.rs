//! Quiz session state machine.
//!
//! `SessionState` is a single value. Every user action produces a new value
//! through `apply`; nothing mutates a state in place. The phase is derived
//! from the fields, so it can never disagree with them:
//!
//! - `loading` set            → `Loading`
//! - no questions             → `Idle`
//! - questions left to answer → `Answering`
//! - all questions answered   → `Reviewing`

use thiserror::Error;

use crate::question::{AnsweredQuestion, Difficulty, GenerationRequest, Question};

pub const MAX_QUESTIONS: u32 = 20;
pub const DEFAULT_NUM_QUESTIONS: u32 = 3;

pub const EMPTY_DESCRIPTION_MESSAGE: &str = "Paste the job description first!";
pub const NO_QUESTIONS_MESSAGE: &str = "No questions returned. Try a longer or clearer JD.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Answering,
    Reviewing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    EditDescription(String),
    SetNumQuestions(u32),
    SetDifficulty(Difficulty),
    Generate,
    GenerationSucceeded(Vec<Question>),
    GenerationFailed(String),
    Select(String),
    Next,
    Restart,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::EditDescription(_) => "edit description",
            Action::SetNumQuestions(_) => "set number of questions",
            Action::SetDifficulty(_) => "set difficulty",
            Action::Generate => "generate",
            Action::GenerationSucceeded(_) | Action::GenerationFailed(_) => "finish generation",
            Action::Select(_) => "select",
            Action::Next => "next",
            Action::Restart => "restart",
        }
    }
}

/// A rejected action. The state the action was applied to stays current.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Select an option.")]
    NoSelection,

    #[error("'{0}' is not an option for this question")]
    UnknownOption(String),

    #[error("Number of questions must be between 1 and {}, got {0}", MAX_QUESTIONS)]
    InvalidQuestionCount(u32),

    #[error("Cannot {action} while {phase:?}")]
    InvalidAction { action: &'static str, phase: Phase },
}

/// Inputs collected on the idle screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationForm {
    pub description: String,
    pub num_questions: u32,
    pub difficulty: Difficulty,
}

impl Default for GenerationForm {
    fn default() -> Self {
        GenerationForm {
            description: String::new(),
            num_questions: DEFAULT_NUM_QUESTIONS,
            difficulty: Difficulty::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    form: GenerationForm,
    questions: Vec<Question>,
    current_index: usize,
    selected: Option<String>,
    answered: Vec<AnsweredQuestion>,
    score: u32,
    loading: bool,
    error: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.questions.is_empty() {
            Phase::Idle
        } else if self.current_index < self.questions.len() {
            Phase::Answering
        } else {
            Phase::Reviewing
        }
    }

    pub fn form(&self) -> &GenerationForm {
        &self.form
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn answered(&self) -> &[AnsweredQuestion] {
        &self.answered
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The request the current form would send.
    pub fn generation_request(&self) -> GenerationRequest {
        GenerationRequest {
            description: self.form.description.clone(),
            num_questions: self.form.num_questions,
            difficulty: self.form.difficulty,
        }
    }

    /// Returns the state that follows `action`, or why the action was rejected.
    pub fn apply(&self, action: Action) -> Result<SessionState, SessionError> {
        let phase = self.phase();
        match (phase, action) {
            (Phase::Idle, Action::EditDescription(description)) => Ok(SessionState {
                form: GenerationForm {
                    description,
                    ..self.form.clone()
                },
                ..self.clone()
            }),
            (Phase::Idle, Action::SetNumQuestions(num_questions)) => {
                if !(1..=MAX_QUESTIONS).contains(&num_questions) {
                    return Err(SessionError::InvalidQuestionCount(num_questions));
                }
                Ok(SessionState {
                    form: GenerationForm {
                        num_questions,
                        ..self.form.clone()
                    },
                    ..self.clone()
                })
            }
            (Phase::Idle, Action::SetDifficulty(difficulty)) => Ok(SessionState {
                form: GenerationForm {
                    difficulty,
                    ..self.form.clone()
                },
                ..self.clone()
            }),
            (Phase::Idle, Action::Generate) => {
                if self.form.description.trim().is_empty() {
                    return Ok(SessionState {
                        error: Some(EMPTY_DESCRIPTION_MESSAGE.to_string()),
                        ..self.clone()
                    });
                }
                Ok(SessionState {
                    form: self.form.clone(),
                    loading: true,
                    ..SessionState::default()
                })
            }
            (Phase::Loading, Action::GenerationSucceeded(questions)) => {
                if questions.is_empty() {
                    return Ok(self.idle_with_error(NO_QUESTIONS_MESSAGE.to_string()));
                }
                Ok(SessionState {
                    form: self.form.clone(),
                    questions,
                    ..SessionState::default()
                })
            }
            (Phase::Loading, Action::GenerationFailed(detail)) => Ok(self.idle_with_error(detail)),
            (Phase::Answering, Action::Select(key)) => {
                let known = self
                    .current_question()
                    .is_some_and(|question| question.options.contains_key(&key));
                if !known {
                    return Err(SessionError::UnknownOption(key));
                }
                Ok(SessionState {
                    selected: Some(key),
                    ..self.clone()
                })
            }
            (Phase::Answering, Action::Next) => {
                let selected = self.selected.clone().ok_or(SessionError::NoSelection)?;
                let question = self
                    .current_question()
                    .cloned()
                    .ok_or(SessionError::InvalidAction {
                        action: "next",
                        phase,
                    })?;

                let correct = selected == question.answer;
                let mut answered = self.answered.clone();
                answered.push(AnsweredQuestion {
                    question,
                    selected,
                    correct,
                });

                Ok(SessionState {
                    answered,
                    score: self.score + u32::from(correct),
                    selected: None,
                    current_index: self.current_index + 1,
                    ..self.clone()
                })
            }
            (Phase::Reviewing, Action::Restart) => Ok(SessionState {
                form: GenerationForm {
                    description: String::new(),
                    ..self.form.clone()
                },
                ..SessionState::default()
            }),
            (phase, action) => Err(SessionError::InvalidAction {
                action: action.name(),
                phase,
            }),
        }
    }

    fn idle_with_error(&self, message: String) -> SessionState {
        SessionState {
            form: self.form.clone(),
            error: Some(message),
            ..SessionState::default()
        }
    }
}
