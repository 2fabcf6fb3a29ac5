//! The screening flow as an explicit state machine value.
//!
//! One `ScreeningSession` per applicant, moving collect → questions → done
//! with no back-navigation. Transitions are pure so they unit-test without
//! HTTP or storage; the handlers decide when to persist.

use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::models::candidate::Candidate;
use crate::models::screening::QaItem;
use crate::validation::is_exit_keyword;

/// Stages of one screening session, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Collect,
    Questions,
    Done,
}

#[derive(Debug, Error, PartialEq)]
pub enum FlowError {
    #[error("expected stage {expected:?}, session is in {actual:?}")]
    WrongStage { expected: Stage, actual: Stage },

    #[error("no question numbered {0} in this session")]
    UnknownQuestion(i64),

    #[error("answer is not one of the question's options")]
    NotAnOption,
}

/// Everything one session carries: current stage, the accepted candidate
/// profile, the fixed question set, and which questions were answered.
#[derive(Debug, Clone, Default)]
pub struct ScreeningSession {
    stage: Stage,
    candidate: Option<Candidate>,
    questions: Vec<QaItem>,
    answered: BTreeSet<i64>,
}

impl ScreeningSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        self.candidate.as_ref()
    }

    /// Accepts the validated intake form and opens the question stage.
    pub fn submit_profile(&mut self, candidate: Candidate) -> Result<(), FlowError> {
        self.expect_stage(Stage::Collect)?;
        self.candidate = Some(candidate);
        self.stage = Stage::Questions;
        Ok(())
    }

    pub fn has_questions(&self) -> bool {
        !self.questions.is_empty()
    }

    /// Installs the generated question set. First install wins; the set
    /// stays fixed for the session's lifetime.
    pub fn install_questions(&mut self, items: Vec<QaItem>) {
        if self.questions.is_empty() {
            self.questions = items;
        }
    }

    pub fn questions(&self) -> &[QaItem] {
        &self.questions
    }

    /// Looks up the target of an answer and enforces multiple-choice
    /// membership. Question numbering is 1-based, matching the persisted
    /// rows.
    pub fn answer_target(&self, q_number: i64, answer: &str) -> Result<&QaItem, FlowError> {
        self.expect_stage(Stage::Questions)?;

        let item = usize::try_from(q_number)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| self.questions.get(idx))
            .ok_or(FlowError::UnknownQuestion(q_number))?;

        if let Some(options) = &item.options {
            if !options.iter().any(|option| option == answer) {
                return Err(FlowError::NotAnOption);
            }
        }
        Ok(item)
    }

    /// Marks a question answered. Re-answering the same number is allowed;
    /// the persisted log is append-only either way.
    pub fn mark_answered(&mut self, q_number: i64) {
        self.answered.insert(q_number);
    }

    pub fn answered_count(&self) -> usize {
        self.answered.len()
    }

    /// Exit-keyword listener for the question stage. Returns true when the
    /// message ended the session.
    pub fn observe_message(&mut self, message: &str) -> bool {
        if self.stage == Stage::Questions && is_exit_keyword(message) {
            self.stage = Stage::Done;
            return true;
        }
        false
    }

    /// Ends the question stage regardless of how many questions were
    /// answered. Idempotent once done.
    pub fn finish(&mut self) -> Result<(), FlowError> {
        match self.stage {
            Stage::Collect => Err(FlowError::WrongStage {
                expected: Stage::Questions,
                actual: Stage::Collect,
            }),
            Stage::Questions | Stage::Done => {
                self.stage = Stage::Done;
                Ok(())
            }
        }
    }

    pub fn expect_stage(&self, expected: Stage) -> Result<(), FlowError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(FlowError::WrongStage {
                expected,
                actual: self.stage,
            })
        }
    }
}
