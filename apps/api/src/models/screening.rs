use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Answer format of a screening question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    /// Free-text answer.
    Open,
    /// One choice out of a fixed option list.
    MultipleChoice,
}

/// One screening question handed to the candidate.
///
/// Lives only inside a session; the persisted record is the answer row,
/// which carries the question text by value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaItem {
    pub question: String,
    pub kind: QuestionKind,
    /// Present only for multiple-choice questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl QaItem {
    pub fn open(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            kind: QuestionKind::Open,
            options: None,
        }
    }

    pub fn multiple_choice(
        question: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            question: question.into(),
            kind: QuestionKind::MultipleChoice,
            options: Some(options.into_iter().map(Into::into).collect()),
        }
    }
}

/// An `answers` table row, one entry of the append-only screening log.
///
/// `candidate_email` references the candidate by value; the store does not
/// enforce it as a foreign key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnswerRow {
    pub id: i64,
    pub candidate_email: String,
    pub q_number: i64,
    pub question: String,
    pub answer: String,
    pub sentiment: String,
    pub created_at: NaiveDateTime,
}
