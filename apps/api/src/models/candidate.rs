use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Preferred screening language, as offered on the intake form.
///
/// `Other` is accepted but has no dedicated fallback question bank or
/// translation model; `inference::questions` and `inference::translate`
/// warn and fall back to English behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Other,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Other => "Other",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate profile as submitted through the intake form.
///
/// Email is the upsert key: resubmitting with the same email overwrites the
/// stored row wholesale. List fields keep their submitted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub years_experience: f64,
    pub desired_positions: Vec<String>,
    pub current_location: String,
    pub tech_stack: Vec<String>,
    pub language: Language,
}

/// A `candidates` table row. List fields stay comma-joined as stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub years_experience: f64,
    pub desired_positions: String,
    pub current_location: String,
    pub tech_stack: String,
    pub language: String,
    pub created_at: NaiveDateTime,
}
