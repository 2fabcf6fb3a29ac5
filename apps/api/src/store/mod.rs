//! SQLite persistence for candidate profiles and screening answers.
//!
//! Two flat tables, single-statement auto-commit writes. Candidates upsert
//! by email; answers are an append-only log keyed by candidate email and
//! question number.

use sqlx::SqlitePool;

use crate::models::candidate::{Candidate, CandidateRow};
use crate::models::screening::AnswerRow;

/// Upserts a candidate keyed by the unique email column.
///
/// `INSERT OR REPLACE` rewrites the whole row, so a resubmission refreshes
/// every profile field and the `created_at` timestamp.
pub async fn upsert_candidate(pool: &SqlitePool, candidate: &Candidate) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO candidates
            (name, email, phone, years_experience, desired_positions,
             current_location, tech_stack, language)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(&candidate.name)
    .bind(&candidate.email)
    .bind(&candidate.phone)
    .bind(candidate.years_experience)
    .bind(candidate.desired_positions.join(","))
    .bind(&candidate.current_location)
    .bind(candidate.tech_stack.join(","))
    .bind(candidate.language.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

/// Appends one answered question to the screening log.
pub async fn insert_answer(
    pool: &SqlitePool,
    candidate_email: &str,
    q_number: i64,
    question: &str,
    answer: &str,
    sentiment: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO answers (candidate_email, q_number, question, answer, sentiment)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(candidate_email)
    .bind(q_number)
    .bind(question)
    .bind(answer)
    .bind(sentiment)
    .execute(pool)
    .await?;

    Ok(())
}

/// All candidates, newest first. `id` breaks ties within the same second.
pub async fn list_candidates(pool: &SqlitePool) -> Result<Vec<CandidateRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, name, email, phone, years_experience, desired_positions,
               current_location, tech_stack, language, created_at
        FROM candidates
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// The persisted transcript for one candidate, in question order.
pub async fn list_answers(
    pool: &SqlitePool,
    candidate_email: &str,
) -> Result<Vec<AnswerRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, candidate_email, q_number, question, answer, sentiment, created_at
        FROM answers
        WHERE candidate_email = ?1
        ORDER BY q_number ASC, id ASC
        "#,
    )
    .bind(candidate_email)
    .fetch_all(pool)
    .await
}
