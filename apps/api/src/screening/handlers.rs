use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::inference::questions::{MAX_QUESTIONS, MIN_QUESTIONS};
use crate::models::candidate::{Candidate, CandidateRow, Language};
use crate::models::screening::{AnswerRow, QaItem};
use crate::screening::flow::{ScreeningSession, Stage};
use crate::screening::sessions::SharedSession;
use crate::screening::GREETING;
use crate::state::AppState;
use crate::store;
use crate::validation::{sanitize_list, validate_email, validate_phone, validate_years};

const NEXT_STEPS: &str =
    "Our team will review your responses and contact you with next steps.";

// ─────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OpenSessionResponse {
    pub session_id: Uuid,
    pub stage: Stage,
    pub greeting: &'static str,
}

/// The intake form. Fields arrive as raw text; parsing and validation run
/// server-side in a fixed order.
#[derive(Debug, Deserialize)]
pub struct IntakeForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub years_experience: String,
    pub desired_positions: String,
    pub current_location: String,
    pub tech_stack: String,
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub stage: Stage,
    pub candidate: Candidate,
}

#[derive(Debug, Serialize)]
pub struct NumberedQuestion {
    pub number: i64,
    #[serde(flatten)]
    pub item: QaItem,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub stage: Stage,
    pub total: usize,
    pub questions: Vec<NumberedQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question_number: i64,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub question_number: i64,
    pub sentiment: String,
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub stage: Stage,
    pub ended: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FinishResponse {
    pub stage: Stage,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub stage: Stage,
    pub thank_you: String,
    pub candidate: Candidate,
    pub answered_questions: usize,
    pub next_steps: &'static str,
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
/// Opens a new screening session in the collect stage.
pub async fn handle_open_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<OpenSessionResponse>) {
    let session_id = state.sessions.create().await;
    info!("opened screening session {session_id}");
    (
        StatusCode::CREATED,
        Json(OpenSessionResponse {
            session_id,
            stage: Stage::Collect,
            greeting: GREETING,
        }),
    )
}

/// POST /api/v1/sessions/:id/profile
///
/// Accepts the intake form. Field checks run in a fixed order and the first
/// failure is the single error returned; nothing is persisted on rejection.
pub async fn handle_submit_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<IntakeForm>,
) -> Result<Json<ProfileResponse>, AppError> {
    let session = session_or_404(&state, id).await?;
    let mut session = session.lock().await;

    session.expect_stage(Stage::Collect)?;
    let candidate = parse_intake_form(&form)?;

    store::upsert_candidate(&state.db, &candidate).await?;
    session.submit_profile(candidate.clone())?;

    info!("stored candidate profile for {}", candidate.email);
    Ok(Json(ProfileResponse {
        stage: session.stage(),
        candidate,
    }))
}

/// GET /api/v1/sessions/:id/questions
///
/// Generates the question set on first entry and keeps it fixed for the
/// session, including across repeated calls.
pub async fn handle_get_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let session = session_or_404(&state, id).await?;
    let mut session = session.lock().await;

    session.expect_stage(Stage::Questions)?;

    if !session.has_questions() {
        let candidate = candidate_of(&session)?;
        let mut rng = StdRng::from_entropy();
        let generated = state
            .inference
            .generate_questions(
                &candidate.tech_stack,
                candidate.language,
                MIN_QUESTIONS..=MAX_QUESTIONS,
                &mut rng,
            )
            .await;
        session.install_questions(generated);
    }

    let questions: Vec<NumberedQuestion> = session
        .questions()
        .iter()
        .enumerate()
        .map(|(idx, item)| NumberedQuestion {
            number: idx as i64 + 1,
            item: item.clone(),
        })
        .collect();

    Ok(Json(QuestionsResponse {
        stage: session.stage(),
        total: questions.len(),
        questions,
    }))
}

/// POST /api/v1/sessions/:id/answers
///
/// Saves one answer: sentiment lookup (degrades to "Neutral"), append the
/// row, then mark the question answered in the session.
pub async fn handle_save_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let session = session_or_404(&state, id).await?;
    let mut session = session.lock().await;

    let question = session
        .answer_target(req.question_number, &req.answer)?
        .question
        .clone();
    let candidate = candidate_of(&session)?;

    let sentiment = state.inference.analyze_sentiment(&req.answer).await;
    store::insert_answer(
        &state.db,
        &candidate.email,
        req.question_number,
        &question,
        &req.answer,
        &sentiment,
    )
    .await?;
    session.mark_answered(req.question_number);

    info!(
        "saved answer {} for {} (sentiment: {sentiment})",
        req.question_number, candidate.email
    );
    Ok(Json(AnswerResponse {
        question_number: req.question_number,
        sentiment,
        reply: format!("Thanks {}, I've recorded your answer.", candidate.name),
    }))
}

/// POST /api/v1/sessions/:id/messages
///
/// Free-text channel for the question stage. An exit keyword ends the
/// session immediately; anything else is acknowledged without state change.
pub async fn handle_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let session = session_or_404(&state, id).await?;
    let mut session = session.lock().await;

    let ended = session.observe_message(&req.text);
    if ended {
        info!("session {id} ended early via exit keyword");
    }

    Ok(Json(MessageResponse {
        stage: session.stage(),
        ended,
        reply: ended
            .then(|| "Ending conversation as requested. Thanks for your time!".to_string()),
    }))
}

/// POST /api/v1/sessions/:id/finish
/// Ends the question stage, however many questions were answered.
pub async fn handle_finish(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FinishResponse>, AppError> {
    let session = session_or_404(&state, id).await?;
    let mut session = session.lock().await;

    session.finish()?;
    info!("session {id} finished");

    Ok(Json(FinishResponse {
        stage: session.stage(),
    }))
}

/// GET /api/v1/sessions/:id/summary
/// Closing summary for a finished session.
pub async fn handle_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SummaryResponse>, AppError> {
    let session = session_or_404(&state, id).await?;
    let session = session.lock().await;

    session.expect_stage(Stage::Done)?;
    let candidate = candidate_of(&session)?;

    Ok(Json(SummaryResponse {
        stage: session.stage(),
        thank_you: format!("Thank you, {}, for completing the screening!", candidate.name),
        answered_questions: session.answered_count(),
        candidate,
        next_steps: NEXT_STEPS,
    }))
}

/// GET /api/v1/candidates
/// Reviewer's table of all stored candidates, newest first.
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    let rows = store::list_candidates(&state.db).await?;
    Ok(Json(rows))
}

/// GET /api/v1/candidates/:email/answers
/// Persisted transcript for one candidate, in question order.
pub async fn handle_candidate_answers(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<AnswerRow>>, AppError> {
    let rows = store::list_answers(&state.db, &email).await?;
    Ok(Json(rows))
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

async fn session_or_404(state: &AppState, id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

/// A session past the collect stage always carries a profile.
fn candidate_of(session: &ScreeningSession) -> Result<Candidate, AppError> {
    session.candidate().cloned().ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("session past collect without a candidate"))
    })
}

/// Validation order: presence of all seven fields, then email shape, phone
/// shape, years format. The first failure wins; errors are not aggregated.
fn parse_intake_form(form: &IntakeForm) -> Result<Candidate, AppError> {
    let all_present = !form.full_name.is_empty()
        && !form.email.is_empty()
        && !form.phone.is_empty()
        && !form.years_experience.is_empty()
        && !form.desired_positions.is_empty()
        && !form.current_location.is_empty()
        && !form.tech_stack.is_empty();
    if !all_present {
        return Err(AppError::Validation(
            "Please fill all required fields".to_string(),
        ));
    }
    if !validate_email(&form.email) {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }
    if !validate_phone(&form.phone) {
        return Err(AppError::Validation("Invalid phone number".to_string()));
    }
    if !validate_years(&form.years_experience) {
        return Err(AppError::Validation(
            "Years of experience must be a number >= 0".to_string(),
        ));
    }

    let years = form.years_experience.trim().parse::<f64>().map_err(|_| {
        AppError::Validation("Years of experience must be a number >= 0".to_string())
    })?;

    Ok(Candidate {
        name: form.full_name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        years_experience: years,
        desired_positions: sanitize_list(&form.desired_positions),
        current_location: form.current_location.trim().to_string(),
        tech_stack: sanitize_list(&form.tech_stack),
        language: form.language,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> IntakeForm {
        IntakeForm {
            full_name: "Priya Sharma".to_string(),
            email: "priya@example.com".to_string(),
            phone: "+919876543210".to_string(),
            years_experience: "3".to_string(),
            desired_positions: "Python Developer, Data Scientist".to_string(),
            current_location: "Bengaluru, IN".to_string(),
            tech_stack: "Python, Django, SQL".to_string(),
            language: Language::English,
        }
    }

    fn validation_message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_form_parses_into_candidate() {
        let candidate = parse_intake_form(&valid_form()).expect("parse");
        assert_eq!(candidate.name, "Priya Sharma");
        assert_eq!(candidate.years_experience, 3.0);
        assert_eq!(
            candidate.desired_positions,
            vec!["Python Developer", "Data Scientist"]
        );
        assert_eq!(candidate.tech_stack, vec!["Python", "Django", "SQL"]);
    }

    #[test]
    fn test_missing_field_is_first_error() {
        let mut form = valid_form();
        form.current_location = String::new();
        form.email = "not-an-email".to_string();

        let msg = validation_message(parse_intake_form(&form).unwrap_err());
        assert_eq!(msg, "Please fill all required fields");
    }

    #[test]
    fn test_email_checked_before_phone() {
        let mut form = valid_form();
        form.email = "not-an-email".to_string();
        form.phone = "123".to_string();

        let msg = validation_message(parse_intake_form(&form).unwrap_err());
        assert_eq!(msg, "Invalid email format");
    }

    #[test]
    fn test_phone_checked_before_years() {
        let mut form = valid_form();
        form.phone = "123".to_string();
        form.years_experience = "minus two".to_string();

        let msg = validation_message(parse_intake_form(&form).unwrap_err());
        assert_eq!(msg, "Invalid phone number");
    }

    #[test]
    fn test_negative_years_rejected() {
        let mut form = valid_form();
        form.years_experience = "-1".to_string();

        let msg = validation_message(parse_intake_form(&form).unwrap_err());
        assert_eq!(msg, "Years of experience must be a number >= 0");
    }

    #[test]
    fn test_fields_are_trimmed_and_lists_split() {
        let mut form = valid_form();
        form.full_name = "  Priya Sharma  ".to_string();
        form.tech_stack = " Python ,, Django ,  ".to_string();

        let candidate = parse_intake_form(&form).expect("parse");
        assert_eq!(candidate.name, "Priya Sharma");
        assert_eq!(candidate.tech_stack, vec!["Python", "Django"]);
    }
}
