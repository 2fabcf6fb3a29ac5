pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::meta_handler))
        .route("/health", get(health::health_handler))
        // Screening flow
        .route("/api/v1/sessions", post(handlers::handle_open_session))
        .route(
            "/api/v1/sessions/:id/profile",
            post(handlers::handle_submit_profile),
        )
        .route(
            "/api/v1/sessions/:id/questions",
            get(handlers::handle_get_questions),
        )
        .route(
            "/api/v1/sessions/:id/answers",
            post(handlers::handle_save_answer),
        )
        .route(
            "/api/v1/sessions/:id/messages",
            post(handlers::handle_message),
        )
        .route(
            "/api/v1/sessions/:id/finish",
            post(handlers::handle_finish),
        )
        .route(
            "/api/v1/sessions/:id/summary",
            get(handlers::handle_summary),
        )
        // Reviewer API
        .route("/api/v1/candidates", get(handlers::handle_list_candidates))
        .route(
            "/api/v1/candidates/:email/answers",
            get(handlers::handle_candidate_answers),
        )
        .with_state(state)
}
