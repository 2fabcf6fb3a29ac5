use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::inference::InferenceClient;
use crate::screening::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub inference: InferenceClient,
    /// Live screening sessions, in-memory only. Restarting the service
    /// drops them; stored candidates and answers survive in SQLite.
    pub sessions: Arc<SessionStore>,
    pub config: Config,
}
