//! In-memory session registry.
//!
//! Each session sits behind its own async mutex: requests for one applicant
//! serialize (store and inference awaits happen under the session lock)
//! while distinct sessions proceed independently. The outer map lock is
//! held only for lookup and insert.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::flow::ScreeningSession;

pub type SharedSession = Arc<Mutex<ScreeningSession>>;

#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a fresh session in the collect stage and returns its id.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(ScreeningSession::new())));
        id
    }

    /// Fetches the shared handle for a session, if it exists.
    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::flow::Stage;

    #[tokio::test]
    async fn test_created_session_is_retrievable() {
        let store = SessionStore::new();
        let id = store.create().await;

        let session = store.get(id).await.expect("session exists");
        assert_eq!(session.lock().await.stage(), Stage::Collect);
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let store = SessionStore::new();
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_state() {
        let store = SessionStore::new();
        let first = store.create().await;
        let second = store.create().await;
        assert_ne!(first, second);

        let handle = store.get(first).await.expect("first session");
        handle.lock().await.install_questions(vec![]);

        // Mutating one session leaves the other untouched.
        let other = store.get(second).await.expect("second session");
        assert!(!other.lock().await.has_questions());
    }
}
