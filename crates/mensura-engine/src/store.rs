use std::collections::HashMap;
use std::sync::Mutex;

use mensura_core::error::CoreError;
use mensura_core::models::session::AssessmentSession;
use mensura_core::repository::SessionStore;
use uuid::Uuid;

/// Process-local [`SessionStore`]. The version check and the write happen
/// under one lock, so concurrent completions of a session cannot both win.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<Uuid, AssessmentSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new session, replacing nothing.
    pub fn insert(&self, session: AssessmentSession) {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.entry(session.id).or_insert(session);
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, session_id: Uuid) -> Result<AssessmentSession, CoreError> {
        let sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions
            .get(&session_id)
            .cloned()
            .ok_or(CoreError::SessionNotFound(session_id))
    }

    fn save(&self, session: &AssessmentSession, expected_version: u64) -> Result<(), CoreError> {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        let stored = sessions
            .get_mut(&session.id)
            .ok_or(CoreError::SessionNotFound(session.id))?;
        if stored.version != expected_version {
            return Err(CoreError::VersionConflict {
                session_id: session.id,
                expected: expected_version,
                found: stored.version,
            });
        }
        *stored = session.clone();
        Ok(())
    }
}
