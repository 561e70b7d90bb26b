//! Collaborator contracts. Storage lives outside the engine; these traits
//! are the only shape it relies on.

use uuid::Uuid;

use crate::error::CoreError;
use crate::models::scale::ScaleDefinition;
use crate::models::session::AssessmentSession;

/// Source of scale definitions.
pub trait ScaleRepository: Send + Sync {
    fn find_scale(&self, scale_id: &str) -> Option<ScaleDefinition>;
}

/// Persistence for assessment sessions.
///
/// `save` is a check-then-update: it must fail with
/// [`CoreError::VersionConflict`] unless the stored session is still at
/// `expected_version`, so at most one completion can win per session.
pub trait SessionStore: Send + Sync {
    fn load(&self, session_id: Uuid) -> Result<AssessmentSession, CoreError>;

    fn save(&self, session: &AssessmentSession, expected_version: u64) -> Result<(), CoreError>;
}
