use thiserror::Error;

use crate::models::session::SessionStatus;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("item {item_number} does not exist in scale '{scale_id}'")]
    ItemNotFoundInScale { scale_id: String, item_number: u32 },

    #[error("value {value} is not a response option for item {item_number}")]
    InvalidResponseValue { item_number: u32, value: u32 },

    #[error("session cannot move from {from} to {to}")]
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },

    #[error("session is {0}, responses can only change while in_progress")]
    NotInProgress(SessionStatus),

    #[error("session {0} not found")]
    SessionNotFound(uuid::Uuid),

    #[error("session {session_id} was modified concurrently (expected version {expected}, found {found})")]
    VersionConflict {
        session_id: uuid::Uuid,
        expected: u64,
        found: u64,
    },

    #[error("invalid scale definition '{scale_id}': {reason}")]
    InvalidDefinition { scale_id: String, reason: String },
}
