use std::path::PathBuf;

use mensura_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("scale not found: {0}")]
    ScaleNotFound(String),

    #[error("session is for scale '{session_scale}' but was evaluated against '{scale}'")]
    ScaleMismatch {
        session_scale: String,
        scale: String,
    },

    #[error("assessment is {completion}% complete, at least {minimum}% is required")]
    IncompleteAssessment { completion: u8, minimum: u8 },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
