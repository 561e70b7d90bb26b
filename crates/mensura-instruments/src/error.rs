use std::path::PathBuf;

use mensura_core::error::CoreError;
use thiserror::Error;

use crate::validation::ResponseValidationError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ResponseValidationError),

    #[error("failed to read scale file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed scale file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Definition(#[from] CoreError),
}
