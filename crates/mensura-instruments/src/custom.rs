//! Scale definitions supplied as JSON files rather than built in.

use std::path::Path;

use mensura_core::models::scale::ScaleDefinition;

use crate::error::InstrumentError;

/// Parse and validate a scale definition.
pub fn parse_scale(contents: &str) -> Result<ScaleDefinition, InstrumentError> {
    let scale: ScaleDefinition = serde_json::from_str(contents)?;
    scale.validate()?;
    Ok(scale)
}

pub fn load_scale_file(path: &Path) -> Result<ScaleDefinition, InstrumentError> {
    let contents = std::fs::read_to_string(path).map_err(|source| InstrumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let scale = parse_scale(&contents)?;
    tracing::debug!(path = %path.display(), scale_id = %scale.id, "scale definition loaded");
    Ok(scale)
}
