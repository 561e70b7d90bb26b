use mensura_core::models::scale::ScaleDefinition;
use mensura_core::models::session::ResponseSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ResponseValidationError {
    pub item_number: u32,
    pub value: u32,
    /// Values the item accepts; empty when the item does not exist.
    pub expected_values: Vec<u32>,
    pub message: String,
}

/// Collect every invalid response rather than stopping at the first.
pub fn validate_responses(
    scale: &ScaleDefinition,
    responses: &ResponseSet,
) -> Vec<ResponseValidationError> {
    let mut errors = Vec::new();
    for entry in responses.values() {
        match scale.item(entry.item_number) {
            None => errors.push(ResponseValidationError {
                item_number: entry.item_number,
                value: entry.raw_value,
                expected_values: Vec::new(),
                message: format!(
                    "{}: item {} does not exist",
                    scale.name, entry.item_number
                ),
            }),
            Some(item) if item.option(entry.raw_value).is_none() => {
                let expected_values: Vec<u32> = item.options.iter().map(|o| o.value).collect();
                errors.push(ResponseValidationError {
                    item_number: entry.item_number,
                    value: entry.raw_value,
                    message: format!(
                        "{}: item {} value {} is not one of {:?}",
                        scale.name, entry.item_number, entry.raw_value, expected_values
                    ),
                    expected_values,
                });
            }
            Some(_) => {}
        }
    }
    errors
}
