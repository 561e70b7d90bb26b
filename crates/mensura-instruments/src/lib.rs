//! mensura-instruments
//!
//! Built-in clinical instrument definitions. Pure data: each instrument
//! supplies a [`ScaleDefinition`] with its items, scoring and
//! interpretation rules.

pub mod custom;
pub mod error;
pub mod instruments;
pub mod validation;

use mensura_core::models::scale::ScaleDefinition;
use mensura_core::models::session::ResponseSet;
use mensura_core::repository::ScaleRepository;

use error::InstrumentError;
use validation::ResponseValidationError;

/// Trait implemented by each clinical assessment instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "phq9", "gad7").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "PHQ-9").
    fn name(&self) -> &str;

    /// Full scale definition used for scoring.
    fn definition(&self) -> &ScaleDefinition;

    /// Check every response against this instrument's items and options.
    fn validate_responses(&self, responses: &ResponseSet) -> Vec<ResponseValidationError> {
        validation::validate_responses(self.definition(), responses)
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::gad7::Gad7),
        Box::new(instruments::pss10::Pss10),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}

/// Look up an instrument by ID, failing with `UnknownInstrument`.
pub fn require_instrument(id: &str) -> Result<Box<dyn Instrument>, InstrumentError> {
    get_instrument(id).ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))
}

/// [`ScaleRepository`] over the built-in instruments.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl ScaleRepository for BuiltinCatalog {
    fn find_scale(&self, scale_id: &str) -> Option<ScaleDefinition> {
        get_instrument(scale_id).map(|i| i.definition().clone())
    }
}
