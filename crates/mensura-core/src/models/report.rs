use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::result::{
    ConfidenceAssessment, InterpretationOutcome, ScoringResult, SubscaleInterpretation,
    ValidityIndicator,
};

/// A critical item (e.g. self-harm) answered above its lowest option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CriticalItemAlert {
    pub item_number: u32,
    pub item_text: String,
    pub raw_value: u32,
    pub score: f64,
}

/// The scored, interpreted, validity-annotated and confidence-rated result
/// of one completed session. Never mutated once built; re-scoring a
/// session produces a new report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentReport {
    pub session_id: Uuid,
    pub scale_id: String,
    pub scale_name: String,
    pub patient_id: Uuid,
    pub scoring: ScoringResult,
    pub interpretation: InterpretationOutcome,
    pub subscale_interpretations: Vec<SubscaleInterpretation>,
    pub validity_indicators: Vec<ValidityIndicator>,
    pub confidence: ConfidenceAssessment,
    pub critical_items: Vec<CriticalItemAlert>,
    /// Overall recommendations: interpretation recommendations plus any
    /// raised by critical items, de-duplicated.
    pub recommendations: Vec<String>,
    pub clinical_notes: Vec<String>,
    pub calculated_at: jiff::Timestamp,
}

impl AssessmentReport {
    /// Whether the result should be escalated to the care team.
    pub fn needs_escalation(&self) -> bool {
        self.interpretation.severity.is_severe() || !self.critical_items.is_empty()
    }
}
