use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::scale::{InterpretationRule, Severity};

/// Norm-referenced transformations of a raw total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NormScores {
    pub z_score: f64,
    /// Mean 50, SD 10.
    pub t_score: f64,
    /// Percentile rank (0–100).
    pub percentile: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringResult {
    pub total_score: f64,
    pub subscale_scores: BTreeMap<String, f64>,
    /// Whole-number percentage of items answered (0–100).
    pub completion_percentage: u8,
    pub answered_items: usize,
    pub total_items: usize,
    /// Item scores after option mapping and reverse scoring.
    pub item_scores: BTreeMap<u32, f64>,
    pub norms: Option<NormScores>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ClinicalSignificance {
    Clinical,
    Subclinical,
    NonClinical,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InterpretationOutcome {
    /// The matched rule; `None` means the score was indeterminate.
    pub rule: Option<InterpretationRule>,
    pub severity: Severity,
    pub label: String,
    pub clinical_significance: ClinicalSignificance,
    pub recommendations: Vec<String>,
    pub follow_up_required: bool,
}

impl InterpretationOutcome {
    pub fn is_indeterminate(&self) -> bool {
        self.rule.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubscaleInterpretation {
    pub subscale_id: String,
    pub name: String,
    pub score: f64,
    pub outcome: InterpretationOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValidityKind {
    Completion,
    Consistency,
    Timing,
    NormExtremity,
}

/// Ordered low < medium < high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum IndicatorSeverity {
    Low,
    Medium,
    High,
}

/// A heuristic flag suggesting the result may be unreliable. Advisory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidityIndicator {
    pub kind: ValidityKind,
    pub severity: IndicatorSeverity,
    /// Confidence penalty in points.
    pub penalty: f64,
    pub message: String,
    pub suggested_action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConfidenceAssessment {
    pub level: ConfidenceLevel,
    /// Points remaining from the starting 100.
    pub score: f64,
    pub factors: Vec<String>,
    pub limitations: Vec<String>,
}
