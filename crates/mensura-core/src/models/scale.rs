use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Inclusive bounds of a total or subscale score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

/// How item scores are aggregated into the total and subscale scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScoringMethod {
    #[default]
    Sum,
    Average,
    /// Sum of item scores multiplied by each item's weight.
    Weighted,
}

/// Who completed the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AdministrationMode {
    SelfAdministered,
    Supervised,
    ClinicianAdministered,
}

impl std::fmt::Display for AdministrationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SelfAdministered => "self-administered",
            Self::Supervised => "supervised",
            Self::ClinicianAdministered => "clinician-administered",
        };
        f.write_str(s)
    }
}

/// Clinical severity band. Ordered from least to most severe;
/// `Indeterminate` sorts first because it carries no severity claim.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Indeterminate,
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
    VerySevere,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Indeterminate => "indeterminate",
            Self::Minimal => "minimal",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::ModeratelySevere => "moderately_severe",
            Self::Severe => "severe",
            Self::VerySevere => "very_severe",
        }
    }

    /// Severe and very severe results warrant escalation.
    pub fn is_severe(self) -> bool {
        matches!(self, Self::Severe | Self::VerySevere)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable answer for an item and the score it maps to.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResponseOption {
    pub value: u32,
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    pub number: u32,
    pub text: String,
    #[serde(default)]
    pub reverse_scored: bool,
    #[serde(default)]
    pub subscale_id: Option<String>,
    pub options: Vec<ResponseOption>,
    /// Multiplier used by [`ScoringMethod::Weighted`]. Defaults to 1.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Any endorsement above the lowest option needs clinician review
    /// (e.g. self-harm items).
    #[serde(default)]
    pub critical: bool,
}

impl Item {
    pub fn option(&self, value: u32) -> Option<&ResponseOption> {
        self.options.iter().find(|o| o.value == value)
    }

    pub fn min_option_score(&self) -> f64 {
        self.options
            .iter()
            .map(|o| o.score)
            .fold(f64::INFINITY, f64::min)
    }

    pub fn max_option_score(&self) -> f64 {
        self.options
            .iter()
            .map(|o| o.score)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn weight(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }
}

/// A score range mapped to a severity and its recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InterpretationRule {
    pub min_score: f64,
    pub max_score: f64,
    pub severity: Severity,
    pub label: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl InterpretationRule {
    /// Both bounds inclusive.
    pub fn matches(&self, score: f64) -> bool {
        self.min_score <= score && score <= self.max_score
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Subscale {
    pub id: String,
    pub name: String,
    /// Member item numbers. Items may also opt in through `Item::subscale_id`.
    #[serde(default)]
    pub items: Vec<u32>,
    pub range: ScoreRange,
    #[serde(default)]
    pub interpretation_rules: Vec<InterpretationRule>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Reliability {
    /// Internal consistency (Cronbach's alpha).
    pub internal_consistency: Option<f64>,
    pub test_retest: Option<f64>,
}

/// Expected completion time in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DurationWindow {
    pub min_seconds: f64,
    pub max_seconds: f64,
}

/// Thresholds separating clinical, subclinical and non-clinical scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClinicalCutoffs {
    pub clinical: f64,
    pub subclinical: f64,
}

/// Reference population used for norm-referenced scores.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PopulationNorms {
    pub mean: f64,
    pub standard_deviation: f64,
    #[serde(default)]
    pub population: Option<String>,
}

/// A standardized instrument: items, subscales, scoring and interpretation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScaleDefinition {
    pub id: String,
    pub name: String,
    pub items: Vec<Item>,
    #[serde(default)]
    pub subscales: Vec<Subscale>,
    #[serde(default)]
    pub interpretation_rules: Vec<InterpretationRule>,
    pub score_range: ScoreRange,
    #[serde(default)]
    pub scoring_method: ScoringMethod,
    #[serde(default)]
    pub reliability: Option<Reliability>,
    pub administration_mode: AdministrationMode,
    #[serde(default)]
    pub expected_duration: Option<DurationWindow>,
    #[serde(default)]
    pub cutoffs: Option<ClinicalCutoffs>,
    #[serde(default)]
    pub norms: Option<PopulationNorms>,
    #[serde(default)]
    pub clinical_notes: Vec<String>,
}

impl ScaleDefinition {
    pub fn item(&self, number: u32) -> Option<&Item> {
        self.items.iter().find(|i| i.number == number)
    }

    pub fn subscale(&self, id: &str) -> Option<&Subscale> {
        self.subscales.iter().find(|s| s.id == id)
    }

    /// Whether `item` counts toward `subscale`, either through the
    /// subscale's member list or the item's own `subscale_id`.
    pub fn is_member(&self, subscale: &Subscale, item: &Item) -> bool {
        item.subscale_id.as_deref() == Some(subscale.id.as_str())
            || subscale.items.contains(&item.number)
    }

    /// Resolve a raw answer to the item's option score, checking that both
    /// the item and the option exist.
    pub fn option_score(&self, item_number: u32, value: u32) -> Result<f64, CoreError> {
        let item = self
            .item(item_number)
            .ok_or_else(|| CoreError::ItemNotFoundInScale {
                scale_id: self.id.clone(),
                item_number,
            })?;
        item.option(value)
            .map(|o| o.score)
            .ok_or(CoreError::InvalidResponseValue { item_number, value })
    }

    /// Check the structural invariants of the definition.
    pub fn validate(&self) -> Result<(), CoreError> {
        let invalid = |reason: String| CoreError::InvalidDefinition {
            scale_id: self.id.clone(),
            reason,
        };

        if self.items.is_empty() {
            return Err(invalid("scale has no items".to_string()));
        }
        if self.score_range.is_inverted() {
            return Err(invalid(format!(
                "score range [{}, {}] is inverted",
                self.score_range.min, self.score_range.max
            )));
        }

        let mut numbers = HashSet::new();
        for item in &self.items {
            if !numbers.insert(item.number) {
                return Err(invalid(format!("duplicate item number {}", item.number)));
            }
            if item.options.is_empty() {
                return Err(invalid(format!("item {} has no response options", item.number)));
            }
            let mut values = HashSet::new();
            if let Some(dup) = item.options.iter().find(|o| !values.insert(o.value)) {
                return Err(invalid(format!(
                    "item {} repeats option value {}",
                    item.number, dup.value
                )));
            }
            if let Some(id) = &item.subscale_id
                && self.subscale(id).is_none()
            {
                return Err(invalid(format!(
                    "item {} references unknown subscale '{id}'",
                    item.number
                )));
            }
        }

        let mut subscale_ids = HashSet::new();
        for subscale in &self.subscales {
            if !subscale_ids.insert(subscale.id.as_str()) {
                return Err(invalid(format!("duplicate subscale id '{}'", subscale.id)));
            }
            if let Some(missing) = subscale.items.iter().find(|n| !numbers.contains(*n)) {
                return Err(invalid(format!(
                    "subscale '{}' lists item {missing} which is not in the scale",
                    subscale.id
                )));
            }
        }

        check_rules(&self.interpretation_rules, &self.score_range, "scale").map_err(&invalid)?;
        for subscale in &self.subscales {
            if subscale.range.is_inverted() {
                return Err(invalid(format!(
                    "subscale '{}' range [{}, {}] is inverted",
                    subscale.id, subscale.range.min, subscale.range.max
                )));
            }
            let owner = format!("subscale '{}'", subscale.id);
            check_rules(&subscale.interpretation_rules, &subscale.range, &owner)
                .map_err(&invalid)?;
        }

        Ok(())
    }
}

/// Rules must be well-formed and lie inside the range of the score they
/// interpret.
fn check_rules(
    rules: &[InterpretationRule],
    range: &ScoreRange,
    owner: &str,
) -> Result<(), String> {
    for rule in rules {
        if rule.min_score > rule.max_score {
            return Err(format!(
                "interpretation rule '{}' has min {} above max {}",
                rule.label, rule.min_score, rule.max_score
            ));
        }
        if !range.contains(rule.min_score) || !range.contains(rule.max_score) {
            return Err(format!(
                "interpretation rule '{}' [{}, {}] falls outside the {owner} range [{}, {}]",
                rule.label, rule.min_score, rule.max_score, range.min, range.max
            ));
        }
    }
    Ok(())
}
