//! Confidence rating for a scored assessment.

use mensura_core::models::result::{ConfidenceAssessment, ConfidenceLevel};
use mensura_core::models::scale::{AdministrationMode, DurationWindow, Reliability};

const RELIABILITY_EXCELLENT: f64 = 0.9;
const RELIABILITY_GOOD: f64 = 0.8;
const RELIABILITY_PENALTY: f64 = 10.0;
const SELF_ADMINISTERED_PENALTY: f64 = 5.0;
const TIMING_PENALTY: f64 = 10.0;
/// Observed time below this share of the expected minimum is unusual.
const FAST_COMPLETION_RATIO: f64 = 0.5;
/// Observed time above this multiple of the expected maximum is unusual.
const SLOW_COMPLETION_RATIO: f64 = 3.0;

const HIGH_THRESHOLD: f64 = 85.0;
const MEDIUM_THRESHOLD: f64 = 70.0;

/// Signals the confidence rating is computed from.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceInputs {
    pub completion_percentage: u8,
    pub reliability: Option<Reliability>,
    pub administration_mode: AdministrationMode,
    pub observed_duration_seconds: Option<f64>,
    pub expected_duration: Option<DurationWindow>,
}

pub fn estimate(inputs: &ConfidenceInputs) -> ConfidenceAssessment {
    let mut score = 100.0;
    let mut factors = Vec::new();
    let mut limitations = Vec::new();

    let missing = 100 - inputs.completion_percentage.min(100);
    score -= f64::from(missing);
    if missing > 0 {
        limitations.push(format!("{missing}% of items not completed"));
    } else {
        factors.push("Complete response set".to_string());
    }

    match inputs.reliability.and_then(|r| r.internal_consistency) {
        Some(alpha) if alpha >= RELIABILITY_EXCELLENT => {
            factors.push(format!("Excellent reliability (α = {alpha:.2})"));
        }
        Some(alpha) if alpha >= RELIABILITY_GOOD => {
            factors.push(format!("Good reliability (α = {alpha:.2})"));
        }
        Some(alpha) => {
            score -= RELIABILITY_PENALTY;
            limitations.push(format!("Moderate reliability (α = {alpha:.2})"));
        }
        None => {
            score -= RELIABILITY_PENALTY;
            limitations.push("Reliability not established".to_string());
        }
    }

    match inputs.administration_mode {
        AdministrationMode::ClinicianAdministered => {
            factors.push("Clinician-administered".to_string());
        }
        AdministrationMode::Supervised => {
            factors.push("Supervised administration".to_string());
        }
        AdministrationMode::SelfAdministered => {
            score -= SELF_ADMINISTERED_PENALTY;
            limitations.push("Self-administered without supervision".to_string());
        }
    }

    if let (Some(observed), Some(window)) =
        (inputs.observed_duration_seconds, inputs.expected_duration)
        && is_unusual_duration(observed, &window)
    {
        score -= TIMING_PENALTY;
        limitations.push(format!(
            "Unusual completion time ({observed:.0}s, expected {:.0}–{:.0}s)",
            window.min_seconds, window.max_seconds
        ));
    }

    ConfidenceAssessment {
        level: level_for(score),
        score,
        factors,
        limitations,
    }
}

pub fn is_unusual_duration(observed_seconds: f64, window: &DurationWindow) -> bool {
    observed_seconds < window.min_seconds * FAST_COMPLETION_RATIO
        || observed_seconds > window.max_seconds * SLOW_COMPLETION_RATIO
}

pub fn level_for(score: f64) -> ConfidenceLevel {
    if score >= HIGH_THRESHOLD {
        ConfidenceLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}
