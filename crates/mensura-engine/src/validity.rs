//! Heuristic data-quality checks over a scored response set.
//!
//! Each check is independent and returns at most one indicator per
//! concern. Indicators are advisory: they lower confidence in the result
//! but never stop a report from being assembled.

use mensura_core::models::result::{
    IndicatorSeverity, ScoringResult, ValidityIndicator, ValidityKind,
};
use mensura_core::models::scale::ScaleDefinition;
use mensura_core::models::session::ResponseSet;

use crate::config::ValidityThresholds;

const CONSISTENCY_PENALTY: f64 = 15.0;
const FAST_TIMING_PENALTY: f64 = 10.0;
const SLOW_TIMING_PENALTY: f64 = 5.0;
const NORM_EXTREMITY_PENALTY: f64 = 5.0;

pub struct ValidityAnalyzer<'a> {
    thresholds: &'a ValidityThresholds,
}

impl<'a> ValidityAnalyzer<'a> {
    pub fn new(thresholds: &'a ValidityThresholds) -> Self {
        Self { thresholds }
    }

    /// Run every check and return the indicators ordered high → low.
    pub fn analyze(
        &self,
        scale: &ScaleDefinition,
        responses: &ResponseSet,
        scoring: &ScoringResult,
    ) -> Vec<ValidityIndicator> {
        let mut indicators: Vec<ValidityIndicator> = Vec::new();
        indicators.extend(check_completion(scoring, self.thresholds));
        indicators.extend(check_consistency(scoring, self.thresholds));
        indicators.extend(check_timing(responses, self.thresholds));
        indicators.extend(check_norm_extremity(scoring, self.thresholds));

        // Stable: checks of equal severity keep their run order.
        indicators.sort_by(|a, b| b.severity.cmp(&a.severity));

        if !indicators.is_empty() {
            tracing::debug!(
                scale_id = %scale.id,
                count = indicators.len(),
                "validity indicators raised"
            );
        }
        indicators
    }
}

pub fn check_completion(
    scoring: &ScoringResult,
    thresholds: &ValidityThresholds,
) -> Option<ValidityIndicator> {
    if scoring.total_items == 0 || scoring.answered_items >= scoring.total_items {
        return None;
    }
    let missing = scoring.total_items - scoring.answered_items;
    let missing_fraction = missing as f64 / scoring.total_items as f64;
    let severity = if missing_fraction > thresholds.completion_high_fraction {
        IndicatorSeverity::High
    } else {
        IndicatorSeverity::Medium
    };

    Some(ValidityIndicator {
        kind: ValidityKind::Completion,
        severity,
        penalty: f64::from(100 - scoring.completion_percentage),
        message: format!(
            "{missing} of {} items were not answered ({}% complete)",
            scoring.total_items, scoring.completion_percentage
        ),
        suggested_action: "Review the unanswered items with the patient or readminister the scale"
            .to_string(),
    })
}

/// Normalized consistency of a set of item scores:
/// `max(0, 1 − variance / range)`, or 1 when every score is identical.
pub fn consistency(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 1.0;
    }
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let range = max - min;
    if range > 0.0 {
        (1.0 - variance / range).max(0.0)
    } else {
        1.0
    }
}

pub fn check_consistency(
    scoring: &ScoringResult,
    thresholds: &ValidityThresholds,
) -> Option<ValidityIndicator> {
    if scoring.item_scores.len() < thresholds.consistency_min_responses {
        return None;
    }
    let scores: Vec<f64> = scoring.item_scores.values().copied().collect();
    let value = consistency(&scores);
    if value >= thresholds.min_consistency {
        return None;
    }

    Some(ValidityIndicator {
        kind: ValidityKind::Consistency,
        severity: IndicatorSeverity::Medium,
        penalty: CONSISTENCY_PENALTY,
        message: format!(
            "Response consistency {value:.2} is below {:.2}; responses may be random or inattentive",
            thresholds.min_consistency
        ),
        suggested_action: "Discuss the responses with the patient to confirm they reflect their experience"
            .to_string(),
    })
}

pub fn check_timing(
    responses: &ResponseSet,
    thresholds: &ValidityThresholds,
) -> Vec<ValidityIndicator> {
    let durations: Vec<f64> = responses
        .values()
        .filter_map(|r| r.duration_seconds)
        .collect();
    if durations.len() < thresholds.timing_min_responses {
        return Vec::new();
    }

    let n = durations.len() as f64;
    let fast = durations
        .iter()
        .filter(|d| **d < thresholds.fast_response_seconds)
        .count();
    let slow = durations
        .iter()
        .filter(|d| **d > thresholds.slow_response_seconds)
        .count();

    let mut indicators = Vec::new();
    if fast as f64 / n > thresholds.fast_response_fraction {
        indicators.push(ValidityIndicator {
            kind: ValidityKind::Timing,
            severity: IndicatorSeverity::Medium,
            penalty: FAST_TIMING_PENALTY,
            message: format!(
                "{fast} of {} responses took under {}s, too fast to reflect reading the item",
                durations.len(),
                thresholds.fast_response_seconds
            ),
            suggested_action: "Confirm the patient read each item before relying on the score"
                .to_string(),
        });
    }
    if slow as f64 / n > thresholds.slow_response_fraction {
        indicators.push(ValidityIndicator {
            kind: ValidityKind::Timing,
            severity: IndicatorSeverity::Low,
            penalty: SLOW_TIMING_PENALTY,
            message: format!(
                "{slow} of {} responses took over {}s, suggesting distraction or difficulty",
                durations.len(),
                thresholds.slow_response_seconds
            ),
            suggested_action: "Ask whether any items were hard to understand".to_string(),
        });
    }
    indicators
}

pub fn check_norm_extremity(
    scoring: &ScoringResult,
    thresholds: &ValidityThresholds,
) -> Option<ValidityIndicator> {
    let percentile = scoring.norms?.percentile;
    if (thresholds.percentile_low..=thresholds.percentile_high).contains(&percentile) {
        return None;
    }

    Some(ValidityIndicator {
        kind: ValidityKind::NormExtremity,
        severity: IndicatorSeverity::Medium,
        penalty: NORM_EXTREMITY_PENALTY,
        message: format!(
            "Score falls at the {percentile:.1} percentile, outside the {}–{} band of the reference population",
            thresholds.percentile_low, thresholds.percentile_high
        ),
        suggested_action: "Verify the result against the clinical presentation".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_scores_are_fully_consistent() {
        assert_eq!(consistency(&[2.0, 2.0, 2.0, 2.0]), 1.0);
    }

    #[test]
    fn alternating_extremes_are_inconsistent() {
        // variance 2.25, range 3
        let value = consistency(&[0.0, 3.0, 0.0, 3.0]);
        assert!((value - 0.25).abs() < 1e-12);
    }

    #[test]
    fn consistency_never_negative() {
        assert_eq!(consistency(&[0.0, 10.0]), 0.0);
    }
}
