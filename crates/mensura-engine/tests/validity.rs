mod common;

use common::{SCENARIO_A, entry, full, nine_item_scale, session};
use mensura_core::models::result::{IndicatorSeverity, NormScores, ValidityKind};
use mensura_core::models::session::ResponseSet;
use mensura_engine::config::{MissingItemPolicy, ValidityThresholds};
use mensura_engine::scoring::score;
use mensura_engine::validity::{
    ValidityAnalyzer, check_completion, check_norm_extremity, check_timing,
};

fn timed(durations: &[f64]) -> ResponseSet {
    (1u32..)
        .zip(durations)
        .map(|(n, d)| (n, entry(n, 1, Some(*d))))
        .collect()
}

#[test]
fn complete_plausible_responses_raise_nothing() {
    let scale = nine_item_scale();
    let session = session(&scale, &full(&SCENARIO_A));
    let scoring = score(&scale, &session.responses, MissingItemPolicy::Exclude).unwrap();

    let thresholds = ValidityThresholds::default();
    let indicators = ValidityAnalyzer::new(&thresholds).analyze(&scale, &session.responses, &scoring);
    assert!(indicators.is_empty(), "{indicators:?}");
}

#[test]
fn one_missing_item_is_medium() {
    let scale = nine_item_scale();
    let mut answers = full(&SCENARIO_A);
    answers[8] = None;
    let session = session(&scale, &answers);
    let scoring = score(&scale, &session.responses, MissingItemPolicy::Exclude).unwrap();

    let indicator = check_completion(&scoring, &ValidityThresholds::default()).unwrap();
    assert_eq!(indicator.kind, ValidityKind::Completion);
    assert_eq!(indicator.severity, IndicatorSeverity::Medium);
    assert_eq!(indicator.penalty, 11.0);
}

#[test]
fn many_missing_items_are_high() {
    let scale = nine_item_scale();
    let session = session(&scale, &[Some(1), Some(1), Some(1), Some(1), Some(1), Some(1)]);
    let scoring = score(&scale, &session.responses, MissingItemPolicy::Exclude).unwrap();

    let indicator = check_completion(&scoring, &ValidityThresholds::default()).unwrap();
    assert_eq!(indicator.severity, IndicatorSeverity::High);
    assert_eq!(indicator.penalty, 33.0);
}

#[test]
fn alternating_extremes_are_flagged_inconsistent() {
    let scale = nine_item_scale();
    let session = session(&scale, &full(&[0, 3, 0, 3, 0, 3, 0, 3, 0]));
    let scoring = score(&scale, &session.responses, MissingItemPolicy::Exclude).unwrap();

    let thresholds = ValidityThresholds::default();
    let indicators = ValidityAnalyzer::new(&thresholds).analyze(&scale, &session.responses, &scoring);
    assert_eq!(indicators.len(), 1);
    assert_eq!(indicators[0].kind, ValidityKind::Consistency);
    assert_eq!(indicators[0].severity, IndicatorSeverity::Medium);
}

#[test]
fn consistency_needs_three_responses() {
    let scale = nine_item_scale();
    let session = session(&scale, &[Some(0), Some(3)]);
    let scoring = score(&scale, &session.responses, MissingItemPolicy::Exclude).unwrap();

    let thresholds = ValidityThresholds::default();
    let indicators = ValidityAnalyzer::new(&thresholds).analyze(&scale, &session.responses, &scoring);
    assert!(indicators.iter().all(|i| i.kind != ValidityKind::Consistency));
}

#[test]
fn rushed_responses_are_medium_timing() {
    let responses = timed(&[1.0, 1.5, 0.8, 10.0, 12.0]);
    let indicators = check_timing(&responses, &ValidityThresholds::default());
    assert_eq!(indicators.len(), 1);
    assert_eq!(indicators[0].kind, ValidityKind::Timing);
    assert_eq!(indicators[0].severity, IndicatorSeverity::Medium);
}

#[test]
fn slow_responses_are_low_timing() {
    let responses = timed(&[90.0, 120.0, 10.0, 10.0, 10.0]);
    let indicators = check_timing(&responses, &ValidityThresholds::default());
    assert_eq!(indicators.len(), 1);
    assert_eq!(indicators[0].severity, IndicatorSeverity::Low);
}

#[test]
fn timing_needs_five_durations() {
    let responses = timed(&[0.5, 0.5, 0.5, 0.5]);
    assert!(check_timing(&responses, &ValidityThresholds::default()).is_empty());
}

#[test]
fn extreme_percentile_is_flagged() {
    let scale = nine_item_scale();
    let session = session(&scale, &full(&SCENARIO_A));
    let mut scoring = score(&scale, &session.responses, MissingItemPolicy::Exclude).unwrap();
    let thresholds = ValidityThresholds::default();

    scoring.norms = Some(NormScores {
        z_score: 2.0,
        t_score: 70.0,
        percentile: 97.7,
    });
    let indicator = check_norm_extremity(&scoring, &thresholds).unwrap();
    assert_eq!(indicator.kind, ValidityKind::NormExtremity);
    assert_eq!(indicator.severity, IndicatorSeverity::Medium);

    scoring.norms = Some(NormScores {
        z_score: 0.0,
        t_score: 50.0,
        percentile: 50.0,
    });
    assert!(check_norm_extremity(&scoring, &thresholds).is_none());
}

#[test]
fn indicators_are_ordered_by_severity() {
    let scale = nine_item_scale();
    let mut session = session(&scale, &[Some(0), Some(3), Some(0), Some(3), Some(0), Some(3)]);
    for (n, value) in [(1, 0), (2, 3), (3, 0), (4, 3), (5, 0), (6, 3)] {
        session.responses.insert(n, entry(n, value, Some(120.0)));
    }
    let scoring = score(&scale, &session.responses, MissingItemPolicy::Exclude).unwrap();

    let thresholds = ValidityThresholds::default();
    let indicators = ValidityAnalyzer::new(&thresholds).analyze(&scale, &session.responses, &scoring);
    let severities: Vec<_> = indicators.iter().map(|i| i.severity).collect();
    assert_eq!(
        severities,
        vec![
            IndicatorSeverity::High,
            IndicatorSeverity::Medium,
            IndicatorSeverity::Low
        ]
    );
}
