#![allow(dead_code)]

use mensura_core::models::scale::{
    AdministrationMode, DurationWindow, InterpretationRule, Item, Reliability, ResponseOption,
    ScaleDefinition, ScoreRange, ScoringMethod, Severity,
};
use mensura_core::models::session::{AssessmentSession, ResponseEntry};
use uuid::Uuid;

pub const SCENARIO_A: [u32; 9] = [2, 2, 1, 2, 1, 1, 0, 1, 0];

pub fn now() -> jiff::Timestamp {
    jiff::Timestamp::from_second(1_767_000_000).unwrap()
}

pub fn item(number: u32) -> Item {
    Item {
        number,
        text: format!("Item {number}"),
        reverse_scored: false,
        subscale_id: None,
        options: (0..=3)
            .map(|v| ResponseOption {
                value: v,
                label: format!("option {v}"),
                score: f64::from(v),
            })
            .collect(),
        weight: None,
        critical: false,
    }
}

pub fn rule(min: f64, max: f64, severity: Severity, label: &str) -> InterpretationRule {
    InterpretationRule {
        min_score: min,
        max_score: max,
        severity,
        label: label.to_string(),
        recommendations: vec![],
    }
}

pub fn scenario_rules() -> Vec<InterpretationRule> {
    vec![
        rule(0.0, 4.0, Severity::Minimal, "minimal"),
        rule(5.0, 9.0, Severity::Mild, "mild"),
        rule(10.0, 14.0, Severity::Moderate, "moderate"),
        rule(15.0, 27.0, Severity::Severe, "severe"),
    ]
}

/// Nine items scored 0–3, high reliability, clinician administered.
pub fn nine_item_scale() -> ScaleDefinition {
    ScaleDefinition {
        id: "test9".to_string(),
        name: "Test-9".to_string(),
        items: (1..=9).map(item).collect(),
        subscales: vec![],
        interpretation_rules: scenario_rules(),
        score_range: ScoreRange::new(0.0, 27.0),
        scoring_method: ScoringMethod::Sum,
        reliability: Some(Reliability {
            internal_consistency: Some(0.92),
            test_retest: None,
        }),
        administration_mode: AdministrationMode::ClinicianAdministered,
        expected_duration: Some(DurationWindow {
            min_seconds: 60.0,
            max_seconds: 600.0,
        }),
        cutoffs: None,
        norms: None,
        clinical_notes: vec![],
    }
}

pub fn entry(item_number: u32, raw_value: u32, duration: Option<f64>) -> ResponseEntry {
    ResponseEntry {
        item_number,
        raw_value,
        duration_seconds: duration,
        recorded_at: now(),
    }
}

/// An in-progress session answering item `i + 1` with `answers[i]`
/// (`None` leaves the item unanswered). Every answer takes 10 seconds.
pub fn session(scale: &ScaleDefinition, answers: &[Option<u32>]) -> AssessmentSession {
    let mut session = AssessmentSession::new(
        scale.id.clone(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        AdministrationMode::ClinicianAdministered,
        now(),
    );
    session.start(now()).unwrap();
    for (number, answer) in (1u32..).zip(answers) {
        if let Some(value) = answer {
            session
                .record_response(scale, entry(number, *value, Some(10.0)))
                .unwrap();
        }
    }
    session
}

pub fn full(answers: &[u32]) -> Vec<Option<u32>> {
    answers.iter().copied().map(Some).collect()
}
