use mensura_core::models::result::ConfidenceLevel;
use mensura_core::models::scale::{AdministrationMode, DurationWindow, Reliability};
use mensura_engine::confidence::{ConfidenceInputs, estimate, is_unusual_duration, level_for};

fn inputs() -> ConfidenceInputs {
    ConfidenceInputs {
        completion_percentage: 100,
        reliability: Some(Reliability {
            internal_consistency: Some(0.92),
            test_retest: None,
        }),
        administration_mode: AdministrationMode::ClinicianAdministered,
        observed_duration_seconds: Some(300.0),
        expected_duration: Some(DurationWindow {
            min_seconds: 120.0,
            max_seconds: 600.0,
        }),
    }
}

#[test]
fn ideal_conditions_are_high() {
    let c = estimate(&inputs());
    assert_eq!(c.score, 100.0);
    assert_eq!(c.level, ConfidenceLevel::High);
    assert!(c.limitations.is_empty());
    assert!(c.factors.iter().any(|f| f == "Complete response set"));
    assert!(c.factors.iter().any(|f| f.starts_with("Excellent reliability")));
}

#[test]
fn incompleteness_costs_its_percentage() {
    let c = estimate(&ConfidenceInputs {
        completion_percentage: 67,
        ..inputs()
    });
    assert_eq!(c.score, 67.0);
    assert_eq!(c.level, ConfidenceLevel::Low);
    assert!(c.limitations.contains(&"33% of items not completed".to_string()));
}

#[test]
fn reliability_bands() {
    let with_alpha = |alpha: Option<f64>| {
        estimate(&ConfidenceInputs {
            reliability: Some(Reliability {
                internal_consistency: alpha,
                test_retest: None,
            }),
            ..inputs()
        })
    };

    let good = with_alpha(Some(0.85));
    assert_eq!(good.score, 100.0);
    assert!(good.factors.iter().any(|f| f.starts_with("Good reliability")));

    let moderate = with_alpha(Some(0.7));
    assert_eq!(moderate.score, 90.0);
    assert!(moderate.limitations.iter().any(|l| l.starts_with("Moderate reliability")));

    let unknown = estimate(&ConfidenceInputs {
        reliability: None,
        ..inputs()
    });
    assert_eq!(unknown.score, 90.0);
    assert!(unknown.limitations.contains(&"Reliability not established".to_string()));
}

#[test]
fn self_administration_costs_five() {
    let c = estimate(&ConfidenceInputs {
        administration_mode: AdministrationMode::SelfAdministered,
        ..inputs()
    });
    assert_eq!(c.score, 95.0);
    assert_eq!(c.limitations.len(), 1);

    let supervised = estimate(&ConfidenceInputs {
        administration_mode: AdministrationMode::Supervised,
        ..inputs()
    });
    assert_eq!(supervised.score, 100.0);
}

#[test]
fn unusual_time_costs_ten() {
    let rushed = estimate(&ConfidenceInputs {
        observed_duration_seconds: Some(30.0),
        ..inputs()
    });
    assert_eq!(rushed.score, 90.0);
    assert!(rushed.limitations.iter().any(|l| l.starts_with("Unusual completion time")));

    let unknown = estimate(&ConfidenceInputs {
        observed_duration_seconds: None,
        ..inputs()
    });
    assert_eq!(unknown.score, 100.0);
}

#[test]
fn duration_window_edges() {
    let window = DurationWindow {
        min_seconds: 100.0,
        max_seconds: 200.0,
    };
    assert!(!is_unusual_duration(50.0, &window));
    assert!(is_unusual_duration(49.9, &window));
    assert!(!is_unusual_duration(600.0, &window));
    assert!(is_unusual_duration(600.1, &window));
}

#[test]
fn level_thresholds() {
    assert_eq!(level_for(85.0), ConfidenceLevel::High);
    assert_eq!(level_for(84.9), ConfidenceLevel::Medium);
    assert_eq!(level_for(70.0), ConfidenceLevel::Medium);
    assert_eq!(level_for(69.9), ConfidenceLevel::Low);
}
