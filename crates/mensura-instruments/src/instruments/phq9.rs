use mensura_core::models::scale::{
    AdministrationMode, ClinicalCutoffs, DurationWindow, Reliability, ScaleDefinition,
    ScoreRange, ScoringMethod, Severity,
};

use super::{item, rule, FREQUENCY};
use crate::Instrument;

/// PHQ-9: Patient Health Questionnaire, 9-item depression module.
/// 9 items, each rated 0–3. Total 0–27. Item 9 screens for self-harm.
pub struct Phq9;

impl Instrument for Phq9 {
    fn id(&self) -> &str {
        "phq9"
    }

    fn name(&self) -> &str {
        "PHQ-9"
    }

    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> = std::sync::LazyLock::new(|| {
            let texts = [
                "Little interest or pleasure in doing things",
                "Feeling down, depressed, or hopeless",
                "Trouble falling or staying asleep, or sleeping too much",
                "Feeling tired or having little energy",
                "Poor appetite or overeating",
                "Feeling bad about yourself, or that you are a failure or have let yourself or your family down",
                "Trouble concentrating on things, such as reading the newspaper or watching television",
                "Moving or speaking so slowly that other people could have noticed, or the opposite, being so fidgety or restless that you have been moving around a lot more than usual",
                "Thoughts that you would be better off dead, or of hurting yourself in some way",
            ];

            let mut items: Vec<_> = texts
                .iter()
                .zip(1u32..)
                .map(|(text, number)| item(number, text, FREQUENCY))
                .collect();
            if let Some(self_harm) = items.iter_mut().find(|i| i.number == 9) {
                self_harm.critical = true;
            }

            ScaleDefinition {
                id: "phq9".to_string(),
                name: "PHQ-9".to_string(),
                items,
                subscales: vec![],
                interpretation_rules: vec![
                    rule(0.0, 4.0, Severity::Minimal, "None-minimal depression", &[]),
                    rule(5.0, 9.0, Severity::Mild, "Mild depression", &[]),
                    rule(
                        10.0,
                        14.0,
                        Severity::Moderate,
                        "Moderate depression",
                        &["Consider counseling or pharmacotherapy"],
                    ),
                    rule(
                        15.0,
                        19.0,
                        Severity::ModeratelySevere,
                        "Moderately severe depression",
                        &["Pharmacotherapy and/or psychotherapy"],
                    ),
                    rule(
                        20.0,
                        27.0,
                        Severity::Severe,
                        "Severe depression",
                        &["Referral to mental health specialist"],
                    ),
                ],
                score_range: ScoreRange::new(0.0, 27.0),
                scoring_method: ScoringMethod::Sum,
                reliability: Some(Reliability {
                    internal_consistency: Some(0.89),
                    test_retest: Some(0.84),
                }),
                administration_mode: AdministrationMode::SelfAdministered,
                expected_duration: Some(DurationWindow {
                    min_seconds: 120.0,
                    max_seconds: 300.0,
                }),
                cutoffs: Some(ClinicalCutoffs {
                    clinical: 10.0,
                    subclinical: 5.0,
                }),
                norms: None,
                clinical_notes: vec![
                    "Any positive response to item 9 requires a suicide risk assessment regardless of total score".to_string(),
                ],
            }
        });
        &DEFINITION
    }
}
