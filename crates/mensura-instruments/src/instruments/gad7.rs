use mensura_core::models::scale::{
    AdministrationMode, ClinicalCutoffs, DurationWindow, Reliability, ScaleDefinition,
    ScoreRange, ScoringMethod, Severity,
};

use super::{item, rule, FREQUENCY};
use crate::Instrument;

/// GAD-7: Generalized Anxiety Disorder 7-item scale.
/// 7 items, each rated 0–3. Total 0–21.
pub struct Gad7;

impl Instrument for Gad7 {
    fn id(&self) -> &str {
        "gad7"
    }

    fn name(&self) -> &str {
        "GAD-7"
    }

    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> = std::sync::LazyLock::new(|| {
            let texts = [
                "Feeling nervous, anxious, or on edge",
                "Not being able to stop or control worrying",
                "Worrying too much about different things",
                "Trouble relaxing",
                "Being so restless that it is hard to sit still",
                "Becoming easily annoyed or irritable",
                "Feeling afraid, as if something awful might happen",
            ];

            ScaleDefinition {
                id: "gad7".to_string(),
                name: "GAD-7".to_string(),
                items: texts
                    .iter()
                    .zip(1u32..)
                    .map(|(text, number)| item(number, text, FREQUENCY))
                    .collect(),
                subscales: vec![],
                interpretation_rules: vec![
                    rule(0.0, 4.0, Severity::Minimal, "Minimal anxiety", &[]),
                    rule(5.0, 9.0, Severity::Mild, "Mild anxiety", &[]),
                    rule(
                        10.0,
                        14.0,
                        Severity::Moderate,
                        "Moderate anxiety",
                        &["Further evaluation for anxiety disorder"],
                    ),
                    rule(
                        15.0,
                        21.0,
                        Severity::Severe,
                        "Severe anxiety",
                        &["Referral to mental health specialist"],
                    ),
                ],
                score_range: ScoreRange::new(0.0, 21.0),
                scoring_method: ScoringMethod::Sum,
                reliability: Some(Reliability {
                    internal_consistency: Some(0.92),
                    test_retest: Some(0.83),
                }),
                administration_mode: AdministrationMode::SelfAdministered,
                expected_duration: Some(DurationWindow {
                    min_seconds: 60.0,
                    max_seconds: 180.0,
                }),
                cutoffs: Some(ClinicalCutoffs {
                    clinical: 10.0,
                    subclinical: 5.0,
                }),
                norms: None,
                clinical_notes: vec![],
            }
        });
        &DEFINITION
    }
}
