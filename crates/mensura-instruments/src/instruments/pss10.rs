use mensura_core::models::scale::{
    AdministrationMode, DurationWindow, PopulationNorms, Reliability, ScaleDefinition, ScoreRange,
    ScoringMethod, Severity, Subscale,
};

use super::{item, rule};
use crate::Instrument;

const HELPLESSNESS: &str = "perceived_helplessness";
const SELF_EFFICACY: &str = "perceived_self_efficacy";

/// PSS-10: Perceived Stress Scale, 10-item version.
/// Items rated 0–4; items 4, 5, 7 and 8 are positively worded and
/// reverse scored. Total 0–40.
pub struct Pss10;

impl Instrument for Pss10 {
    fn id(&self) -> &str {
        "pss10"
    }

    fn name(&self) -> &str {
        "PSS-10"
    }

    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> = std::sync::LazyLock::new(|| {
            let labels = ["Never", "Almost never", "Sometimes", "Fairly often", "Very often"];
            let texts = [
                "Been upset because of something that happened unexpectedly",
                "Felt that you were unable to control the important things in your life",
                "Felt nervous and stressed",
                "Felt confident about your ability to handle your personal problems",
                "Felt that things were going your way",
                "Found that you could not cope with all the things that you had to do",
                "Been able to control irritations in your life",
                "Felt that you were on top of things",
                "Been angered because of things that happened that were outside of your control",
                "Felt difficulties were piling up so high that you could not overcome them",
            ];
            let reversed = [4, 5, 7, 8];

            let items = texts
                .iter()
                .zip(1u32..)
                .map(|(text, number)| {
                    let mut entry = item(number, text, &labels);
                    entry.reverse_scored = reversed.contains(&number);
                    entry.subscale_id = Some(if entry.reverse_scored {
                        SELF_EFFICACY.to_string()
                    } else {
                        HELPLESSNESS.to_string()
                    });
                    entry
                })
                .collect();

            ScaleDefinition {
                id: "pss10".to_string(),
                name: "PSS-10".to_string(),
                items,
                subscales: vec![
                    Subscale {
                        id: HELPLESSNESS.to_string(),
                        name: "Perceived Helplessness".to_string(),
                        items: vec![1, 2, 3, 6, 9, 10],
                        range: ScoreRange::new(0.0, 24.0),
                        interpretation_rules: vec![],
                        description: None,
                    },
                    Subscale {
                        id: SELF_EFFICACY.to_string(),
                        name: "Perceived Self-Efficacy".to_string(),
                        items: vec![4, 5, 7, 8],
                        range: ScoreRange::new(0.0, 16.0),
                        interpretation_rules: vec![
                            rule(0.0, 5.0, Severity::Minimal, "Adequate self-efficacy", &[]),
                            rule(6.0, 10.0, Severity::Mild, "Reduced self-efficacy", &[]),
                            rule(11.0, 16.0, Severity::Moderate, "Low self-efficacy", &[]),
                        ],
                        description: Some("Reverse-scored items; higher = less control".to_string()),
                    },
                ],
                interpretation_rules: vec![
                    rule(0.0, 13.0, Severity::Minimal, "Low perceived stress", &[]),
                    rule(
                        14.0,
                        26.0,
                        Severity::Moderate,
                        "Moderate perceived stress",
                        &["Stress management resources"],
                    ),
                    rule(
                        27.0,
                        40.0,
                        Severity::Severe,
                        "High perceived stress",
                        &["Assess for anxiety and depressive disorders"],
                    ),
                ],
                score_range: ScoreRange::new(0.0, 40.0),
                scoring_method: ScoringMethod::Sum,
                reliability: Some(Reliability {
                    internal_consistency: Some(0.78),
                    test_retest: Some(0.85),
                }),
                administration_mode: AdministrationMode::SelfAdministered,
                expected_duration: Some(DurationWindow {
                    min_seconds: 90.0,
                    max_seconds: 300.0,
                }),
                cutoffs: None,
                norms: Some(PopulationNorms {
                    mean: 13.0,
                    standard_deviation: 6.2,
                    population: Some("US adult general population".to_string()),
                }),
                clinical_notes: vec![],
            }
        });
        &DEFINITION
    }
}
