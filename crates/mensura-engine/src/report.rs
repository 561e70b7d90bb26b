//! Report assembly: runs every stage and composes the immutable report.

use mensura_core::models::report::{AssessmentReport, CriticalItemAlert};
use mensura_core::models::scale::ScaleDefinition;
use mensura_core::models::session::AssessmentSession;

use crate::confidence::{self, ConfidenceInputs};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::interpretation::{self, dedup};
use crate::scoring;
use crate::validity::ValidityAnalyzer;

const CRITICAL_ITEM_RECOMMENDATION: &str = "Safety assessment";

/// Everything one evaluation needs besides the engine configuration.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationRequest<'a> {
    pub scale: &'a ScaleDefinition,
    pub session: &'a AssessmentSession,
    /// Wall-clock time the patient took, if known.
    pub observed_duration_seconds: Option<f64>,
    /// Accept completion below the configured minimum.
    pub force: bool,
    pub calculated_at: jiff::Timestamp,
}

/// Stateless apart from its configuration; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct AssessmentEngine {
    config: EngineConfig,
}

impl AssessmentEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score, interpret, check and rate one session. Either the whole
    /// report is built or an error is returned.
    pub fn evaluate(&self, request: &EvaluationRequest<'_>) -> Result<AssessmentReport, EngineError> {
        let EvaluationRequest {
            scale,
            session,
            observed_duration_seconds,
            force,
            calculated_at,
        } = *request;

        if session.scale_id != scale.id {
            return Err(EngineError::ScaleMismatch {
                session_scale: session.scale_id.clone(),
                scale: scale.id.clone(),
            });
        }

        let scoring = scoring::score(scale, &session.responses, self.config.missing_item_policy)?;

        let minimum = self.config.minimum_completion_percentage;
        if scoring.completion_percentage < minimum {
            if !force {
                return Err(EngineError::IncompleteAssessment {
                    completion: scoring.completion_percentage,
                    minimum,
                });
            }
            tracing::info!(
                session_id = %session.id,
                completion = scoring.completion_percentage,
                minimum,
                "completion below minimum accepted by override"
            );
        }

        let interpretation = interpretation::interpret_total(scale, &scoring);
        let subscale_interpretations = interpretation::interpret_subscales(scale, &scoring);

        let validity_indicators =
            ValidityAnalyzer::new(&self.config.validity).analyze(scale, &session.responses, &scoring);

        let confidence = confidence::estimate(&ConfidenceInputs {
            completion_percentage: scoring.completion_percentage,
            reliability: scale.reliability,
            administration_mode: session.administration_mode,
            observed_duration_seconds,
            expected_duration: scale.expected_duration,
        });

        let critical_items = critical_item_alerts(scale, session, &scoring.item_scores);

        let mut recommendations = interpretation.recommendations.clone();
        if !critical_items.is_empty() {
            recommendations.push(CRITICAL_ITEM_RECOMMENDATION.to_string());
        }
        let recommendations = dedup(recommendations);

        tracing::info!(
            session_id = %session.id,
            scale_id = %scale.id,
            total_score = scoring.total_score,
            severity = %interpretation.severity,
            confidence = %confidence.level,
            indicators = validity_indicators.len(),
            "assessment evaluated"
        );

        Ok(AssessmentReport {
            session_id: session.id,
            scale_id: scale.id.clone(),
            scale_name: scale.name.clone(),
            patient_id: session.patient_id,
            scoring,
            interpretation,
            subscale_interpretations,
            validity_indicators,
            confidence,
            critical_items,
            recommendations,
            clinical_notes: scale.clinical_notes.clone(),
            calculated_at,
        })
    }
}

fn critical_item_alerts(
    scale: &ScaleDefinition,
    session: &AssessmentSession,
    item_scores: &std::collections::BTreeMap<u32, f64>,
) -> Vec<CriticalItemAlert> {
    scale
        .items
        .iter()
        .filter(|item| item.critical)
        .filter_map(|item| {
            let entry = session.responses.get(&item.number)?;
            let score = *item_scores.get(&item.number)?;
            (score > item.min_option_score()).then(|| CriticalItemAlert {
                item_number: item.number,
                item_text: item.text.clone(),
                raw_value: entry.raw_value,
                score,
            })
        })
        .collect()
}
