//! Range-based interpretation of total and subscale scores.

use mensura_core::models::result::{
    ClinicalSignificance, InterpretationOutcome, ScoringResult, SubscaleInterpretation,
};
use mensura_core::models::scale::{ClinicalCutoffs, InterpretationRule, ScaleDefinition, Severity};

const INDETERMINATE_LABEL: &str = "Indeterminate";

/// Fixed recommendations for each severity band.
pub fn severity_recommendations(severity: Severity) -> &'static [&'static str] {
    match severity {
        Severity::VerySevere | Severity::Severe => {
            &["Immediate clinical attention", "Safety assessment"]
        }
        Severity::ModeratelySevere => &["Active treatment planning", "Follow-up in 1-2 weeks"],
        Severity::Moderate => &["Follow-up in 2-4 weeks"],
        Severity::Mild => &["Watchful waiting", "Repeat screening at next visit"],
        Severity::Minimal => &["Routine follow-up"],
        Severity::Indeterminate => &["Clinician review of unscored result"],
    }
}

/// Classify `score` against the scale's clinical cutoffs.
pub fn classify_cutoffs(score: f64, cutoffs: &ClinicalCutoffs) -> ClinicalSignificance {
    if score >= cutoffs.clinical {
        ClinicalSignificance::Clinical
    } else if score >= cutoffs.subclinical {
        ClinicalSignificance::Subclinical
    } else {
        ClinicalSignificance::NonClinical
    }
}

fn significance_from_severity(severity: Severity) -> ClinicalSignificance {
    match severity {
        Severity::Indeterminate => ClinicalSignificance::Unknown,
        Severity::Minimal => ClinicalSignificance::NonClinical,
        Severity::Mild => ClinicalSignificance::Subclinical,
        Severity::Moderate
        | Severity::ModeratelySevere
        | Severity::Severe
        | Severity::VerySevere => ClinicalSignificance::Clinical,
    }
}

/// First rule whose inclusive range contains `score`, in declaration order.
pub fn find_rule(score: f64, rules: &[InterpretationRule]) -> Option<&InterpretationRule> {
    rules.iter().find(|rule| rule.matches(score))
}

/// Resolve `score` against `rules`. Never fails: an unmatched score
/// degrades to an indeterminate outcome classified by `cutoffs`.
pub fn resolve(
    score: f64,
    rules: &[InterpretationRule],
    cutoffs: Option<&ClinicalCutoffs>,
    clinical_notes: &[String],
) -> InterpretationOutcome {
    let rule = find_rule(score, rules).cloned();

    let (severity, label) = match &rule {
        Some(rule) => (rule.severity, rule.label.clone()),
        None => (Severity::Indeterminate, INDETERMINATE_LABEL.to_string()),
    };

    let clinical_significance = match cutoffs {
        Some(cutoffs) => classify_cutoffs(score, cutoffs),
        None => significance_from_severity(severity),
    };

    let rule_recommendations = rule.iter().flat_map(|r| r.recommendations.iter().cloned());
    let recommendations = dedup(
        severity_recommendations(severity)
            .iter()
            .map(|s| s.to_string())
            .chain(rule_recommendations)
            .chain(clinical_notes.iter().cloned()),
    );

    InterpretationOutcome {
        rule,
        severity,
        label,
        clinical_significance,
        recommendations,
        follow_up_required: severity >= Severity::Moderate,
    }
}

/// Interpret the total score of `scoring` with the scale's own rules.
pub fn interpret_total(scale: &ScaleDefinition, scoring: &ScoringResult) -> InterpretationOutcome {
    if scoring.answered_items == 0 {
        tracing::warn!(scale_id = %scale.id, "no responses scored, result is indeterminate");
        return resolve(scoring.total_score, &[], None, &scale.clinical_notes);
    }
    let outcome = resolve(
        scoring.total_score,
        &scale.interpretation_rules,
        scale.cutoffs.as_ref(),
        &scale.clinical_notes,
    );
    if outcome.is_indeterminate() {
        tracing::warn!(
            scale_id = %scale.id,
            total_score = scoring.total_score,
            "no interpretation rule matched, result is indeterminate"
        );
    }
    outcome
}

/// Interpret each subscale score against that subscale's own rules.
/// Subscales without a score (no member answered) are left out.
pub fn interpret_subscales(
    scale: &ScaleDefinition,
    scoring: &ScoringResult,
) -> Vec<SubscaleInterpretation> {
    scale
        .subscales
        .iter()
        .filter_map(|subscale| {
            let score = *scoring.subscale_scores.get(&subscale.id)?;
            Some(SubscaleInterpretation {
                subscale_id: subscale.id.clone(),
                name: subscale.name.clone(),
                score,
                outcome: resolve(score, &subscale.interpretation_rules, None, &[]),
            })
        })
        .collect()
}

/// Keep the first occurrence of each string, preserving order.
pub fn dedup(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
