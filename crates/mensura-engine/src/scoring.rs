//! Item resolution and score aggregation.
//!
//! Each [`ScoringMethod`] has one [`ScoringStrategy`] implementation; they
//! share item resolution (option mapping, reverse scoring, completion
//! accounting) and differ only in how a group of item scores is combined.

use std::collections::BTreeMap;

use mensura_core::error::CoreError;
use mensura_core::models::result::ScoringResult;
use mensura_core::models::scale::{Item, ScaleDefinition, ScoringMethod};
use mensura_core::models::session::ResponseSet;

use crate::config::MissingItemPolicy;
use crate::norms::norm_scores;

/// One item's share of an aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    pub score: f64,
    pub weight: f64,
}

pub trait ScoringStrategy: Send + Sync {
    /// Combine the contributions of one group (the whole scale or a subscale).
    fn aggregate(&self, contributions: &[Contribution]) -> f64;

    fn score(
        &self,
        scale: &ScaleDefinition,
        responses: &ResponseSet,
        policy: MissingItemPolicy,
    ) -> Result<ScoringResult, CoreError> {
        let item_scores = resolve_item_scores(scale, responses)?;

        let total_score = self.aggregate(&contributions(
            scale.items.iter(),
            &item_scores,
            policy,
        ));

        // A subscale none of whose members were answered has no score.
        let subscale_scores = scale
            .subscales
            .iter()
            .filter_map(|subscale| {
                let members: Vec<&Item> = scale
                    .items
                    .iter()
                    .filter(|item| scale.is_member(subscale, item))
                    .collect();
                if !members.iter().any(|item| item_scores.contains_key(&item.number)) {
                    return None;
                }
                let score =
                    self.aggregate(&contributions(members.into_iter(), &item_scores, policy));
                Some((subscale.id.clone(), score))
            })
            .collect();

        let answered_items = item_scores.len();
        let total_items = scale.items.len();

        Ok(ScoringResult {
            total_score,
            subscale_scores,
            completion_percentage: completion_percentage(answered_items, total_items),
            answered_items,
            total_items,
            item_scores,
            norms: scale.norms.as_ref().and_then(|n| norm_scores(total_score, n)),
        })
    }
}

pub struct SumScoring;

impl ScoringStrategy for SumScoring {
    fn aggregate(&self, contributions: &[Contribution]) -> f64 {
        contributions.iter().fold(0.0, |acc, c| acc + c.score)
    }
}

pub struct AverageScoring;

impl ScoringStrategy for AverageScoring {
    fn aggregate(&self, contributions: &[Contribution]) -> f64 {
        if contributions.is_empty() {
            return 0.0;
        }
        let sum = contributions.iter().fold(0.0, |acc, c| acc + c.score);
        sum / contributions.len() as f64
    }
}

pub struct WeightedScoring;

impl ScoringStrategy for WeightedScoring {
    fn aggregate(&self, contributions: &[Contribution]) -> f64 {
        contributions
            .iter()
            .fold(0.0, |acc, c| acc + c.score * c.weight)
    }
}

/// The strategy registered for a scoring method.
pub fn strategy_for(method: ScoringMethod) -> &'static dyn ScoringStrategy {
    match method {
        ScoringMethod::Sum => &SumScoring,
        ScoringMethod::Average => &AverageScoring,
        ScoringMethod::Weighted => &WeightedScoring,
    }
}

/// Score `responses` against `scale` with the scale's own scoring method.
pub fn score(
    scale: &ScaleDefinition,
    responses: &ResponseSet,
    policy: MissingItemPolicy,
) -> Result<ScoringResult, CoreError> {
    let result = strategy_for(scale.scoring_method).score(scale, responses, policy)?;
    tracing::debug!(
        scale_id = %scale.id,
        total_score = result.total_score,
        completion = result.completion_percentage,
        "responses scored"
    );
    Ok(result)
}

/// Resolve the item's score for a raw answer, inverting reverse-scored items
/// around the midpoint of their option range.
pub fn resolve_item_score(item: &Item, raw_value: u32) -> Option<f64> {
    let raw = item.option(raw_value)?.score;
    if item.reverse_scored {
        Some(item.max_option_score() + item.min_option_score() - raw)
    } else {
        Some(raw)
    }
}

/// Resolve every response to its item score. Fails on the first response
/// that references an unknown item or an undefined option.
pub fn resolve_item_scores(
    scale: &ScaleDefinition,
    responses: &ResponseSet,
) -> Result<BTreeMap<u32, f64>, CoreError> {
    responses
        .values()
        .map(|entry| -> Result<(u32, f64), CoreError> {
            let item = scale
                .item(entry.item_number)
                .ok_or_else(|| CoreError::ItemNotFoundInScale {
                    scale_id: scale.id.clone(),
                    item_number: entry.item_number,
                })?;
            let score = resolve_item_score(item, entry.raw_value).ok_or(
                CoreError::InvalidResponseValue {
                    item_number: entry.item_number,
                    value: entry.raw_value,
                },
            )?;
            Ok((entry.item_number, score))
        })
        .collect()
}

/// Percentage of items answered, rounded to the nearest whole number.
/// Only a complete response set reports 100.
pub fn completion_percentage(answered: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    if answered >= total {
        return 100;
    }
    let pct = (100.0 * answered as f64 / total as f64).round();
    pct.clamp(0.0, 99.0) as u8
}

fn contributions<'a>(
    items: impl Iterator<Item = &'a Item>,
    item_scores: &BTreeMap<u32, f64>,
    policy: MissingItemPolicy,
) -> Vec<Contribution> {
    items
        .filter_map(|item| {
            let score = match (item_scores.get(&item.number), policy) {
                (Some(score), _) => *score,
                (None, MissingItemPolicy::ZeroFill) => 0.0,
                (None, MissingItemPolicy::Exclude) => return None,
            };
            Some(Contribution {
                score,
                weight: item.weight(),
            })
        })
        .collect()
}
