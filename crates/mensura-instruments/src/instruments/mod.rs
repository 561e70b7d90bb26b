pub mod gad7;
pub mod phq9;
pub mod pss10;

use mensura_core::models::scale::{InterpretationRule, Item, ResponseOption, Severity};

/// Response options scored by their position, starting at 0.
fn options(labels: &[&str]) -> Vec<ResponseOption> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| ResponseOption {
            value: i as u32,
            label: label.to_string(),
            score: i as f64,
        })
        .collect()
}

fn item(number: u32, text: &str, labels: &[&str]) -> Item {
    Item {
        number,
        text: text.to_string(),
        reverse_scored: false,
        subscale_id: None,
        options: options(labels),
        weight: None,
        critical: false,
    }
}

fn rule(min: f64, max: f64, severity: Severity, label: &str, recommendations: &[&str]) -> InterpretationRule {
    InterpretationRule {
        min_score: min,
        max_score: max,
        severity,
        label: label.to_string(),
        recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
    }
}

/// "Over the last 2 weeks" frequency options shared by the PHQ and GAD scales.
const FREQUENCY: &[&str] = &[
    "Not at all",
    "Several days",
    "More than half the days",
    "Nearly every day",
];
