use mensura_core::error::CoreError;
use mensura_core::models::scale::{ScaleDefinition, ScoreRange};

const VALID: &str = r#"{
    "id": "mini",
    "name": "Mini",
    "items": [
        {"number": 1, "text": "One", "options": [
            {"value": 0, "label": "No", "score": 0},
            {"value": 1, "label": "Yes", "score": 1}
        ]},
        {"number": 2, "text": "Two", "reverse_scored": true, "subscale_id": "s", "options": [
            {"value": 0, "label": "No", "score": 0},
            {"value": 1, "label": "Yes", "score": 1}
        ]}
    ],
    "subscales": [{"id": "s", "name": "S", "items": [1], "range": {"min": 0, "max": 2}}],
    "interpretation_rules": [
        {"min_score": 0, "max_score": 1, "severity": "minimal", "label": "Low"},
        {"min_score": 2, "max_score": 2, "severity": "moderate", "label": "High"}
    ],
    "score_range": {"min": 0, "max": 2},
    "administration_mode": "self_administered"
}"#;

fn parse(json: &str) -> ScaleDefinition {
    serde_json::from_str(json).unwrap()
}

#[test]
fn minimal_json_definition_is_valid() {
    let scale = parse(VALID);
    scale.validate().unwrap();
    assert!(scale.item(2).unwrap().reverse_scored);
    assert_eq!(scale.option_score(1, 1).unwrap(), 1.0);
}

#[test]
fn duplicate_item_numbers_are_rejected() {
    let mut scale = parse(VALID);
    scale.items[1].number = 1;
    assert!(matches!(scale.validate(), Err(CoreError::InvalidDefinition { .. })));
}

#[test]
fn subscale_members_must_exist() {
    let mut scale = parse(VALID);
    scale.subscales[0].items.push(7);
    let err = scale.validate().unwrap_err();
    assert!(err.to_string().contains("item 7"));
}

#[test]
fn unknown_subscale_reference_is_rejected() {
    let mut scale = parse(VALID);
    scale.items[0].subscale_id = Some("nope".to_string());
    assert!(scale.validate().is_err());
}

#[test]
fn inverted_rule_is_rejected() {
    let mut scale = parse(VALID);
    scale.interpretation_rules[0].min_score = 5.0;
    assert!(scale.validate().is_err());
}

#[test]
fn membership_comes_from_either_side() {
    let scale = parse(VALID);
    let subscale = &scale.subscales[0];
    assert!(scale.is_member(subscale, &scale.items[0]));
    assert!(scale.is_member(subscale, &scale.items[1]));
}

#[test]
fn rule_outside_score_range_is_rejected() {
    let mut scale = parse(VALID);
    scale.interpretation_rules[1].max_score = 3.0;
    let err = scale.validate().unwrap_err();
    assert!(err.to_string().contains("outside the scale range"));
}

#[test]
fn subscale_rule_outside_subscale_range_is_rejected() {
    let mut scale = parse(VALID);
    let mut rule = scale.interpretation_rules[0].clone();
    rule.max_score = 5.0;
    scale.subscales[0].interpretation_rules.push(rule);
    let err = scale.validate().unwrap_err();
    assert!(err.to_string().contains("subscale 's' range"));
}

#[test]
fn inverted_subscale_range_is_rejected() {
    let mut scale = parse(VALID);
    scale.subscales[0].range = ScoreRange::new(3.0, 1.0);
    assert!(matches!(scale.validate(), Err(CoreError::InvalidDefinition { .. })));
}

#[test]
fn score_range_bounds_are_inclusive() {
    let range = ScoreRange::new(1.0, 4.0);
    assert!(range.contains(1.0));
    assert!(range.contains(4.0));
    assert!(range.contains(2.25));
    assert!(!range.contains(4.5));
    assert!(!range.contains(0.5));
}
