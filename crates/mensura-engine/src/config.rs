use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// How unanswered items contribute to total and subscale scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingItemPolicy {
    /// Unanswered items are left out of the aggregate.
    #[default]
    Exclude,
    /// Unanswered items count as a score of zero.
    ZeroFill,
}

/// Thresholds used by the validity checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidityThresholds {
    /// Missing fraction above which the completion indicator is high.
    pub completion_high_fraction: f64,
    /// Consistency values below this are flagged.
    pub min_consistency: f64,
    /// Minimum number of scored responses before consistency is checked.
    pub consistency_min_responses: usize,
    /// Minimum number of timed responses before timing is checked.
    pub timing_min_responses: usize,
    pub fast_response_seconds: f64,
    pub fast_response_fraction: f64,
    pub slow_response_seconds: f64,
    pub slow_response_fraction: f64,
    pub percentile_low: f64,
    pub percentile_high: f64,
}

impl Default for ValidityThresholds {
    fn default() -> Self {
        Self {
            completion_high_fraction: 0.2,
            min_consistency: 0.3,
            consistency_min_responses: 3,
            timing_min_responses: 5,
            fast_response_seconds: 2.0,
            fast_response_fraction: 0.3,
            slow_response_seconds: 60.0,
            slow_response_fraction: 0.2,
            percentile_low: 5.0,
            percentile_high: 95.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub missing_item_policy: MissingItemPolicy,
    /// Completion below this fails with `IncompleteAssessment` unless the
    /// caller forces completion.
    #[serde(default = "default_minimum_completion")]
    pub minimum_completion_percentage: u8,
    #[serde(default)]
    pub validity: ValidityThresholds,
}

fn default_minimum_completion() -> u8 {
    80
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            missing_item_policy: MissingItemPolicy::default(),
            minimum_completion_percentage: default_minimum_completion(),
            validity: ValidityThresholds::default(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&contents)?;
        tracing::debug!(path = %path.display(), "engine config loaded");
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self, EngineError> {
        // Parse as raw JSON so we can run migrations before deserializing.
        let json: serde_json::Value = serde_json::from_str(contents)?;
        let on_disk_version = json
            .get("config_version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32;

        let migrated = migrate(json, on_disk_version)?;
        let config: EngineConfig = serde_json::from_value(migrated)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), EngineError> {
        if self.minimum_completion_percentage > 100 {
            return Err(EngineError::Config(format!(
                "minimum_completion_percentage {} exceeds 100",
                self.minimum_completion_percentage
            )));
        }
        let v = &self.validity;
        if v.percentile_low >= v.percentile_high {
            return Err(EngineError::Config(format!(
                "percentile band [{}, {}] is empty",
                v.percentile_low, v.percentile_high
            )));
        }
        Ok(())
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, EngineError> {
    if from_version > CURRENT_VERSION {
        return Err(EngineError::Config(format!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        )));
    }

    // v0 → v1: boolean `treat_missing_as_zero` became `missing_item_policy`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| EngineError::Config("config is not a JSON object".to_string()))?;
        let zero_fill = obj
            .remove("treat_missing_as_zero")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let policy = if zero_fill { "zero_fill" } else { "exclude" };
        obj.entry("missing_item_policy")
            .or_insert(serde_json::Value::String(policy.to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated engine config v0 → v1 (missing_item_policy)");
    }

    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gets_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config.config_version, 1);
        assert_eq!(config.missing_item_policy, MissingItemPolicy::Exclude);
        assert_eq!(config.minimum_completion_percentage, 80);
        assert_eq!(config.validity.fast_response_seconds, 2.0);
    }

    #[test]
    fn v0_zero_fill_flag_is_migrated() {
        let config = EngineConfig::from_json(r#"{"treat_missing_as_zero": true}"#).unwrap();
        assert_eq!(config.missing_item_policy, MissingItemPolicy::ZeroFill);
    }

    #[test]
    fn newer_version_is_rejected() {
        let err = EngineConfig::from_json(r#"{"config_version": 9}"#).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn partial_validity_block_keeps_other_defaults() {
        let config = EngineConfig::from_json(
            r#"{"config_version": 1, "validity": {"min_consistency": 0.5}}"#,
        )
        .unwrap();
        assert_eq!(config.validity.min_consistency, 0.5);
        assert_eq!(config.validity.percentile_high, 95.0);
    }

    #[test]
    fn impossible_minimum_is_rejected() {
        let err = EngineConfig::from_json(r#"{"minimum_completion_percentage": 120}"#).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
