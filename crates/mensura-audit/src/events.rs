use mensura_core::models::report::AssessmentReport;
use mensura_core::models::result::ConfidenceLevel;
use mensura_core::models::scale::Severity;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::AuditError;

/// A structured audit event for compliance logging.
///
/// These events are logged via `tracing`; the compliance log collector
/// picks them up from the subscriber's output.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub actor_id: String,
    pub details: Option<serde_json::Value>,
}

/// Details recorded when a session is scored.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentScored {
    pub assessment_id: Uuid,
    pub scale_id: String,
    pub total_score: f64,
    pub severity: Severity,
    pub confidence: ConfidenceLevel,
}

impl AuditEvent {
    pub fn new(
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        actor_id: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            actor_id: actor_id.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// The `assessment.scored` event for a freshly built report.
    pub fn assessment_scored(
        report: &AssessmentReport,
        actor_id: impl Into<String>,
    ) -> Result<Self, AuditError> {
        let details = AssessmentScored {
            assessment_id: report.session_id,
            scale_id: report.scale_id.clone(),
            total_score: report.scoring.total_score,
            severity: report.interpretation.severity,
            confidence: report.confidence.level,
        };
        Ok(Self::new(
            "assessment.scored",
            "assessment",
            report.session_id.to_string(),
            actor_id,
        )
        .with_details(serde_json::to_value(details)?))
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = %self.action,
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.actor_id = %self.actor_id,
            audit.details = %details,
            "audit event"
        );
    }
}
