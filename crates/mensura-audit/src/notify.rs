use mensura_core::models::report::AssessmentReport;
use mensura_core::models::scale::Severity;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AuditError;

/// What the care team is told about an escalated result.
#[derive(Debug, Clone, Serialize)]
pub struct SevereResultAlert {
    pub session_id: Uuid,
    pub patient_id: Uuid,
    pub scale_id: String,
    pub severity: Severity,
    pub critical_items: Vec<u32>,
}

impl SevereResultAlert {
    pub fn from_report(report: &AssessmentReport) -> Self {
        Self {
            session_id: report.session_id,
            patient_id: report.patient_id,
            scale_id: report.scale_id.clone(),
            severity: report.interpretation.severity,
            critical_items: report.critical_items.iter().map(|c| c.item_number).collect(),
        }
    }
}

/// Delivery channel for escalations (pager, inbox, ...).
pub trait Notifier: Send + Sync {
    fn notify(&self, alert: &SevereResultAlert) -> Result<(), AuditError>;
}

/// Writes alerts to the log at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, alert: &SevereResultAlert) -> Result<(), AuditError> {
        let payload = serde_json::to_string(alert)?;
        tracing::warn!(
            session_id = %alert.session_id,
            scale_id = %alert.scale_id,
            severity = %alert.severity,
            alert = %payload,
            "severe assessment result"
        );
        Ok(())
    }
}

/// Notify when the report needs escalation. Fire-and-forget: a delivery
/// failure is logged and otherwise ignored. Returns whether a notification
/// was attempted.
pub fn notify_if_severe(notifier: &dyn Notifier, report: &AssessmentReport) -> bool {
    if !report.needs_escalation() {
        return false;
    }
    let alert = SevereResultAlert::from_report(report);
    if let Err(e) = notifier.notify(&alert) {
        tracing::warn!(session_id = %report.session_id, error = %e, "notification failed");
    }
    true
}
