//! Session workflow around the engine: recording responses and the single
//! `in_progress → completed` transition.

use mensura_core::error::CoreError;
use mensura_core::models::report::AssessmentReport;
use mensura_core::models::session::{ResponseEntry, SessionStatus};
use mensura_core::repository::{ScaleRepository, SessionStore};
use uuid::Uuid;

use crate::error::EngineError;
use crate::report::{AssessmentEngine, EvaluationRequest};

/// Record one response against a stored session.
pub fn record_response(
    scales: &dyn ScaleRepository,
    store: &dyn SessionStore,
    session_id: Uuid,
    entry: ResponseEntry,
) -> Result<(), EngineError> {
    let mut session = store.load(session_id)?;
    let scale = scales
        .find_scale(&session.scale_id)
        .ok_or_else(|| EngineError::ScaleNotFound(session.scale_id.clone()))?;
    let expected = session.version;
    session.record_response(&scale, entry)?;
    store.save(&session, expected)?;
    Ok(())
}

/// Evaluate a session and, only if a report is produced, mark it completed.
///
/// The session must be `in_progress`. The completion write is guarded by the
/// version read here, so a concurrent completion or response makes this call
/// fail with [`CoreError::VersionConflict`] and no report is returned.
pub fn complete_session(
    engine: &AssessmentEngine,
    scales: &dyn ScaleRepository,
    store: &dyn SessionStore,
    session_id: Uuid,
    force: bool,
    now: jiff::Timestamp,
) -> Result<AssessmentReport, EngineError> {
    let session = store.load(session_id)?;
    if session.status != SessionStatus::InProgress {
        return Err(CoreError::NotInProgress(session.status).into());
    }

    let scale = scales
        .find_scale(&session.scale_id)
        .ok_or_else(|| EngineError::ScaleNotFound(session.scale_id.clone()))?;

    let report = engine.evaluate(&EvaluationRequest {
        scale: &scale,
        session: &session,
        observed_duration_seconds: session.elapsed_seconds(now),
        force,
        calculated_at: now,
    })?;

    let expected = session.version;
    let mut completed = session;
    completed.complete(now)?;
    store.save(&completed, expected)?;

    tracing::info!(session_id = %session_id, "session completed");
    Ok(report)
}
