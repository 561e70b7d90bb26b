use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::scale::{AdministrationMode, ScaleDefinition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionStatus {
    Created,
    InProgress,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// A single answer to one item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResponseEntry {
    pub item_number: u32,
    pub raw_value: u32,
    /// Time spent on the item, in seconds.
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    pub recorded_at: jiff::Timestamp,
}

/// Responses keyed by item number. One entry per item; re-answering an
/// item replaces the earlier entry.
pub type ResponseSet = BTreeMap<u32, ResponseEntry>;

/// One administration of a scale to a patient.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentSession {
    pub id: Uuid,
    pub scale_id: String,
    pub patient_id: Uuid,
    pub administrator_id: Uuid,
    pub administration_mode: AdministrationMode,
    pub responses: ResponseSet,
    pub status: SessionStatus,
    pub started_at: Option<jiff::Timestamp>,
    pub completed_at: Option<jiff::Timestamp>,
    /// Bumped on every mutation; persistence uses it for check-then-update.
    pub version: u64,
    pub created_at: jiff::Timestamp,
}

impl AssessmentSession {
    pub fn new(
        scale_id: impl Into<String>,
        patient_id: Uuid,
        administrator_id: Uuid,
        administration_mode: AdministrationMode,
        now: jiff::Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            scale_id: scale_id.into(),
            patient_id,
            administrator_id,
            administration_mode,
            responses: BTreeMap::new(),
            status: SessionStatus::Created,
            started_at: None,
            completed_at: None,
            version: 0,
            created_at: now,
        }
    }

    fn transition(&mut self, to: SessionStatus) -> Result<(), CoreError> {
        let allowed = matches!(
            (self.status, to),
            (SessionStatus::Created, SessionStatus::InProgress)
                | (SessionStatus::InProgress, SessionStatus::Completed)
                | (SessionStatus::Created, SessionStatus::Cancelled)
                | (SessionStatus::InProgress, SessionStatus::Cancelled)
        );
        if !allowed {
            return Err(CoreError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.version += 1;
        Ok(())
    }

    pub fn start(&mut self, now: jiff::Timestamp) -> Result<(), CoreError> {
        self.transition(SessionStatus::InProgress)?;
        self.started_at = Some(now);
        Ok(())
    }

    /// Mark the session completed. Responses are frozen afterwards.
    pub fn complete(&mut self, now: jiff::Timestamp) -> Result<(), CoreError> {
        self.transition(SessionStatus::Completed)?;
        self.completed_at = Some(now);
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), CoreError> {
        self.transition(SessionStatus::Cancelled)
    }

    /// Record (or overwrite) the answer to one item. The entry is checked
    /// against `scale` before it is stored.
    pub fn record_response(
        &mut self,
        scale: &ScaleDefinition,
        entry: ResponseEntry,
    ) -> Result<(), CoreError> {
        if self.status != SessionStatus::InProgress {
            return Err(CoreError::NotInProgress(self.status));
        }
        scale.option_score(entry.item_number, entry.raw_value)?;
        self.responses.insert(entry.item_number, entry);
        self.version += 1;
        Ok(())
    }

    /// Wall-clock seconds between start and `until`, if the session started.
    pub fn elapsed_seconds(&self, until: jiff::Timestamp) -> Option<f64> {
        let started = self.started_at?;
        let millis = until.as_millisecond() - started.as_millisecond();
        Some((millis as f64 / 1000.0).max(0.0))
    }
}
