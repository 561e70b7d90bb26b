use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("notification delivery failed: {0}")]
    Delivery(String),
}
