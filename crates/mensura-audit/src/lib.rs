//! mensura-audit
//!
//! Post-hoc audit events and severe-result notifications. Both are emitted
//! after a report exists; neither can fail an evaluation.

pub mod error;
pub mod events;
pub mod notify;
