//! mensura-core
//!
//! Pure domain types for clinical assessment scoring: scale definitions,
//! assessment sessions, scoring results and the assembled report.
//! No I/O; this is the shared vocabulary of the Mensura system.

pub mod error;
pub mod models;
pub mod repository;
