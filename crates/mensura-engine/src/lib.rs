//! mensura-engine
//!
//! Turns a scale definition and a session's responses into a scored,
//! interpreted, validity-annotated and confidence-rated report.
//!
//! Every stage is a pure function of its inputs. Data flows one way:
//! scoring → interpretation → validity → confidence → report.

pub mod confidence;
pub mod config;
pub mod error;
pub mod interpretation;
pub mod norms;
pub mod report;
pub mod scoring;
pub mod store;
pub mod validity;
pub mod workflow;

pub use config::EngineConfig;
pub use error::EngineError;
pub use report::{AssessmentEngine, EvaluationRequest};
