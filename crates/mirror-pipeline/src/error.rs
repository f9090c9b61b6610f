//! Error types for the pipeline
//!
//! These errors stay inside the pipeline: every stage maps them to its
//! fail-open value (empty claims, neutral score) before returning. They exist
//! so the recovery sites can log what actually went wrong.

use thiserror::Error;

/// Errors absorbed within pipeline stages
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Oracle call failed or was rejected
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// Oracle call exceeded the configured timeout
    #[error("Oracle timeout")]
    Timeout,

    /// Oracle response was not the expected JSON shape
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        PipelineError::InvalidFormat(e.to_string())
    }
}
