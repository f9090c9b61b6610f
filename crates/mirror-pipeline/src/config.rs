//! Configuration for the pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the verification pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum time for a single oracle call (seconds)
    #[serde(default = "default_oracle_timeout")]
    pub oracle_timeout_secs: u64,
}

fn default_oracle_timeout() -> u64 {
    30
}

impl PipelineConfig {
    /// Get the oracle timeout as a Duration
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.oracle_timeout_secs == 0 {
            return Err("oracle_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            oracle_timeout_secs: default_oracle_timeout(),
        }
    }
}
