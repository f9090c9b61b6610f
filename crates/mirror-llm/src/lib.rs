//! Mirror Oracle Provider Layer
//!
//! Implementations of the `Oracle` trait from `mirror-domain`.
//!
//! # Providers
//!
//! - `MockOracle`: deterministic mock for testing
//! - `AsiOracle`: OpenAI-compatible chat-completions API integration
//!
//! # Examples
//!
//! ```
//! use mirror_llm::MockOracle;
//! use mirror_domain::traits::Oracle;
//!
//! # tokio_test::block_on(async {
//! let oracle = MockOracle::new("[]");
//! let result = oracle.complete("system", "prompt").await.unwrap();
//! assert_eq!(result, "[]");
//! # });
//! ```

#![warn(missing_docs)]

pub mod asi;

use async_trait::async_trait;
use mirror_domain::traits::Oracle;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use asi::AsiOracle;

/// Errors that can occur during oracle operations
#[derive(Error, Debug)]
pub enum OracleError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The provider rejected the request (bad key, quota, ...)
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Generic error
    #[error("Oracle error: {0}")]
    Other(String),
}

/// Mock oracle for deterministic testing
///
/// Returns pre-scripted responses in FIFO order without making any network
/// calls, falling back to a fixed default when the queue is empty. Error
/// injection and call counting let tests assert the pipeline's fail-open
/// behavior and that no oracle call happens when none should.
///
/// # Examples
///
/// ```
/// use mirror_llm::MockOracle;
/// use mirror_domain::traits::Oracle;
///
/// # tokio_test::block_on(async {
/// let oracle = MockOracle::new("default");
/// oracle.push_response("first");
/// oracle.push_response("second");
///
/// assert_eq!(oracle.complete("s", "p").await.unwrap(), "first");
/// assert_eq!(oracle.complete("s", "p").await.unwrap(), "second");
/// assert_eq!(oracle.complete("s", "p").await.unwrap(), "default");
/// assert_eq!(oracle.call_count(), 3);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockOracle {
    default_response: String,
    responses: Arc<Mutex<VecDeque<Result<String, String>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockOracle {
    /// Create a new MockOracle with a fixed default response
    pub fn new(default_response: impl Into<String>) -> Self {
        Self {
            default_response: default_response.into(),
            responses: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue a scripted response for the next unanswered call
    pub fn push_response(&self, response: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(response.into()));
    }

    /// Queue an error for the next unanswered call
    pub fn push_error(&self, message: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Err(message.into()));
    }

    /// Get the number of times `complete` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl Oracle for MockOracle {
    type Error = OracleError;

    async fn complete(&self, _system: &str, _user: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let scripted = self.responses.lock().unwrap().pop_front();
        match scripted {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(OracleError::Other(message)),
            None => Ok(self.default_response.clone()),
        }
    }
}
