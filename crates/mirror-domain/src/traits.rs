//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between pipeline logic and
//! infrastructure. Implementations live in other crates (`mirror-llm`,
//! `mirror-graph`); tests substitute deterministic fakes.

use crate::result::Fact;
use async_trait::async_trait;

/// Trait for the external text-completion oracle
///
/// The pipeline treats the oracle as opaque: it sends a system instruction and
/// a user prompt, and gets raw text back that it parses itself. Implemented by
/// the infrastructure layer (mirror-llm).
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Error type for oracle operations
    type Error: std::fmt::Display + Send;

    /// Generate a completion for the given system instruction and user prompt
    async fn complete(&self, system: &str, user: &str) -> Result<String, Self::Error>;
}

/// Trait for the external knowledge source (fact retrieval and publication)
///
/// Both operations are infallible by contract: failure absorption is the
/// implementation's responsibility. Retrieval falls back to a deterministic
/// synthetic fact set; publication reports failure as `None`, never as an
/// error. Implemented by the infrastructure layer (mirror-graph).
#[async_trait]
pub trait FactSource: Send + Sync {
    /// Retrieve a small, bounded set of facts related to the claim text
    ///
    /// Returns at most 5 facts in insertion order.
    async fn related_facts(&self, claim_text: &str) -> Vec<Fact>;

    /// Best-effort publication of a verification record
    ///
    /// Returns the store-assigned identifier (UAL) on success, `None` on any
    /// failure. Callers must treat `None` as "not published", not as an error.
    async fn publish_verification(
        &self,
        hash: &str,
        truth_score: u8,
        post_text: &str,
    ) -> Option<String>;
}
