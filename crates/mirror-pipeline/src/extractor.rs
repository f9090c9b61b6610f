//! Claim extraction stage

use crate::error::PipelineError;
use crate::parser::parse_claims;
use crate::prompt::{extraction_prompt, EXTRACTION_SYSTEM};
use mirror_domain::traits::Oracle;
use mirror_domain::Claim;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Decomposes raw text into atomic, independently verifiable claims
///
/// The extractor fails open: an oracle outage, timeout, or unparsable response
/// yields an empty claim list so the rest of the pipeline can still produce a
/// well-formed result.
pub struct ClaimExtractor<O: Oracle> {
    oracle: Arc<O>,
    oracle_timeout: Duration,
}

impl<O: Oracle> ClaimExtractor<O> {
    /// Create a new extractor over a shared oracle
    pub fn new(oracle: Arc<O>, oracle_timeout: Duration) -> Self {
        Self {
            oracle,
            oracle_timeout,
        }
    }

    /// Extract claims from text, in the order the oracle reported them
    ///
    /// Empty or whitespace-only text yields an empty list without calling the
    /// oracle.
    pub async fn extract_claims(&self, text: &str) -> Vec<Claim> {
        if text.trim().is_empty() {
            debug!("Empty input text, no claims to extract");
            return Vec::new();
        }

        match self.try_extract(text).await {
            Ok(claims) => claims,
            Err(e) => {
                warn!("Claim extraction failed ({}), continuing with no claims", e);
                Vec::new()
            }
        }
    }

    async fn try_extract(&self, text: &str) -> Result<Vec<Claim>, PipelineError> {
        let prompt = extraction_prompt(text);

        let response = timeout(
            self.oracle_timeout,
            self.oracle.complete(EXTRACTION_SYSTEM, &prompt),
        )
        .await
        .map_err(|_| PipelineError::Timeout)?
        .map_err(|e| PipelineError::Oracle(e.to_string()))?;

        debug!("Extraction response length: {} chars", response.len());

        let candidates = parse_claims(&response)?;

        Ok(candidates
            .into_iter()
            .map(|c| Claim::new(c.text, c.category))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_domain::ClaimCategory;
    use mirror_llm::MockOracle;

    fn extractor(oracle: &MockOracle) -> ClaimExtractor<MockOracle> {
        ClaimExtractor::new(Arc::new(oracle.clone()), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_extracts_claims_in_order() {
        let oracle = MockOracle::new(
            r#"[
                {"text": "Ethereum transitioned to proof-of-stake in September 2022.", "category": "event"},
                {"text": "Bitcoin remains on proof-of-work.", "category": "fact"}
            ]"#,
        );

        let claims = extractor(&oracle)
            .extract_claims("Ethereum transitioned... Bitcoin remains...")
            .await;

        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].category, ClaimCategory::Event);
        assert_eq!(claims[1].text, "Bitcoin remains on proof-of-work.");
        assert_ne!(claims[0].id, claims[1].id);
        assert_eq!(claims[0].confidence, 0.8);
    }

    #[tokio::test]
    async fn test_empty_text_skips_oracle() {
        let oracle = MockOracle::new("[]");

        let claims = extractor(&oracle).extract_claims("   \n\t ").await;

        assert!(claims.is_empty());
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_oracle_failure_yields_no_claims() {
        let oracle = MockOracle::new("[]");
        oracle.push_error("gateway down");

        let claims = extractor(&oracle).extract_claims("Some factual text.").await;

        assert!(claims.is_empty());
        assert_eq!(oracle.call_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_response_yields_no_claims() {
        let oracle = MockOracle::new("Sorry, I cannot help with that.");

        let claims = extractor(&oracle).extract_claims("Some factual text.").await;

        assert!(claims.is_empty());
    }
}
