//! Claim scoring and aggregation stage

use crate::error::PipelineError;
use crate::parser::parse_score;
use crate::prompt::{scoring_prompt, SCORING_SYSTEM};
use mirror_domain::traits::Oracle;
use mirror_domain::{
    clamp_score, now_rfc3339, overall_score, Claim, ClaimId, ClaimScore, Fact, TruthScore,
    NEUTRAL_SCORE,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Reasoning attached when a claim has no matched facts
const NO_EVIDENCE_REASONING: &str = "No DKG evidence found for verification";

/// Reasoning attached when the scoring oracle fails
const SCORING_FAILURE_REASONING: &str = "Error during verification";

/// Scores claims against their matched facts via the scoring oracle
///
/// Two fail-open rules apply per claim: no evidence means the neutral score
/// with no oracle call at all, and any oracle failure means the neutral score
/// with a diagnostic reasoning. The aggregate is the rounded mean.
pub struct ClaimScorer<O: Oracle> {
    oracle: Arc<O>,
    oracle_timeout: Duration,
}

impl<O: Oracle> ClaimScorer<O> {
    /// Create a new scorer over a shared oracle
    pub fn new(oracle: Arc<O>, oracle_timeout: Duration) -> Self {
        Self {
            oracle,
            oracle_timeout,
        }
    }

    /// Score every claim and aggregate into a [`TruthScore`]
    ///
    /// `claim_scores` preserves the order of `claims`; `dkg_facts_used` counts
    /// facts across all claims; the timestamp is taken here, at score
    /// computation.
    pub async fn score_claims(
        &self,
        claims: &[Claim],
        facts_by_claim: &HashMap<ClaimId, Vec<Fact>>,
    ) -> TruthScore {
        let mut claim_scores = Vec::with_capacity(claims.len());

        for claim in claims {
            let facts = facts_by_claim.get(&claim.id).cloned().unwrap_or_default();
            claim_scores.push(self.score_one(claim, facts).await);
        }

        let overall = overall_score(&claim_scores);
        let dkg_facts_used = facts_by_claim.values().map(Vec::len).sum();

        TruthScore {
            overall_score: overall,
            claim_scores,
            dkg_facts_used,
            timestamp: now_rfc3339(),
        }
    }

    async fn score_one(&self, claim: &Claim, facts: Vec<Fact>) -> ClaimScore {
        if facts.is_empty() {
            debug!("No evidence for claim {}, scoring neutral", claim.id);
            return ClaimScore {
                claim: claim.clone(),
                score: NEUTRAL_SCORE,
                matched_facts: facts,
                reasoning: NO_EVIDENCE_REASONING.to_string(),
            };
        }

        match self.ask_oracle(claim, &facts).await {
            Ok((score, reasoning)) => ClaimScore {
                claim: claim.clone(),
                score,
                matched_facts: facts,
                reasoning,
            },
            Err(e) => {
                warn!("Scoring failed for claim {} ({}), scoring neutral", claim.id, e);
                ClaimScore {
                    claim: claim.clone(),
                    score: NEUTRAL_SCORE,
                    matched_facts: facts,
                    reasoning: SCORING_FAILURE_REASONING.to_string(),
                }
            }
        }
    }

    async fn ask_oracle(
        &self,
        claim: &Claim,
        facts: &[Fact],
    ) -> Result<(u8, String), PipelineError> {
        let prompt = scoring_prompt(&claim.text, facts);

        let response = timeout(
            self.oracle_timeout,
            self.oracle.complete(SCORING_SYSTEM, &prompt),
        )
        .await
        .map_err(|_| PipelineError::Timeout)?
        .map_err(|e| PipelineError::Oracle(e.to_string()))?;

        let candidate = parse_score(&response)?;

        let score = clamp_score(candidate.score);
        if score as f64 != candidate.score {
            warn!(
                "Oracle score {} for claim {} clamped to {}",
                candidate.score, claim.id, score
            );
        }

        Ok((score, candidate.reasoning))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_domain::ClaimCategory;
    use mirror_llm::MockOracle;

    fn fact(object: &str) -> Fact {
        Fact {
            subject: "dkg:asset:test".to_string(),
            predicate: "schema:about".to_string(),
            object: object.to_string(),
            source: "test".to_string(),
            timestamp: None,
        }
    }

    fn scorer(oracle: &MockOracle) -> ClaimScorer<MockOracle> {
        ClaimScorer::new(Arc::new(oracle.clone()), Duration::from_secs(5))
    }

    fn facts_map(claims: &[Claim], facts: Vec<Vec<Fact>>) -> HashMap<ClaimId, Vec<Fact>> {
        claims
            .iter()
            .zip(facts)
            .map(|(claim, f)| (claim.id, f))
            .collect()
    }

    #[tokio::test]
    async fn test_no_evidence_scores_neutral_without_oracle_call() {
        let oracle = MockOracle::new(r#"{"score": 99, "reasoning": "should not be used"}"#);
        let claims = vec![Claim::new("Unverifiable claim.", ClaimCategory::Fact)];
        let map = facts_map(&claims, vec![vec![]]);

        let truth = scorer(&oracle).score_claims(&claims, &map).await;

        assert_eq!(truth.claim_scores[0].score, NEUTRAL_SCORE);
        assert_eq!(truth.claim_scores[0].reasoning, NO_EVIDENCE_REASONING);
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_oracle_score_used_verbatim_when_in_range() {
        let oracle = MockOracle::new(r#"{"score": 85, "reasoning": "well supported"}"#);
        let claims = vec![Claim::new("Supported claim.", ClaimCategory::Fact)];
        let map = facts_map(&claims, vec![vec![fact("a"), fact("b")]]);

        let truth = scorer(&oracle).score_claims(&claims, &map).await;

        assert_eq!(truth.claim_scores[0].score, 85);
        assert_eq!(truth.claim_scores[0].matched_facts.len(), 2);
        assert_eq!(truth.claim_scores[0].reasoning, "well supported");
        assert_eq!(truth.overall_score, 85);
        assert_eq!(truth.dkg_facts_used, 2);
    }

    #[tokio::test]
    async fn test_out_of_range_scores_are_clamped() {
        let oracle = MockOracle::new("");
        oracle.push_response(r#"{"score": 250, "reasoning": "overshoot"}"#);
        oracle.push_response(r#"{"score": -40, "reasoning": "undershoot"}"#);

        let claims = vec![
            Claim::new("First.", ClaimCategory::Fact),
            Claim::new("Second.", ClaimCategory::Fact),
        ];
        let map = facts_map(&claims, vec![vec![fact("a")], vec![fact("b")]]);

        let truth = scorer(&oracle).score_claims(&claims, &map).await;

        assert_eq!(truth.claim_scores[0].score, 100);
        assert_eq!(truth.claim_scores[1].score, 0);
    }

    #[tokio::test]
    async fn test_oracle_failure_scores_neutral() {
        let oracle = MockOracle::new("");
        oracle.push_error("gateway down");

        let claims = vec![Claim::new("Claim.", ClaimCategory::Fact)];
        let map = facts_map(&claims, vec![vec![fact("a")]]);

        let truth = scorer(&oracle).score_claims(&claims, &map).await;

        assert_eq!(truth.claim_scores[0].score, NEUTRAL_SCORE);
        assert_eq!(truth.claim_scores[0].reasoning, SCORING_FAILURE_REASONING);
        // Matched facts are still attached to the failed score
        assert_eq!(truth.claim_scores[0].matched_facts.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_oracle_response_scores_neutral() {
        let oracle = MockOracle::new("I'd rate this claim quite highly.");

        let claims = vec![Claim::new("Claim.", ClaimCategory::Fact)];
        let map = facts_map(&claims, vec![vec![fact("a")]]);

        let truth = scorer(&oracle).score_claims(&claims, &map).await;

        assert_eq!(truth.claim_scores[0].score, NEUTRAL_SCORE);
        assert_eq!(truth.claim_scores[0].reasoning, SCORING_FAILURE_REASONING);
    }

    #[tokio::test]
    async fn test_aggregation_rounds_mean() {
        let oracle = MockOracle::new("");
        oracle.push_response(r#"{"score": 80, "reasoning": "a"}"#);
        oracle.push_response(r#"{"score": 85, "reasoning": "b"}"#);

        let claims = vec![
            Claim::new("First.", ClaimCategory::Fact),
            Claim::new("Second.", ClaimCategory::Fact),
        ];
        let map = facts_map(&claims, vec![vec![fact("a")], vec![fact("b")]]);

        let truth = scorer(&oracle).score_claims(&claims, &map).await;

        // (80 + 85) / 2 = 82.5 -> 83
        assert_eq!(truth.overall_score, 83);
    }

    #[tokio::test]
    async fn test_zero_claims_scores_neutral_overall() {
        let oracle = MockOracle::new("[]");
        let truth = scorer(&oracle).score_claims(&[], &HashMap::new()).await;

        assert_eq!(truth.overall_score, NEUTRAL_SCORE);
        assert!(truth.claim_scores.is_empty());
        assert_eq!(truth.dkg_facts_used, 0);
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_order_preserved() {
        let oracle = MockOracle::new("");
        oracle.push_response(r#"{"score": 10, "reasoning": "a"}"#);
        oracle.push_response(r#"{"score": 90, "reasoning": "b"}"#);

        let claims = vec![
            Claim::new("First.", ClaimCategory::Fact),
            Claim::new("Second.", ClaimCategory::Fact),
        ];
        let map = facts_map(&claims, vec![vec![fact("a")], vec![fact("b")]]);

        let truth = scorer(&oracle).score_claims(&claims, &map).await;

        assert_eq!(truth.claim_scores.len(), claims.len());
        for (cs, claim) in truth.claim_scores.iter().zip(&claims) {
            assert_eq!(cs.claim.id, claim.id);
        }
        assert_eq!(truth.claim_scores[0].score, 10);
        assert_eq!(truth.claim_scores[1].score, 90);
    }
}
