//! Evidence facts, truth scores, and the terminal verification record
//!
//! Field names serialize in camelCase to match the wire format consumed by
//! the frontend (`postText`, `claimScores`, `dkgAssetUAL`, ...).

use crate::claim::Claim;
use serde::{Deserialize, Serialize};

/// Sentinel value for `dkgAssetUAL` when publication did not happen
pub const NOT_PUBLISHED: &str = "Not published (insufficient tokens or network issue)";

/// One evidentiary triple retrieved from the knowledge graph
///
/// Facts are immutable and belong to the claim they were retrieved for; they
/// are never shared across claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    /// Subject of the triple
    pub subject: String,

    /// Predicate/relationship
    pub predicate: String,

    /// Object of the triple
    pub object: String,

    /// Where the fact came from (live node, demo data, ...)
    pub source: String,

    /// RFC 3339 retrieval timestamp, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// The scored outcome for a single claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimScore {
    /// The claim that was scored
    pub claim: Claim,

    /// Truth score in [0, 100]
    pub score: u8,

    /// Facts the score was based on, in retrieval order
    pub matched_facts: Vec<Fact>,

    /// Short oracle-provided (or policy-provided) justification
    pub reasoning: String,
}

/// Aggregated truth score for one verification run
///
/// Invariant: `overall_score == round(mean(claim_scores[].score))`, or the
/// neutral score when `claim_scores` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruthScore {
    /// Rounded mean of the per-claim scores, in [0, 100]
    pub overall_score: u8,

    /// Per-claim scores in claim extraction order
    pub claim_scores: Vec<ClaimScore>,

    /// Total fact count across all claims
    pub dkg_facts_used: usize,

    /// RFC 3339 timestamp taken at score computation
    pub timestamp: String,
}

/// Terminal artifact of one pipeline run
///
/// Created once by the orchestrator and never mutated. A degraded run (zero
/// claims, all-neutral scores, unpublished hash) is still a valid result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// The input text, verbatim
    pub post_text: String,

    /// Extracted claims in extraction order
    pub claims: Vec<Claim>,

    /// Aggregated and per-claim truth scores
    pub truth_score: TruthScore,

    /// SHA-256 hex digest committing to this run
    pub pipeline_hash: String,

    /// UAL assigned by the DKG on publication, or [`NOT_PUBLISHED`]
    #[serde(rename = "dkgAssetUAL")]
    pub dkg_asset_ual: String,

    /// RFC 3339 timestamp of run completion (distinct from the score timestamp)
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::ClaimCategory;

    fn sample_fact() -> Fact {
        Fact {
            subject: "dkg:asset:moon".to_string(),
            predicate: "schema:about".to_string(),
            object: "The moon landing happened in 1969.".to_string(),
            source: "OriginTrail DKG (Demo Data)".to_string(),
            timestamp: Some("2025-01-01T00:00:00.000Z".to_string()),
        }
    }

    #[test]
    fn test_claim_score_wire_format() {
        let score = ClaimScore {
            claim: Claim::new("test", ClaimCategory::Fact),
            score: 85,
            matched_facts: vec![sample_fact()],
            reasoning: "supported".to_string(),
        };

        let json = serde_json::to_value(&score).unwrap();
        assert!(json.get("matchedFacts").is_some());
        assert!(json.get("matched_facts").is_none());
        assert_eq!(json["score"], 85);
    }

    #[test]
    fn test_verification_result_wire_format() {
        let result = VerificationResult {
            post_text: "text".to_string(),
            claims: vec![],
            truth_score: TruthScore {
                overall_score: 50,
                claim_scores: vec![],
                dkg_facts_used: 0,
                timestamp: "2025-01-01T00:00:00.000Z".to_string(),
            },
            pipeline_hash: "ab".repeat(32),
            dkg_asset_ual: NOT_PUBLISHED.to_string(),
            timestamp: "2025-01-01T00:00:01.000Z".to_string(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("postText").is_some());
        assert!(json.get("pipelineHash").is_some());
        assert!(json.get("dkgAssetUAL").is_some());
        assert_eq!(json["truthScore"]["overallScore"], 50);
        assert_eq!(json["truthScore"]["dkgFactsUsed"], 0);
    }

    #[test]
    fn test_fact_omits_missing_timestamp() {
        let mut fact = sample_fact();
        fact.timestamp = None;
        let json = serde_json::to_value(&fact).unwrap();
        assert!(json.get("timestamp").is_none());
    }
}
