//! Pipeline orchestration

use crate::config::PipelineConfig;
use crate::extractor::ClaimExtractor;
use crate::hash::pipeline_hash;
use crate::scorer::ClaimScorer;
use mirror_domain::traits::{FactSource, Oracle};
use mirror_domain::{now_rfc3339, ClaimId, Fact, VerificationResult, NOT_PUBLISHED};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Orchestrates one verification run
///
/// Stages run in a fixed linear order with no rollback: extract claims,
/// retrieve facts per claim, score, hash, attempt publication, assemble. Each
/// stage absorbs its own failures, so `verify` always returns a well-formed
/// result for valid input, even under total external-dependency outage.
pub struct VerificationPipeline<O: Oracle, F: FactSource> {
    extractor: ClaimExtractor<O>,
    scorer: ClaimScorer<O>,
    facts: Arc<F>,
}

impl<O: Oracle, F: FactSource> VerificationPipeline<O, F> {
    /// Create a pipeline over an oracle and a fact source
    pub fn new(oracle: O, facts: F, config: PipelineConfig) -> Self {
        let oracle = Arc::new(oracle);
        let oracle_timeout = config.oracle_timeout();

        Self {
            extractor: ClaimExtractor::new(Arc::clone(&oracle), oracle_timeout),
            scorer: ClaimScorer::new(oracle, oracle_timeout),
            facts: Arc::new(facts),
        }
    }

    /// Run the full verification pipeline on a block of text
    pub async fn verify(&self, post_text: &str) -> VerificationResult {
        info!("Step 1: extracting claims");
        let claims = self.extractor.extract_claims(post_text).await;
        info!("Found {} claims", claims.len());

        info!("Step 2: querying the knowledge graph");
        // Write-once per claim id; retrieval order follows extraction order
        let mut facts_by_claim: HashMap<ClaimId, Vec<Fact>> = HashMap::with_capacity(claims.len());
        for claim in &claims {
            let facts = self.facts.related_facts(&claim.text).await;
            facts_by_claim.insert(claim.id, facts);
        }
        let total_facts: usize = facts_by_claim.values().map(Vec::len).sum();
        info!("Retrieved {} facts", total_facts);

        info!("Step 3: calculating truth score");
        let truth_score = self.scorer.score_claims(&claims, &facts_by_claim).await;
        info!("Truth score: {}/100", truth_score.overall_score);

        info!("Step 4: generating pipeline hash");
        let hash = pipeline_hash(post_text, &claims, total_facts, &truth_score);
        info!("Hash: {}...", &hash[..16]);

        info!("Step 5: publishing to the knowledge graph");
        let ual = self
            .facts
            .publish_verification(&hash, truth_score.overall_score, post_text)
            .await;

        VerificationResult {
            post_text: post_text.to_string(),
            claims,
            truth_score,
            pipeline_hash: hash,
            dkg_asset_ual: ual.unwrap_or_else(|| NOT_PUBLISHED.to_string()),
            timestamp: now_rfc3339(),
        }
    }
}
