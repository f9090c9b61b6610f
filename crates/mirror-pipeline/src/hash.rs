//! Pipeline hash commitment
//!
//! The hash commits to the observable inputs and outputs of one verification
//! run: the post text, the ordered claim texts, the evidence count, the
//! overall score, and the truth-score timestamp. Because the timestamp is
//! included, the digest fingerprints a specific scored run rather than the
//! content alone; re-verifying identical text produces a new hash. That makes
//! it an audit fingerprint, not a deduplication key.

use mirror_domain::{Claim, TruthScore};
use serde::Serialize;
use serde_json::json;
use sha2::{Digest, Sha256};

/// Fixed model-version tag committed into every hash
pub const MODEL_VERSION: &str = "mirror-v1.0";

/// Canonical record hashed for one run
///
/// Field order is the canonical serialization order; serde_json emits struct
/// fields in declaration order, which keeps the digest reproducible.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PipelineRecord<'a> {
    post_text: &'a str,
    claims: Vec<&'a str>,
    dkg_facts_count: usize,
    truth_score: u8,
    timestamp: &'a str,
    model_version: &'a str,
}

/// Compute the pipeline hash for one run
///
/// Returns the SHA-256 digest of the canonical record as 64 lowercase hex
/// characters. Byte-identical inputs (including the timestamp) reproduce the
/// same digest.
pub fn pipeline_hash(
    post_text: &str,
    claims: &[Claim],
    fact_count: usize,
    truth_score: &TruthScore,
) -> String {
    let record = PipelineRecord {
        post_text,
        claims: claims.iter().map(|c| c.text.as_str()).collect(),
        dkg_facts_count: fact_count,
        truth_score: truth_score.overall_score,
        timestamp: &truth_score.timestamp,
        model_version: MODEL_VERSION,
    };

    // Struct serialization cannot fail: no maps, no non-string keys
    let canonical = serde_json::to_string(&record).expect("canonical record serializes");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

/// Build the schema.org FactCheck metadata object for a committed run
pub fn dkg_asset_metadata(hash: &str, truth_score: &TruthScore) -> serde_json::Value {
    json!({
        "@context": "https://schema.org",
        "@type": "FactCheck",
        "verificationHash": hash,
        "truthScore": truth_score.overall_score,
        "claimsAnalyzed": truth_score.claim_scores.len(),
        "dkgFactsUsed": truth_score.dkg_facts_used,
        "timestamp": truth_score.timestamp,
        "verifiedBy": "Mirror",
    })
}
