//! Mirror Knowledge-Graph Layer
//!
//! Implementations of the `FactSource` trait from `mirror-domain` against the
//! OriginTrail Decentralized Knowledge Graph (DKG).
//!
//! # Overview
//!
//! The pipeline needs two things from the knowledge graph: candidate evidence
//! triples for a claim, and a best-effort write of the finished verification
//! record. Both are failure-absorbing by contract: an unreachable or
//! uninitialized node degrades to a deterministic synthetic fact set for
//! retrieval, and to "not published" for publication. No failure in this crate
//! ever propagates to the pipeline.
//!
//! # Components
//!
//! - [`DkgClient`]: node-backed client holding an explicit optional connection
//! - [`MockFactSource`]: deterministic fake for pipeline tests
//! - [`keywords::extract_keywords`]: retrieval-hint derivation from claim text

#![warn(missing_docs)]

pub mod client;
pub mod keywords;

use async_trait::async_trait;
use mirror_domain::traits::FactSource;
use mirror_domain::Fact;
use std::sync::{Arc, Mutex};

pub use client::{DkgClient, NodeConfig};
pub use keywords::extract_keywords;

/// Mock fact source for deterministic testing
///
/// Returns a configured fact set for every claim and a configured publication
/// outcome, with call counting so tests can assert how often the pipeline
/// touched the knowledge graph.
#[derive(Debug, Clone, Default)]
pub struct MockFactSource {
    facts: Vec<Fact>,
    ual: Option<String>,
    query_count: Arc<Mutex<usize>>,
    publish_count: Arc<Mutex<usize>>,
}

impl MockFactSource {
    /// A source that finds no evidence and cannot publish
    pub fn empty() -> Self {
        Self::default()
    }

    /// A source that returns the given facts for every claim
    pub fn with_facts(facts: Vec<Fact>) -> Self {
        Self {
            facts,
            ..Self::default()
        }
    }

    /// Configure the publication outcome
    pub fn with_publication(mut self, ual: impl Into<String>) -> Self {
        self.ual = Some(ual.into());
        self
    }

    /// Number of times `related_facts` was called
    pub fn query_count(&self) -> usize {
        *self.query_count.lock().unwrap()
    }

    /// Number of times `publish_verification` was called
    pub fn publish_count(&self) -> usize {
        *self.publish_count.lock().unwrap()
    }
}

#[async_trait]
impl FactSource for MockFactSource {
    async fn related_facts(&self, _claim_text: &str) -> Vec<Fact> {
        *self.query_count.lock().unwrap() += 1;
        self.facts.clone()
    }

    async fn publish_verification(
        &self,
        _hash: &str,
        _truth_score: u8,
        _post_text: &str,
    ) -> Option<String> {
        *self.publish_count.lock().unwrap() += 1;
        self.ual.clone()
    }
}
