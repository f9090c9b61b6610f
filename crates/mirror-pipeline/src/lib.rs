//! Mirror Verification Pipeline
//!
//! The core of Mirror: extract factual claims from free text, retrieve
//! evidence for each claim from the knowledge graph, score every claim 0-100,
//! commit the run to a SHA-256 pipeline hash, and attempt a best-effort
//! publication of the result.
//!
//! # Architecture
//!
//! ```text
//! text → ClaimExtractor → FactSource (per claim) → ClaimScorer → hash → publish → VerificationResult
//! ```
//!
//! Every stage absorbs its own failures: a dead oracle yields zero claims or
//! neutral scores, an unreachable knowledge graph yields synthetic evidence,
//! and a failed publication yields the "not published" sentinel. A degraded
//! result is always a valid terminal state; `verify` never fails for valid
//! input.
//!
//! # Example
//!
//! ```no_run
//! use mirror_pipeline::{PipelineConfig, VerificationPipeline};
//! use mirror_llm::AsiOracle;
//! use mirror_graph::DkgClient;
//!
//! # async fn example() {
//! let oracle = AsiOracle::default_gateway("sk-...");
//! let dkg = DkgClient::disconnected();
//! let pipeline = VerificationPipeline::new(oracle, dkg, PipelineConfig::default());
//!
//! let result = pipeline.verify("The moon landing happened in 1969.").await;
//! println!("Truth score: {}/100", result.truth_score.overall_score);
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod hash;
mod parser;
mod pipeline;
mod prompt;
mod scorer;


pub use config::PipelineConfig;
pub use error::PipelineError;
pub use extractor::ClaimExtractor;
pub use hash::{dkg_asset_metadata, pipeline_hash, MODEL_VERSION};
pub use pipeline::VerificationPipeline;
pub use scorer::ClaimScorer;
