//! Mirror Domain Layer
//!
//! Core data model and trait interfaces for the Mirror verification pipeline.
//! This crate defines the vocabulary every other layer speaks: claims extracted
//! from text, evidentiary facts retrieved from the knowledge graph, truth scores,
//! and the terminal verification record. Infrastructure implementations (LLM
//! oracles, DKG clients) live in other crates and plug in through the traits
//! defined here.
//!
//! ## Key Concepts
//!
//! - **Claim**: an atomic, independently fact-checkable statement from input text
//! - **Fact**: a subject-predicate-object evidence triple from the knowledge graph
//! - **TruthScore**: 0-100 per-claim and aggregated confidence values
//! - **VerificationResult**: the immutable record of one pipeline run
//! - **Neutral score policy**: every fail-open path scores 50, defined once in [`score`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod result;
pub mod score;
pub mod time;
pub mod traits;

// Re-exports for convenience
pub use claim::{Claim, ClaimCategory, ClaimId};
pub use result::{ClaimScore, Fact, TruthScore, VerificationResult, NOT_PUBLISHED};
pub use score::{clamp_score, overall_score, NEUTRAL_SCORE};
pub use time::now_rfc3339;
