//! Claim module - the unit of verification in Mirror

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a claim within one pipeline run
///
/// Backed by a random UUIDv4. The id is the join key between a claim and the
/// facts retrieved for it, so it must be unique per run; no cross-run meaning
/// is attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(uuid::Uuid);

impl ClaimId {
    /// Generate a fresh ClaimId
    ///
    /// # Examples
    ///
    /// ```
    /// use mirror_domain::ClaimId;
    ///
    /// let a = ClaimId::new();
    /// let b = ClaimId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Parse a ClaimId from its hyphenated string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid claim id: {}", e))
    }
}

impl Default for ClaimId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category assigned to a claim by the extraction oracle
///
/// Unknown labels from the oracle map to `General` rather than failing the
/// whole extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimCategory {
    /// A general factual statement
    Fact,
    /// A numeric or statistical statement
    Statistic,
    /// A statement about an event
    Event,
    /// A statement about a person
    Person,
    /// Anything the oracle could not categorize
    General,
}

impl ClaimCategory {
    /// Map an oracle-provided category label to a category
    ///
    /// # Examples
    ///
    /// ```
    /// use mirror_domain::ClaimCategory;
    ///
    /// assert_eq!(ClaimCategory::from_label("statistic"), ClaimCategory::Statistic);
    /// assert_eq!(ClaimCategory::from_label("opinion?!"), ClaimCategory::General);
    /// ```
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "fact" => ClaimCategory::Fact,
            "statistic" => ClaimCategory::Statistic,
            "event" => ClaimCategory::Event,
            "person" => ClaimCategory::Person,
            _ => ClaimCategory::General,
        }
    }
}

impl Default for ClaimCategory {
    fn default() -> Self {
        ClaimCategory::General
    }
}

/// Default extraction confidence assigned to every claim
///
/// The extraction oracle does not return calibrated confidence, so this is a
/// placeholder constant rather than a computed value.
pub const DEFAULT_CLAIM_CONFIDENCE: f64 = 0.8;

/// An atomic, independently verifiable factual claim extracted from input text
///
/// Claims are immutable after creation. One claim is produced per detected
/// factual statement; its `id` keys the facts retrieved for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier within the pipeline run
    pub id: ClaimId,

    /// The claim text as the oracle extracted it
    pub text: String,

    /// Category assigned by the extraction oracle
    pub category: ClaimCategory,

    /// Extraction confidence in [0, 1]
    pub confidence: f64,
}

impl Claim {
    /// Create a new claim with a fresh id and the default extraction confidence
    pub fn new(text: impl Into<String>, category: ClaimCategory) -> Self {
        Self {
            id: ClaimId::new(),
            text: text.into(),
            category,
            confidence: DEFAULT_CLAIM_CONFIDENCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_uniqueness() {
        let ids: Vec<ClaimId> = (0..100).map(|_| ClaimId::new()).collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_claim_id_round_trip() {
        let id = ClaimId::new();
        let parsed = ClaimId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_claim_id_invalid_string() {
        assert!(ClaimId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ClaimCategory::from_label("fact"), ClaimCategory::Fact);
        assert_eq!(ClaimCategory::from_label("Event"), ClaimCategory::Event);
        assert_eq!(ClaimCategory::from_label("PERSON"), ClaimCategory::Person);
        assert_eq!(ClaimCategory::from_label(" statistic "), ClaimCategory::Statistic);
        assert_eq!(ClaimCategory::from_label(""), ClaimCategory::General);
        assert_eq!(ClaimCategory::from_label("opinion"), ClaimCategory::General);
    }

    #[test]
    fn test_new_claim_defaults() {
        let claim = Claim::new("The moon landing happened in 1969.", ClaimCategory::Event);
        assert_eq!(claim.category, ClaimCategory::Event);
        assert_eq!(claim.confidence, DEFAULT_CLAIM_CONFIDENCE);
        assert!(!claim.text.is_empty());
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&ClaimCategory::Statistic).unwrap();
        assert_eq!(json, "\"statistic\"");
        let back: ClaimCategory = serde_json::from_str("\"event\"").unwrap();
        assert_eq!(back, ClaimCategory::Event);
    }
}
