//! Keyword derivation for fact retrieval
//!
//! Keywords are a retrieval hint only; no predicate logic hangs off them.

/// Words carrying no retrieval signal
const STOP_WORDS: &[&str] = &["the", "is", "at", "which", "on", "a", "an", "to", "in", "and"];

/// Maximum keywords kept per claim
const MAX_KEYWORDS: usize = 3;

/// Derive a small keyword set from claim text
///
/// Lowercases, strips punctuation, splits on whitespace, drops stop words and
/// words of length <= 3, and keeps at most the first three remaining tokens.
///
/// # Examples
///
/// ```
/// use mirror_graph::extract_keywords;
///
/// let keywords = extract_keywords("The moon landing happened in 1969.");
/// assert_eq!(keywords, vec!["moon", "landing", "happened"]);
/// ```
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.len() > 3 && !STOP_WORDS.contains(word))
        .take(MAX_KEYWORDS)
        .map(|word| word.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_extraction() {
        let keywords = extract_keywords("Ethereum transitioned to proof-of-stake in 2022.");
        // "proof-of-stake" collapses to "proofofstake" once punctuation is stripped
        assert_eq!(keywords, vec!["ethereum", "transitioned", "proofofstake"]);
    }

    #[test]
    fn test_drops_stop_words_and_short_words() {
        let keywords = extract_keywords("The cat is on the mat and it sat");
        // Every token is a stop word or <= 3 chars
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_caps_at_three() {
        let keywords = extract_keywords("bitcoin remains fully committed towards proof work");
        assert_eq!(keywords.len(), 3);
        assert_eq!(keywords, vec!["bitcoin", "remains", "fully"]);
    }

    #[test]
    fn test_lowercases() {
        let keywords = extract_keywords("BITCOIN Network");
        assert_eq!(keywords, vec!["bitcoin", "network"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   \t\n").is_empty());
    }

    #[test]
    fn test_deterministic() {
        let text = "Ethereum transitioned to proof-of-stake in September 2022.";
        assert_eq!(extract_keywords(text), extract_keywords(text));
    }
}
