//! Scoring policy: the neutral default and score aggregation
//!
//! Every fail-open path in the pipeline (no evidence, oracle outage, malformed
//! oracle output, zero claims) resolves to the same neutral score. Centralizing
//! the constant and the aggregation here keeps the invariant
//! `overall == round(mean(scores))` in one place.

use crate::result::ClaimScore;

/// Score assigned when there is nothing to judge: no evidence, no claims, or a
/// failed oracle call. Absence of evidence is scored neutrally, not negatively.
pub const NEUTRAL_SCORE: u8 = 50;

/// Combine per-claim scores into the overall truth score
///
/// Returns the arithmetic mean rounded to the nearest integer, or
/// [`NEUTRAL_SCORE`] when there are no claims.
///
/// # Examples
///
/// ```
/// use mirror_domain::overall_score;
///
/// assert_eq!(overall_score(&[]), 50);
/// ```
pub fn overall_score(claim_scores: &[ClaimScore]) -> u8 {
    if claim_scores.is_empty() {
        return NEUTRAL_SCORE;
    }

    let sum: u32 = claim_scores.iter().map(|cs| cs.score as u32).sum();
    let mean = sum as f64 / claim_scores.len() as f64;
    mean.round() as u8
}

/// Clamp an oracle-provided numeric score into [0, 100]
///
/// The scoring oracle is instructed to return a 0-100 number but nothing
/// enforces that on its side. Out-of-range values are clamped; non-finite
/// values resolve to [`NEUTRAL_SCORE`].
pub fn clamp_score(raw: f64) -> u8 {
    if !raw.is_finite() {
        return NEUTRAL_SCORE;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{Claim, ClaimCategory};

    fn score_of(value: u8) -> ClaimScore {
        ClaimScore {
            claim: Claim::new("c", ClaimCategory::Fact),
            score: value,
            matched_facts: vec![],
            reasoning: String::new(),
        }
    }

    #[test]
    fn test_empty_scores_are_neutral() {
        assert_eq!(overall_score(&[]), NEUTRAL_SCORE);
    }

    #[test]
    fn test_single_score() {
        assert_eq!(overall_score(&[score_of(85)]), 85);
    }

    #[test]
    fn test_mean_rounds_to_nearest() {
        // (80 + 85) / 2 = 82.5 -> 83
        assert_eq!(overall_score(&[score_of(80), score_of(85)]), 83);
        // (10 + 11) / 2 = 10.5 -> 11, (10 + 10 + 11) / 3 = 10.33 -> 10
        assert_eq!(overall_score(&[score_of(10), score_of(11)]), 11);
        assert_eq!(overall_score(&[score_of(10), score_of(10), score_of(11)]), 10);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(overall_score(&[score_of(0), score_of(0)]), 0);
        assert_eq!(overall_score(&[score_of(100), score_of(100)]), 100);
    }

    #[test]
    fn test_clamp_in_range() {
        assert_eq!(clamp_score(85.0), 85);
        assert_eq!(clamp_score(0.0), 0);
        assert_eq!(clamp_score(100.0), 100);
        assert_eq!(clamp_score(72.4), 72);
        assert_eq!(clamp_score(72.5), 73);
    }

    #[test]
    fn test_clamp_out_of_range() {
        assert_eq!(clamp_score(-12.0), 0);
        assert_eq!(clamp_score(250.0), 100);
    }

    #[test]
    fn test_clamp_non_finite() {
        assert_eq!(clamp_score(f64::NAN), NEUTRAL_SCORE);
        assert_eq!(clamp_score(f64::INFINITY), NEUTRAL_SCORE);
        assert_eq!(clamp_score(f64::NEG_INFINITY), NEUTRAL_SCORE);
    }
}
