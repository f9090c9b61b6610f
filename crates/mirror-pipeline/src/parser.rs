//! Parse oracle output into claims and scores

use crate::error::PipelineError;
use mirror_domain::ClaimCategory;
use serde_json::Value;
use tracing::warn;

/// A raw claim candidate from the extraction oracle
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimCandidate {
    /// The claim text
    pub text: String,
    /// Category assigned by the oracle
    pub category: ClaimCategory,
}

/// A raw score from the scoring oracle, before clamping
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCandidate {
    /// Score as the oracle returned it
    pub score: f64,
    /// Oracle-provided justification
    pub reasoning: String,
}

/// Parse the extraction oracle's JSON array response
///
/// Entries missing a `text` field are skipped with a warning; unknown
/// categories map to `General`. A response that is not a JSON array at all is
/// an error for the caller's fail-open path to absorb.
pub fn parse_claims(response: &str) -> Result<Vec<ClaimCandidate>, PipelineError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| PipelineError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    let entries = json
        .as_array()
        .ok_or_else(|| PipelineError::InvalidFormat("Expected JSON array".to_string()))?;

    let mut candidates = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        let Some(text) = entry.get("text").and_then(Value::as_str) else {
            warn!("Claim {} has no text, skipping", idx);
            continue;
        };
        if text.trim().is_empty() {
            warn!("Claim {} has empty text, skipping", idx);
            continue;
        }

        let category = entry
            .get("category")
            .and_then(Value::as_str)
            .map(ClaimCategory::from_label)
            .unwrap_or_default();

        candidates.push(ClaimCandidate {
            text: text.to_string(),
            category,
        });
    }

    Ok(candidates)
}

/// Parse the scoring oracle's `{"score", "reasoning"}` response
pub fn parse_score(response: &str) -> Result<ScoreCandidate, PipelineError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| PipelineError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    let score = json
        .get("score")
        .and_then(Value::as_f64)
        .ok_or_else(|| PipelineError::InvalidFormat("Missing or non-numeric 'score'".to_string()))?;

    let reasoning = json
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or("Unable to verify")
        .to_string();

    Ok(ScoreCandidate { score, reasoning })
}

/// Extract JSON from a response, handling markdown code fences
///
/// LLMs sometimes wrap JSON in ```json blocks despite being told not to.
fn extract_json(response: &str) -> Result<String, PipelineError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(PipelineError::InvalidFormat("Empty code block".to_string()));
        }

        // Skip first line (```json or ```) and last line (```)
        let json_lines = &lines[1..lines.len().saturating_sub(1)];
        Ok(json_lines.join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}
