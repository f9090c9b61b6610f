//! Oracle prompt construction for extraction and scoring

use mirror_domain::Fact;

/// System instruction for the extraction oracle
pub const EXTRACTION_SYSTEM: &str =
    "You are a factual claim extraction expert. Return only valid JSON arrays.";

/// System instruction for the scoring oracle
pub const SCORING_SYSTEM: &str = "You are a fact-checking expert. Return only valid JSON.";

/// Build the claim-extraction prompt for a block of text
///
/// Constrains the oracle to a JSON array of `{"text", "category"}` objects
/// covering independently fact-checkable statements only.
pub fn extraction_prompt(text: &str) -> String {
    format!(
        r#"Extract all factual claims from the following text.
Return ONLY a JSON array of claims in this exact format:
[{{"text": "claim text", "category": "fact/statistic/event/person"}}]

Text: {}

Extract claims that can be verified as true or false. Ignore opinions."#,
        text
    )
}

/// Build the scoring prompt for one claim and its matched facts
///
/// Facts are rendered as `- subject predicate object` lines; the oracle must
/// answer with a single `{"score", "reasoning"}` object.
pub fn scoring_prompt(claim_text: &str, facts: &[Fact]) -> String {
    let fact_lines: Vec<String> = facts
        .iter()
        .map(|f| format!("- {} {} {}", f.subject, f.predicate, f.object))
        .collect();

    format!(
        r#"Given the claim: "{}"
And the following facts from DKG:
{}

Score this claim from 0-100 based on factual accuracy.
Return ONLY a JSON object: {{"score": number, "reasoning": "brief explanation"}}"#,
        claim_text,
        fact_lines.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(s: &str, p: &str, o: &str) -> Fact {
        Fact {
            subject: s.to_string(),
            predicate: p.to_string(),
            object: o.to_string(),
            source: "test".to_string(),
            timestamp: None,
        }
    }

    #[test]
    fn test_extraction_prompt_includes_text() {
        let prompt = extraction_prompt("Bitcoin remains on proof-of-work.");
        assert!(prompt.contains("Bitcoin remains on proof-of-work."));
        assert!(prompt.contains("JSON array"));
        assert!(prompt.contains("Ignore opinions"));
    }

    #[test]
    fn test_scoring_prompt_renders_fact_lines() {
        let facts = vec![
            fact("dkg:asset:moon", "schema:about", "moon landing"),
            fact("dkg:knowledge", "schema:relatedTo", "moon, landing"),
        ];

        let prompt = scoring_prompt("The moon landing happened in 1969.", &facts);
        assert!(prompt.contains("The moon landing happened in 1969."));
        assert!(prompt.contains("- dkg:asset:moon schema:about moon landing"));
        assert!(prompt.contains("- dkg:knowledge schema:relatedTo moon, landing"));
        assert!(prompt.contains("\"score\": number"));
    }
}
