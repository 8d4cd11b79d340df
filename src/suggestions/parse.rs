//! Tolerant parsing of provider text
//!
//! Providers tend to wrap the JSON in prose or code fences. The parser
//! takes the outermost `[...]` span and decodes that. Anything that does
//! not decode is a `Malformed` error; callers turn it into an empty list.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::errors::{SuggestionError, SuggestionResult};

/// A drafted hypothesis. Providers may send a bare string or an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuggestedHypothesis {
    Text(String),
    Object { description: String },
}

impl SuggestedHypothesis {
    pub fn description(&self) -> &str {
        match self {
            SuggestedHypothesis::Text(text) => text,
            SuggestedHypothesis::Object { description } => description,
        }
    }
}

/// A drafted evidence item. Kind and reliability stay text until applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedEvidence {
    pub description: String,
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub reliability: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// `(hypothesis label, rating code, explanation)` for one evidence item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedRating {
    #[serde(alias = "hypothesis", alias = "hypothesisLabel")]
    pub hypothesis_label: String,
    pub rating: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// A drafted future indicator for one hypothesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedMilestone {
    pub description: String,
    /// `YYYY-MM-DD`; ignored when it does not parse
    #[serde(default, alias = "expectedBy")]
    pub expected_by: Option<String>,
}

/// Outermost `[...]` in `text`
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

/// Decode the JSON array embedded in `text`
pub fn parse_suggestions<T: DeserializeOwned>(text: &str) -> SuggestionResult<Vec<T>> {
    let array = extract_json_array(text)
        .ok_or_else(|| SuggestionError::Malformed("No JSON array in response".into()))?;
    serde_json::from_str(array).map_err(|e| SuggestionError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ignores_surrounding_prose() {
        let text = "Here you go:\n```json\n[\"a\", \"b\"]\n```\nHope that helps.";
        assert_eq!(extract_json_array(text), Some("[\"a\", \"b\"]"));
        assert_eq!(extract_json_array("no list here"), None);
        assert_eq!(extract_json_array("] backwards ["), None);
    }

    #[test]
    fn test_hypotheses_accept_strings_and_objects() {
        let text = r#"[ "Insider leak", {"description": "Misconfigured bucket"} ]"#;
        let parsed: Vec<SuggestedHypothesis> = parse_suggestions(text).unwrap();
        let descriptions: Vec<_> = parsed.iter().map(|s| s.description()).collect();
        assert_eq!(descriptions, ["Insider leak", "Misconfigured bucket"]);
    }

    #[test]
    fn test_ratings_accept_field_aliases() {
        let text = r#"Ratings: [
            {"hypothesis": "H1", "rating": "II", "explanation": "contradicts"},
            {"hypothesisLabel": "H2", "rating": "cc"}
        ]"#;
        let parsed: Vec<SuggestedRating> = parse_suggestions(text).unwrap();
        assert_eq!(parsed[0].hypothesis_label, "H1");
        assert_eq!(parsed[1].rating, "cc");
        assert_eq!(parsed[1].explanation, None);
    }

    #[test]
    fn test_evidence_type_alias() {
        let text = r#"[{"description": "Access log", "type": "document", "reliability": "high"}]"#;
        let parsed: Vec<SuggestedEvidence> = parse_suggestions(text).unwrap();
        assert_eq!(parsed[0].kind.as_deref(), Some("document"));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let err = parse_suggestions::<SuggestedHypothesis>("[not json]").unwrap_err();
        assert_eq!(err.code(), "ACH_SUGGEST_MALFORMED");
        assert!(parse_suggestions::<SuggestedRating>("nothing").is_err());
    }
}
