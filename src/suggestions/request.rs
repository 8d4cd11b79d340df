//! Suggestion requests and the provider seam

use serde::Serialize;

use crate::model::{Analysis, Evidence, Hypothesis};

use super::errors::SuggestionResult;

/// What the provider is asked to draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Hypotheses,
    Evidence,
    /// Ratings of one evidence item against every hypothesis
    Ratings,
    /// Future indicators for one hypothesis
    Milestones,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Hypotheses => "hypotheses",
            SuggestionKind::Evidence => "evidence",
            SuggestionKind::Ratings => "ratings",
            SuggestionKind::Milestones => "milestones",
        }
    }
}

/// Label and description of an existing item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSummary {
    pub label: String,
    pub description: String,
}

impl From<&Hypothesis> for ItemSummary {
    fn from(h: &Hypothesis) -> Self {
        Self {
            label: h.label.clone(),
            description: h.description.clone(),
        }
    }
}

impl From<&Evidence> for ItemSummary {
    fn from(e: &Evidence) -> Self {
        Self {
            label: e.label.clone(),
            description: e.description.clone(),
        }
    }
}

/// Everything a provider gets to see
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionRequest {
    pub kind: SuggestionKind,
    pub focus_question: String,
    pub hypotheses: Vec<ItemSummary>,
    pub evidence: Vec<ItemSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_evidence: Option<ItemSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_hypothesis: Option<ItemSummary>,
}

impl SuggestionRequest {
    pub fn for_analysis(analysis: &Analysis, kind: SuggestionKind) -> Self {
        Self {
            kind,
            focus_question: analysis.focus_question.clone(),
            hypotheses: analysis.hypotheses.iter().map(ItemSummary::from).collect(),
            evidence: analysis.evidence.iter().map(ItemSummary::from).collect(),
            target_evidence: None,
            target_hypothesis: None,
        }
    }

    pub fn with_target_evidence(mut self, evidence: &Evidence) -> Self {
        self.target_evidence = Some(evidence.into());
        self
    }

    pub fn with_target_hypothesis(mut self, hypothesis: &Hypothesis) -> Self {
        self.target_hypothesis = Some(hypothesis.into());
        self
    }
}

/// Source of drafted suggestions, typically a language model client.
///
/// Implementations return the provider's raw text; the engine extracts the
/// JSON array from it.
pub trait SuggestionProvider {
    fn complete(&self, request: &SuggestionRequest) -> SuggestionResult<String>;
}
