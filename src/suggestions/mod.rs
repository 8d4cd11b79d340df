//! Drafting help from a suggestion provider
//!
//! The engine only consumes structured suggestions:
//! 1. build a [`SuggestionRequest`] from the active analysis
//! 2. hand it to a [`SuggestionProvider`]
//! 3. pull the JSON array out of the reply
//! 4. apply what the user accepts through the ordinary repository calls
//!
//! Provider and parse failures are logged and come back as an empty list.
//! Applying skips entries that name unknown labels or carry bad codes.

mod errors;
mod parse;
mod request;

pub use errors::{SuggestionError, SuggestionResult};
pub use parse::{
    extract_json_array, parse_suggestions, SuggestedEvidence, SuggestedHypothesis,
    SuggestedMilestone, SuggestedRating,
};
pub use request::{ItemSummary, SuggestionKind, SuggestionProvider, SuggestionRequest};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::model::{
    Evidence, EvidenceId, Hypothesis, HypothesisId, Milestone, NewEvidence, Rating,
};
use crate::observability::{log_event_with_fields, Event};
use crate::repository::Workspace;

/// Ask the provider and parse its reply; empty on any failure
pub fn fetch_suggestions<T: DeserializeOwned>(
    provider: &dyn SuggestionProvider,
    request: &SuggestionRequest,
) -> Vec<T> {
    let result = provider
        .complete(request)
        .and_then(|text| parse_suggestions(&text));
    match result {
        Ok(items) => items,
        Err(e) => {
            log_event_with_fields(
                Event::SuggestionsUnavailable,
                &[
                    ("code", e.code()),
                    ("error", &e.to_string()),
                    ("kind", request.kind.as_str()),
                ],
            );
            Vec::new()
        }
    }
}

fn log_applied(kind: SuggestionKind, count: usize) {
    log_event_with_fields(
        Event::SuggestionsApplied,
        &[("count", &count.to_string()), ("kind", kind.as_str())],
    );
}

impl Workspace {
    pub fn suggest_hypotheses(&self, provider: &dyn SuggestionProvider) -> Vec<SuggestedHypothesis> {
        match self.active_analysis() {
            Some(analysis) => fetch_suggestions(
                provider,
                &SuggestionRequest::for_analysis(analysis, SuggestionKind::Hypotheses),
            ),
            None => Vec::new(),
        }
    }

    pub fn suggest_evidence(&self, provider: &dyn SuggestionProvider) -> Vec<SuggestedEvidence> {
        match self.active_analysis() {
            Some(analysis) => fetch_suggestions(
                provider,
                &SuggestionRequest::for_analysis(analysis, SuggestionKind::Evidence),
            ),
            None => Vec::new(),
        }
    }

    /// Ratings of one evidence item against the current hypotheses
    pub fn suggest_ratings(
        &self,
        provider: &dyn SuggestionProvider,
        evidence_id: EvidenceId,
    ) -> Vec<SuggestedRating> {
        let Some(analysis) = self.active_analysis() else {
            return Vec::new();
        };
        let Some(evidence) = analysis.evidence_item(evidence_id) else {
            return Vec::new();
        };
        let request = SuggestionRequest::for_analysis(analysis, SuggestionKind::Ratings)
            .with_target_evidence(evidence);
        fetch_suggestions(provider, &request)
    }

    pub fn suggest_milestones(
        &self,
        provider: &dyn SuggestionProvider,
        hypothesis_id: HypothesisId,
    ) -> Vec<SuggestedMilestone> {
        let Some(analysis) = self.active_analysis() else {
            return Vec::new();
        };
        let Some(hypothesis) = analysis.hypothesis(hypothesis_id) else {
            return Vec::new();
        };
        let request = SuggestionRequest::for_analysis(analysis, SuggestionKind::Milestones)
            .with_target_hypothesis(hypothesis);
        fetch_suggestions(provider, &request)
    }

    /// Add each suggested hypothesis. Blank descriptions are skipped.
    pub fn apply_suggested_hypotheses(
        &mut self,
        suggestions: &[SuggestedHypothesis],
    ) -> Vec<Hypothesis> {
        let mut created = Vec::new();
        for suggestion in suggestions {
            let description = suggestion.description().trim();
            if description.is_empty() {
                continue;
            }
            if let Some(hypothesis) = self.add_hypothesis(description) {
                created.push(hypothesis);
            }
        }
        log_applied(SuggestionKind::Hypotheses, created.len());
        created
    }

    /// Add each suggested evidence item. Unknown kinds and reliabilities
    /// fall back to the defaults.
    pub fn apply_suggested_evidence(&mut self, suggestions: &[SuggestedEvidence]) -> Vec<Evidence> {
        let mut created = Vec::new();
        for suggestion in suggestions {
            let description = suggestion.description.trim();
            if description.is_empty() {
                continue;
            }
            let mut new = NewEvidence::new(description);
            if let Some(kind) = suggestion.kind.as_deref().and_then(|k| k.parse().ok()) {
                new = new.with_kind(kind);
            }
            if let Some(reliability) = suggestion
                .reliability
                .as_deref()
                .and_then(|r| r.parse().ok())
            {
                new = new.with_reliability(reliability);
            }
            if let Some(source) = suggestion.source.as_deref().filter(|s| !s.trim().is_empty()) {
                new = new.with_source(source);
            }
            if let Some(evidence) = self.add_evidence(new) {
                created.push(evidence);
            }
        }
        log_applied(SuggestionKind::Evidence, created.len());
        created
    }

    /// Rate `evidence_id` against each named hypothesis. The explanation,
    /// when present, becomes the cell note. Returns how many were applied.
    pub fn apply_suggested_ratings(
        &mut self,
        evidence_id: EvidenceId,
        suggestions: &[SuggestedRating],
    ) -> usize {
        if self.get_evidence(evidence_id).is_none() {
            return 0;
        }
        let mut applied = 0;
        for suggestion in suggestions {
            let Some(hypothesis_id) = self
                .active_analysis()
                .and_then(|a| a.hypothesis_by_label(suggestion.hypothesis_label.trim()))
                .map(|h| h.id)
            else {
                continue;
            };
            let Ok(rating) = suggestion.rating.parse::<Rating>() else {
                continue;
            };
            if !rating.is_rated() {
                continue;
            }
            if !self.set_rating(evidence_id, hypothesis_id, rating) {
                continue;
            }
            if let Some(explanation) = suggestion
                .explanation
                .as_deref()
                .filter(|e| !e.trim().is_empty())
            {
                self.set_rating_notes(evidence_id, hypothesis_id, Some(explanation.to_string()));
            }
            applied += 1;
        }
        log_applied(SuggestionKind::Ratings, applied);
        applied
    }

    /// Add each suggested milestone to `hypothesis_id`
    pub fn apply_suggested_milestones(
        &mut self,
        hypothesis_id: HypothesisId,
        suggestions: &[SuggestedMilestone],
    ) -> Vec<Milestone> {
        let mut created = Vec::new();
        for suggestion in suggestions {
            let description = suggestion.description.trim();
            if description.is_empty() {
                continue;
            }
            let expected_by = suggestion
                .expected_by
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok());
            if let Some(milestone) = self.add_milestone(hypothesis_id, description, expected_by) {
                created.push(milestone);
            }
        }
        log_applied(SuggestionKind::Milestones, created.len());
        created
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EvidenceKind, Reliability};

    /// Replays a canned reply
    struct CannedProvider(SuggestionResult<String>);

    impl SuggestionProvider for CannedProvider {
        fn complete(&self, _request: &SuggestionRequest) -> SuggestionResult<String> {
            self.0.clone()
        }
    }

    fn workspace() -> Workspace {
        let mut ws = Workspace::new();
        ws.create_analysis("Leak", "Who leaked the roadmap?", None);
        ws
    }

    #[test]
    fn test_unavailable_provider_yields_nothing() {
        let ws = workspace();
        let provider = CannedProvider(Err(SuggestionError::Unavailable("timeout".into())));
        assert!(ws.suggest_hypotheses(&provider).is_empty());
    }

    #[test]
    fn test_suggest_and_apply_hypotheses() {
        let mut ws = workspace();
        ws.add_hypothesis("Insider").unwrap();
        let provider = CannedProvider(Ok(
            "Consider these:\n[\"Contractor\", \"  \", {\"description\": \"Competitor\"}]".into(),
        ));

        let suggestions = ws.suggest_hypotheses(&provider);
        assert_eq!(suggestions.len(), 3);

        let created = ws.apply_suggested_hypotheses(&suggestions);
        let labels: Vec<_> = created.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, ["H2", "H3"]);
    }

    #[test]
    fn test_apply_evidence_parses_kind_and_reliability() {
        let mut ws = workspace();
        let suggestions = vec![
            SuggestedEvidence {
                description: "Badge log".into(),
                kind: Some("Document".into()),
                reliability: Some("HIGH".into()),
                source: Some("facilities".into()),
            },
            SuggestedEvidence {
                description: "Rumour".into(),
                kind: Some("gossip".into()),
                reliability: None,
                source: None,
            },
        ];

        let created = ws.apply_suggested_evidence(&suggestions);
        assert_eq!(created[0].kind, EvidenceKind::Document);
        assert_eq!(created[0].reliability, Reliability::High);
        assert_eq!(created[0].source.as_deref(), Some("facilities"));
        assert_eq!(created[1].kind, EvidenceKind::Fact);
        assert_eq!(created[1].reliability, Reliability::Medium);
    }

    #[test]
    fn test_apply_ratings_skips_unknown_labels_and_codes() {
        let mut ws = workspace();
        let h1 = ws.add_hypothesis("Insider").unwrap();
        let h2 = ws.add_hypothesis("Contractor").unwrap();
        let e1 = ws.add_evidence(NewEvidence::new("Badge log")).unwrap();

        let provider = CannedProvider(Ok(r#"[
            {"hypothesis_label": "H1", "rating": "II", "explanation": "was abroad"},
            {"hypothesis_label": "h2", "rating": "C"},
            {"hypothesis_label": "H2", "rating": "N/A"},
            {"hypothesis_label": "H9", "rating": "CC"},
            {"hypothesis_label": "H1", "rating": "maybe"}
        ]"#
        .into()));

        let suggestions = ws.suggest_ratings(&provider, e1.id);
        assert_eq!(ws.apply_suggested_ratings(e1.id, &suggestions), 2);

        assert_eq!(ws.get_rating(e1.id, h1.id), Rating::VeryInconsistent);
        assert_eq!(ws.get_rating(e1.id, h2.id), Rating::Consistent);
        let cell = ws.active_analysis().unwrap().cell(e1.id, h1.id).unwrap();
        assert_eq!(cell.notes.as_deref(), Some("was abroad"));
        assert_eq!(ws.ratings().len(), 2);
    }

    #[test]
    fn test_apply_milestones_to_missing_hypothesis() {
        let mut ws = workspace();
        let h = ws.add_hypothesis("Insider").unwrap();
        let suggestions = vec![SuggestedMilestone {
            description: "Second leak from same team".into(),
            expected_by: Some("2026-12-01".into()),
        }];

        let created = ws.apply_suggested_milestones(h.id, &suggestions);
        assert_eq!(created[0].expected_by, NaiveDate::from_ymd_opt(2026, 12, 1));

        assert!(ws
            .apply_suggested_milestones(uuid::Uuid::new_v4(), &suggestions)
            .is_empty());
    }
}
