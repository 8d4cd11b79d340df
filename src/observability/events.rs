//! Observable events in achdb
//!
//! Events are explicit and typed. Each maps to a stable upper-case name
//! used as the `event` field of a log line.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration and state
    /// Configuration loaded
    ConfigLoaded,
    /// Workspace state loaded from the store
    StateLoaded,
    /// Workspace state saved to the store
    StateSaved,
    /// The store could not be read or written
    PersistenceUnavailable,

    // Analyses
    AnalysisCreated,
    AnalysisSelected,
    AnalysisUpdated,
    AnalysisDeleted,
    AnalysisDuplicated,
    AnalysisImported,
    /// Import blob failed validation
    ImportRejected,

    // Matrix
    HypothesisAdded,
    HypothesisUpdated,
    /// Hypothesis removed together with its ratings and milestones
    HypothesisDeleted,
    EvidenceAdded,
    EvidenceUpdated,
    /// Evidence removed together with its ratings
    EvidenceDeleted,
    RatingSet,
    MilestoneAdded,
    MilestoneUpdated,
    MilestoneDeleted,
    /// A collection was replaced wholesale
    CollectionReplaced,

    // Snapshots
    SnapshotCreated,
    SnapshotRestored,

    // Workflow
    StepChanged,
    StepCompleted,

    // Collaborators
    /// Suggestion provider failed or returned nothing usable
    SuggestionsUnavailable,
    SuggestionsApplied,
    ReportExported,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StateLoaded => "STATE_LOADED",
            Event::StateSaved => "STATE_SAVED",
            Event::PersistenceUnavailable => "PERSISTENCE_UNAVAILABLE",

            Event::AnalysisCreated => "ANALYSIS_CREATED",
            Event::AnalysisSelected => "ANALYSIS_SELECTED",
            Event::AnalysisUpdated => "ANALYSIS_UPDATED",
            Event::AnalysisDeleted => "ANALYSIS_DELETED",
            Event::AnalysisDuplicated => "ANALYSIS_DUPLICATED",
            Event::AnalysisImported => "ANALYSIS_IMPORTED",
            Event::ImportRejected => "IMPORT_REJECTED",

            Event::HypothesisAdded => "HYPOTHESIS_ADDED",
            Event::HypothesisUpdated => "HYPOTHESIS_UPDATED",
            Event::HypothesisDeleted => "HYPOTHESIS_DELETED",
            Event::EvidenceAdded => "EVIDENCE_ADDED",
            Event::EvidenceUpdated => "EVIDENCE_UPDATED",
            Event::EvidenceDeleted => "EVIDENCE_DELETED",
            Event::RatingSet => "RATING_SET",
            Event::MilestoneAdded => "MILESTONE_ADDED",
            Event::MilestoneUpdated => "MILESTONE_UPDATED",
            Event::MilestoneDeleted => "MILESTONE_DELETED",
            Event::CollectionReplaced => "COLLECTION_REPLACED",

            Event::SnapshotCreated => "SNAPSHOT_CREATED",
            Event::SnapshotRestored => "SNAPSHOT_RESTORED",

            Event::StepChanged => "STEP_CHANGED",
            Event::StepCompleted => "STEP_COMPLETED",

            Event::SuggestionsUnavailable => "SUGGESTIONS_UNAVAILABLE",
            Event::SuggestionsApplied => "SUGGESTIONS_APPLIED",
            Event::ReportExported => "REPORT_EXPORTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::PersistenceUnavailable | Event::ImportRejected | Event::SuggestionsUnavailable => {
                Severity::Warn
            }
            Event::RatingSet | Event::StepChanged => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::ConfigLoaded,
            Event::StateLoaded,
            Event::StateSaved,
            Event::PersistenceUnavailable,
            Event::AnalysisCreated,
            Event::AnalysisSelected,
            Event::AnalysisUpdated,
            Event::AnalysisDeleted,
            Event::AnalysisDuplicated,
            Event::AnalysisImported,
            Event::ImportRejected,
            Event::HypothesisAdded,
            Event::HypothesisUpdated,
            Event::HypothesisDeleted,
            Event::EvidenceAdded,
            Event::EvidenceUpdated,
            Event::EvidenceDeleted,
            Event::RatingSet,
            Event::MilestoneAdded,
            Event::MilestoneUpdated,
            Event::MilestoneDeleted,
            Event::CollectionReplaced,
            Event::SnapshotCreated,
            Event::SnapshotRestored,
            Event::StepChanged,
            Event::StepCompleted,
            Event::SuggestionsUnavailable,
            Event::SuggestionsApplied,
            Event::ReportExported,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_collaborator_failures_are_warnings() {
        assert_eq!(Event::PersistenceUnavailable.severity(), Severity::Warn);
        assert_eq!(Event::SuggestionsUnavailable.severity(), Severity::Warn);
        assert_eq!(Event::ImportRejected.severity(), Severity::Warn);
        assert_eq!(Event::SnapshotCreated.severity(), Severity::Info);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::HypothesisDeleted), "HYPOTHESIS_DELETED");
    }
}
