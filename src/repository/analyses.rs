//! Analysis lifecycle: create, select, update, delete, duplicate

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::model::{Analysis, AnalysisId, AnalysisStatus, AnalysisSummary, AnalysisUpdate};
use crate::observability::{log_event_with_fields, Event};

use super::workspace::Workspace;

impl Workspace {
    /// Create an empty analysis and make it the active one
    pub fn create_analysis(
        &mut self,
        title: impl Into<String>,
        focus_question: impl Into<String>,
        description: Option<String>,
    ) -> AnalysisId {
        let analysis = Analysis::new(title, focus_question, description);
        let id = analysis.id;
        log_event_with_fields(
            Event::AnalysisCreated,
            &[("analysis_id", &id.to_string()), ("title", &analysis.title)],
        );
        self.analyses.push(analysis);
        self.active_analysis_id = Some(id);
        id
    }

    /// Make `id` the active analysis. Returns false if it does not exist.
    pub fn select_analysis(&mut self, id: AnalysisId) -> bool {
        if self.analysis(id).is_none() {
            return false;
        }
        self.active_analysis_id = Some(id);
        log_event_with_fields(Event::AnalysisSelected, &[("analysis_id", &id.to_string())]);
        true
    }

    pub fn clear_selection(&mut self) {
        self.active_analysis_id = None;
    }

    pub fn list_analyses(&self) -> Vec<AnalysisSummary> {
        self.analyses.iter().map(AnalysisSummary::from).collect()
    }

    /// Update header fields of the active analysis
    pub fn update_analysis(&mut self, update: AnalysisUpdate) -> bool {
        if update.is_empty() {
            return false;
        }
        let applied = self.mutate_active(|analysis| {
            update.apply(analysis);
            Some(analysis.id)
        });
        if let Some(id) = applied {
            log_event_with_fields(Event::AnalysisUpdated, &[("analysis_id", &id.to_string())]);
        }
        applied.is_some()
    }

    pub fn set_status(&mut self, status: AnalysisStatus) -> bool {
        self.update_analysis(AnalysisUpdate {
            status: Some(status),
            ..AnalysisUpdate::default()
        })
    }

    pub fn set_sensitivity_notes(&mut self, notes: impl Into<String>) -> bool {
        let notes = notes.into();
        self.mutate_active(|analysis| {
            analysis.sensitivity_notes = notes;
            Some(())
        })
        .is_some()
    }

    /// Remove an analysis. Clears the active selection if it pointed here.
    pub fn delete_analysis(&mut self, id: AnalysisId) -> bool {
        let before = self.analyses.len();
        self.analyses.retain(|a| a.id != id);
        if self.analyses.len() == before {
            return false;
        }
        if self.active_analysis_id == Some(id) {
            self.active_analysis_id = None;
        }
        log_event_with_fields(Event::AnalysisDeleted, &[("analysis_id", &id.to_string())]);
        true
    }

    /// Copy an analysis under fresh ids. Labels, ratings, milestones and
    /// workflow progress are carried over; snapshots are not.
    pub fn duplicate_analysis(&mut self, id: AnalysisId) -> Option<AnalysisId> {
        let source = self.analysis(id)?;
        let copy = fresh_copy(source, format!("{} (copy)", source.title));
        let new_id = copy.id;
        log_event_with_fields(
            Event::AnalysisDuplicated,
            &[("analysis_id", &new_id.to_string()), ("source_id", &id.to_string())],
        );
        self.analyses.push(copy);
        Some(new_id)
    }
}

/// Deep copy with every entity re-keyed and references remapped
fn fresh_copy(source: &Analysis, title: String) -> Analysis {
    let now = Utc::now();
    let mut copy = source.clone();
    copy.id = Uuid::new_v4();
    copy.title = title;
    copy.snapshots.clear();
    copy.created_at = now;
    copy.updated_at = now;

    let mut hypothesis_ids = HashMap::new();
    for hypothesis in &mut copy.hypotheses {
        let fresh = Uuid::new_v4();
        hypothesis_ids.insert(hypothesis.id, fresh);
        hypothesis.id = fresh;
    }
    let mut evidence_ids = HashMap::new();
    for evidence in &mut copy.evidence {
        let fresh = Uuid::new_v4();
        evidence_ids.insert(evidence.id, fresh);
        evidence.id = fresh;
    }

    // Cells or milestones pointing at unknown ids cannot be remapped
    copy.ratings.retain_mut(|r| {
        match (evidence_ids.get(&r.evidence_id), hypothesis_ids.get(&r.hypothesis_id)) {
            (Some(e), Some(h)) => {
                r.evidence_id = *e;
                r.hypothesis_id = *h;
                true
            }
            _ => false,
        }
    });
    copy.milestones.retain_mut(|m| match hypothesis_ids.get(&m.hypothesis_id) {
        Some(h) => {
            m.hypothesis_id = *h;
            m.id = Uuid::new_v4();
            true
        }
        None => false,
    });

    copy
}
