//! # Analysis aggregate
//!
//! The aggregate root. Owns hypotheses, evidence, ratings, milestones and
//! snapshots. All mutation goes through the repository, which calls
//! [`Analysis::touch`] after every applied change.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::evidence::{Evidence, EvidenceId};
use super::hypothesis::{Hypothesis, HypothesisId};
use super::matrix::MatrixRating;
use super::milestone::Milestone;
use super::rating::Rating;
use super::snapshot::Snapshot;

/// Analysis identifier
pub type AnalysisId = Uuid;

/// First workflow step
pub const FIRST_STEP: u8 = 1;
/// Last workflow step
pub const LAST_STEP: u8 = 8;

/// Lifecycle status of an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    #[default]
    Draft,
    InProgress,
    Complete,
    Archived,
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Draft => "draft",
            AnalysisStatus::InProgress => "in_progress",
            AnalysisStatus::Complete => "complete",
            AnalysisStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnalysisStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "draft" => Ok(AnalysisStatus::Draft),
            "in_progress" => Ok(AnalysisStatus::InProgress),
            "complete" => Ok(AnalysisStatus::Complete),
            "archived" => Ok(AnalysisStatus::Archived),
            other => Err(format!("Unknown status: {}", other)),
        }
    }
}

fn default_step() -> u8 {
    FIRST_STEP
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub id: AnalysisId,
    pub title: String,
    pub focus_question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: AnalysisStatus,

    #[serde(default = "default_step")]
    pub current_step: u8,
    #[serde(default)]
    pub completed_steps: BTreeSet<u8>,

    #[serde(default)]
    pub sensitivity_notes: String,

    #[serde(default)]
    pub hypotheses: Vec<Hypothesis>,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
    #[serde(default)]
    pub ratings: Vec<MatrixRating>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,

    /// Highest hypothesis label number ever issued
    #[serde(default)]
    pub hypothesis_label_high: u32,
    /// Highest evidence label number ever issued
    #[serde(default)]
    pub evidence_label_high: u32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Analysis {
    /// Create an empty analysis at step 1
    pub fn new(
        title: impl Into<String>,
        focus_question: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            focus_question: focus_question.into(),
            description,
            status: AnalysisStatus::Draft,
            current_step: FIRST_STEP,
            completed_steps: BTreeSet::new(),
            sensitivity_notes: String::new(),
            hypotheses: Vec::new(),
            evidence: Vec::new(),
            ratings: Vec::new(),
            milestones: Vec::new(),
            snapshots: Vec::new(),
            hypothesis_label_high: 0,
            evidence_label_high: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Advance `updated_at`. Strictly increases even when the clock has not
    /// moved since the previous mutation.
    pub(crate) fn touch(&mut self) {
        let floor = self.updated_at + Duration::microseconds(1);
        self.updated_at = Utc::now().max(floor);
    }

    pub fn hypothesis(&self, id: HypothesisId) -> Option<&Hypothesis> {
        self.hypotheses.iter().find(|h| h.id == id)
    }

    pub fn evidence_item(&self, id: EvidenceId) -> Option<&Evidence> {
        self.evidence.iter().find(|e| e.id == id)
    }

    pub fn hypothesis_by_label(&self, label: &str) -> Option<&Hypothesis> {
        self.hypotheses
            .iter()
            .find(|h| h.label.eq_ignore_ascii_case(label))
    }

    pub fn evidence_by_label(&self, label: &str) -> Option<&Evidence> {
        self.evidence
            .iter()
            .find(|e| e.label.eq_ignore_ascii_case(label))
    }

    /// Rating for a pair, `Unrated` when the cell is empty
    pub fn rating(&self, evidence_id: EvidenceId, hypothesis_id: HypothesisId) -> Rating {
        self.cell(evidence_id, hypothesis_id)
            .map(|r| r.rating)
            .unwrap_or(Rating::Unrated)
    }

    pub fn cell(&self, evidence_id: EvidenceId, hypothesis_id: HypothesisId) -> Option<&MatrixRating> {
        self.ratings
            .iter()
            .find(|r| r.is_for(evidence_id, hypothesis_id))
    }
}

/// Partial update of the analysis header fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub focus_question: Option<String>,
    #[serde(default)]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<AnalysisStatus>,
}

impl AnalysisUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.focus_question.is_none()
            && self.description.is_none()
            && self.status.is_none()
    }

    pub(crate) fn apply(self, analysis: &mut Analysis) {
        if let Some(title) = self.title {
            analysis.title = title;
        }
        if let Some(question) = self.focus_question {
            analysis.focus_question = question;
        }
        if let Some(description) = self.description {
            analysis.description = description;
        }
        if let Some(status) = self.status {
            analysis.status = status;
        }
    }
}

/// Listing entry for an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub id: AnalysisId,
    pub title: String,
    pub focus_question: String,
    pub status: AnalysisStatus,
    pub current_step: u8,
    pub hypothesis_count: usize,
    pub evidence_count: usize,
    pub snapshot_count: usize,
    pub updated_at: DateTime<Utc>,
}

impl From<&Analysis> for AnalysisSummary {
    fn from(a: &Analysis) -> Self {
        Self {
            id: a.id,
            title: a.title.clone(),
            focus_question: a.focus_question.clone(),
            status: a.status,
            current_step: a.current_step,
            hypothesis_count: a.hypotheses.len(),
            evidence_count: a.evidence.len(),
            snapshot_count: a.snapshots.len(),
            updated_at: a.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_analysis_is_empty_at_step_one() {
        let a = Analysis::new("Outage", "Why did the link drop?", None);
        assert_eq!(a.current_step, FIRST_STEP);
        assert!(a.completed_steps.is_empty());
        assert!(a.hypotheses.is_empty());
        assert_eq!(a.status, AnalysisStatus::Draft);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn test_touch_strictly_advances() {
        let mut a = Analysis::new("t", "q", None);
        let mut previous = a.updated_at;
        for _ in 0..50 {
            a.touch();
            assert!(a.updated_at > previous);
            previous = a.updated_at;
        }
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&AnalysisStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!("in-progress".parse::<AnalysisStatus>().unwrap(), AnalysisStatus::InProgress);
    }

    #[test]
    fn test_missing_cell_is_unrated() {
        let a = Analysis::new("t", "q", None);
        assert_eq!(a.rating(Uuid::new_v4(), Uuid::new_v4()), Rating::Unrated);
    }
}
