//! # Snapshot records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::evidence::Evidence;
use super::hypothesis::Hypothesis;
use super::matrix::MatrixRating;
use super::milestone::Milestone;

/// Snapshot identifier
pub type SnapshotId = Uuid;

/// The captured state. Owned copies only, nothing is shared with the live
/// analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotData {
    pub hypotheses: Vec<Hypothesis>,
    pub evidence: Vec<Evidence>,
    pub ratings: Vec<MatrixRating>,
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub sensitivity_notes: String,
}

/// A labelled point-in-time copy of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: SnapshotId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub data: SnapshotData,
}

impl Snapshot {
    /// Read-only access to the captured state.
    pub fn data(&self) -> &SnapshotData {
        &self.data
    }
}
