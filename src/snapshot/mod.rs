//! Snapshot subsystem
//!
//! A snapshot is a labelled, point-in-time deep copy of an analysis'
//! hypotheses, evidence, ratings, milestones and sensitivity notes.
//!
//! # Guarantees
//!
//! - The copy owns its data; later edits to the analysis never reach it
//! - Snapshots are append-only and never pruned
//! - Restoring replaces all captured collections in one mutation and
//!   leaves the history as it is

mod diff;

pub use diff::{diff, RatingChange, SnapshotDiff};

use chrono::Utc;
use uuid::Uuid;

use crate::labels::{self, LabelKind};
use crate::model::{Analysis, Snapshot, SnapshotData, SnapshotId};
use crate::observability::{log_event_with_fields, Event};
use crate::repository::Workspace;

/// Captures and compares snapshots of a single analysis.
///
/// ```ignore
/// let snapshot = SnapshotManager::create_snapshot(&mut analysis, "before review", None);
/// let changes = SnapshotManager::compare_with_current(&analysis, &snapshot);
/// ```
pub struct SnapshotManager;

impl SnapshotManager {
    /// Owned copy of the mutable parts of an analysis
    pub fn capture(analysis: &Analysis) -> SnapshotData {
        SnapshotData {
            hypotheses: analysis.hypotheses.clone(),
            evidence: analysis.evidence.clone(),
            ratings: analysis.ratings.clone(),
            milestones: analysis.milestones.clone(),
            sensitivity_notes: analysis.sensitivity_notes.clone(),
        }
    }

    /// Capture the analysis and append the snapshot to its history.
    ///
    /// Returns a copy of the stored record.
    pub fn create_snapshot(
        analysis: &mut Analysis,
        label: impl Into<String>,
        description: Option<String>,
    ) -> Snapshot {
        let snapshot = Snapshot {
            id: Uuid::new_v4(),
            label: label.into(),
            description,
            created_at: Utc::now(),
            data: Self::capture(analysis),
        };
        analysis.snapshots.push(snapshot.clone());
        analysis.touch();

        log_event_with_fields(
            Event::SnapshotCreated,
            &[
                ("analysis_id", &analysis.id.to_string()),
                ("label", &snapshot.label),
                ("snapshot_id", &snapshot.id.to_string()),
            ],
        );
        snapshot
    }

    /// Put captured data back. Label high-water marks only move up.
    fn restore(analysis: &mut Analysis, data: SnapshotData) {
        let hypothesis_high = labels::highest_label_number(
            LabelKind::Hypothesis,
            data.hypotheses.iter().map(|h| h.label.as_str()),
        );
        let evidence_high = labels::highest_label_number(
            LabelKind::Evidence,
            data.evidence.iter().map(|e| e.label.as_str()),
        );
        analysis.hypothesis_label_high = analysis.hypothesis_label_high.max(hypothesis_high);
        analysis.evidence_label_high = analysis.evidence_label_high.max(evidence_high);

        analysis.hypotheses = data.hypotheses;
        analysis.evidence = data.evidence;
        analysis.ratings = data.ratings;
        analysis.milestones = data.milestones;
        analysis.sensitivity_notes = data.sensitivity_notes;
    }

    /// Differences from a snapshot to the analysis as it is now
    pub fn compare_with_current(analysis: &Analysis, snapshot: &Snapshot) -> SnapshotDiff {
        diff(&snapshot.data, &Self::capture(analysis))
    }
}

impl Workspace {
    /// Snapshot the active analysis
    pub fn create_snapshot(
        &mut self,
        label: impl Into<String>,
        description: Option<String>,
    ) -> Option<Snapshot> {
        let analysis = self.active_mut()?;
        Some(SnapshotManager::create_snapshot(analysis, label, description))
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        self.active_analysis()
            .map(|a| a.snapshots.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_snapshot(&self, id: SnapshotId) -> Option<&Snapshot> {
        self.snapshots().iter().find(|s| s.id == id)
    }

    /// Compare a snapshot of the active analysis with its current state
    pub fn compare_snapshot(&self, id: SnapshotId) -> Option<SnapshotDiff> {
        let analysis = self.active_analysis()?;
        let snapshot = analysis.snapshots.iter().find(|s| s.id == id)?;
        Some(SnapshotManager::compare_with_current(analysis, snapshot))
    }

    /// Overwrite the active analysis' collections with a snapshot's data.
    /// The snapshot history itself is left as it is.
    pub fn restore_snapshot(&mut self, id: SnapshotId) -> bool {
        let restored = self
            .mutate_active(|analysis| {
                let data = analysis
                    .snapshots
                    .iter()
                    .find(|s| s.id == id)?
                    .data
                    .clone();
                SnapshotManager::restore(analysis, data);
                Some(())
            })
            .is_some();
        if restored {
            log_event_with_fields(Event::SnapshotRestored, &[("snapshot_id", &id.to_string())]);
        }
        restored
    }
}
