//! Comparison between two captured states
//!
//! Entities are matched by id. Labels are reported because ids mean
//! nothing to a reader.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Rating, SnapshotData};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub evidence_label: String,
    pub hypothesis_label: String,
    pub before: Rating,
    pub after: Rating,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDiff {
    pub hypotheses_added: Vec<String>,
    pub hypotheses_removed: Vec<String>,
    pub evidence_added: Vec<String>,
    pub evidence_removed: Vec<String>,
    pub rating_changes: Vec<RatingChange>,
    pub milestones_added: usize,
    pub milestones_removed: usize,
    pub sensitivity_notes_changed: bool,
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self == &SnapshotDiff::default()
    }
}

/// Differences going from `before` to `after`
pub fn diff(before: &SnapshotData, after: &SnapshotData) -> SnapshotDiff {
    let before_h: HashSet<Uuid> = before.hypotheses.iter().map(|h| h.id).collect();
    let after_h: HashSet<Uuid> = after.hypotheses.iter().map(|h| h.id).collect();
    let before_e: HashSet<Uuid> = before.evidence.iter().map(|e| e.id).collect();
    let after_e: HashSet<Uuid> = after.evidence.iter().map(|e| e.id).collect();

    let mut labels: HashMap<Uuid, &str> = HashMap::new();
    for h in before.hypotheses.iter().chain(&after.hypotheses) {
        labels.insert(h.id, &h.label);
    }
    for e in before.evidence.iter().chain(&after.evidence) {
        labels.insert(e.id, &e.label);
    }
    let label = |id: &Uuid| labels.get(id).map(|l| l.to_string()).unwrap_or_default();

    let cells = |data: &SnapshotData| -> HashMap<(Uuid, Uuid), Rating> {
        data.ratings
            .iter()
            .map(|r| ((r.evidence_id, r.hypothesis_id), r.rating))
            .collect()
    };
    let before_cells = cells(before);
    let after_cells = cells(after);

    // Walk pairs in a stable order: after's cells first, then cells only in before
    let mut pairs: Vec<(Uuid, Uuid)> = after
        .ratings
        .iter()
        .map(|r| (r.evidence_id, r.hypothesis_id))
        .collect();
    pairs.extend(
        before
            .ratings
            .iter()
            .map(|r| (r.evidence_id, r.hypothesis_id))
            .filter(|pair| !after_cells.contains_key(pair)),
    );

    let rating_changes = pairs
        .into_iter()
        .filter_map(|pair| {
            let was = before_cells.get(&pair).copied().unwrap_or_default();
            let now = after_cells.get(&pair).copied().unwrap_or_default();
            (was != now).then(|| RatingChange {
                evidence_label: label(&pair.0),
                hypothesis_label: label(&pair.1),
                before: was,
                after: now,
            })
        })
        .collect();

    let before_m: HashSet<Uuid> = before.milestones.iter().map(|m| m.id).collect();
    let after_m: HashSet<Uuid> = after.milestones.iter().map(|m| m.id).collect();

    SnapshotDiff {
        hypotheses_added: after
            .hypotheses
            .iter()
            .filter(|h| !before_h.contains(&h.id))
            .map(|h| h.label.clone())
            .collect(),
        hypotheses_removed: before
            .hypotheses
            .iter()
            .filter(|h| !after_h.contains(&h.id))
            .map(|h| h.label.clone())
            .collect(),
        evidence_added: after
            .evidence
            .iter()
            .filter(|e| !before_e.contains(&e.id))
            .map(|e| e.label.clone())
            .collect(),
        evidence_removed: before
            .evidence
            .iter()
            .filter(|e| !after_e.contains(&e.id))
            .map(|e| e.label.clone())
            .collect(),
        rating_changes,
        milestones_added: after_m.difference(&before_m).count(),
        milestones_removed: before_m.difference(&after_m).count(),
        sensitivity_notes_changed: before.sensitivity_notes != after.sensitivity_notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewEvidence;
    use crate::repository::Workspace;

    #[test]
    fn test_unchanged_state_has_empty_diff() {
        let mut ws = Workspace::new();
        ws.create_analysis("t", "q", None);
        ws.add_hypothesis("a").unwrap();
        let snapshot = ws.create_snapshot("v1", None).unwrap();
        assert!(ws.compare_snapshot(snapshot.id).unwrap().is_empty());
    }

    #[test]
    fn test_diff_reports_changes_by_label() {
        let mut ws = Workspace::new();
        ws.create_analysis("t", "q", None);
        let h1 = ws.add_hypothesis("a").unwrap();
        let h2 = ws.add_hypothesis("b").unwrap();
        let e1 = ws.add_evidence(NewEvidence::new("x")).unwrap();
        ws.set_rating(e1.id, h1.id, Rating::Consistent);
        ws.set_rating(e1.id, h2.id, Rating::Inconsistent);
        let snapshot = ws.create_snapshot("v1", None).unwrap();

        ws.delete_hypothesis(h2.id);
        ws.add_hypothesis("c").unwrap();
        ws.add_evidence(NewEvidence::new("y")).unwrap();
        ws.set_rating(e1.id, h1.id, Rating::VeryInconsistent);

        let d = ws.compare_snapshot(snapshot.id).unwrap();
        assert_eq!(d.hypotheses_added, ["H3"]);
        assert_eq!(d.hypotheses_removed, ["H2"]);
        assert_eq!(d.evidence_added, ["E2"]);
        assert!(d.evidence_removed.is_empty());

        assert_eq!(d.rating_changes.len(), 2);
        let changed = &d.rating_changes[0];
        assert_eq!(changed.evidence_label, "E1");
        assert_eq!(changed.hypothesis_label, "H1");
        assert_eq!(changed.before, Rating::Consistent);
        assert_eq!(changed.after, Rating::VeryInconsistent);
        let dropped = &d.rating_changes[1];
        assert_eq!(dropped.hypothesis_label, "H2");
        assert_eq!(dropped.after, Rating::Unrated);
    }
}
