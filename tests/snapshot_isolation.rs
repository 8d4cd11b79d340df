//! Snapshot isolation tests
//!
//! A snapshot is a deep copy: nothing done to the analysis afterwards may
//! reach it.

use achdb::model::{EvidenceUpdate, HypothesisUpdate, NewEvidence, Rating};
use achdb::repository::Workspace;

fn workspace() -> Workspace {
    let mut ws = Workspace::new();
    ws.create_analysis("Outage", "Why did the link drop?", None);
    ws
}

/// Test: edits, deletes and rating changes after capture leave the snapshot
/// unchanged.
#[test]
fn test_snapshot_survives_later_edits() {
    let mut ws = workspace();
    let h1 = ws.add_hypothesis("fibre cut").unwrap();
    let e1 = ws.add_evidence(NewEvidence::new("carrier ticket")).unwrap();
    ws.set_rating(e1.id, h1.id, Rating::Consistent);
    ws.add_milestone(h1.id, "repair crew dispatched", None).unwrap();
    ws.set_sensitivity_notes("depends on E1");

    let snapshot = ws.create_snapshot("before review", None).unwrap();
    let captured = snapshot.data.clone();

    ws.update_hypothesis(
        h1.id,
        HypothesisUpdate {
            description: Some("backhoe".into()),
            ..Default::default()
        },
    );
    ws.update_evidence(
        e1.id,
        EvidenceUpdate {
            description: Some("edited".into()),
            ..Default::default()
        },
    );
    ws.set_rating(e1.id, h1.id, Rating::VeryInconsistent);
    ws.set_sensitivity_notes("rewritten");
    ws.delete_hypothesis(h1.id);

    let stored = ws.get_snapshot(snapshot.id).unwrap();
    assert_eq!(stored.data, captured);
    assert_eq!(stored.data.hypotheses[0].description, "fibre cut");
    assert_eq!(stored.data.ratings[0].rating, Rating::Consistent);
    assert_eq!(stored.data.milestones.len(), 1);
    assert_eq!(stored.data.sensitivity_notes, "depends on E1");
}

/// Test: comparing against the current state reports what changed.
#[test]
fn test_compare_reports_changes() {
    let mut ws = workspace();
    let h1 = ws.add_hypothesis("fibre cut").unwrap();
    let e1 = ws.add_evidence(NewEvidence::new("carrier ticket")).unwrap();
    ws.set_rating(e1.id, h1.id, Rating::Consistent);
    let snapshot = ws.create_snapshot("v1", None).unwrap();

    ws.add_hypothesis("router bug").unwrap();
    ws.set_rating(e1.id, h1.id, Rating::Inconsistent);

    let diff = ws.compare_snapshot(snapshot.id).unwrap();
    assert_eq!(diff.hypotheses_added, ["H2"]);
    assert!(diff.hypotheses_removed.is_empty());
    assert_eq!(diff.rating_changes.len(), 1);
    assert_eq!(diff.rating_changes[0].before, Rating::Consistent);
    assert_eq!(diff.rating_changes[0].after, Rating::Inconsistent);
}

/// Test: a fresh snapshot compares equal to the current state.
#[test]
fn test_compare_unchanged() {
    let mut ws = workspace();
    ws.add_hypothesis("fibre cut").unwrap();
    let snapshot = ws.create_snapshot("v1", None).unwrap();
    assert!(ws.compare_snapshot(snapshot.id).unwrap().is_empty());
}

/// Test: duplicating an analysis does not carry its snapshots.
#[test]
fn test_duplicate_drops_snapshots() {
    let mut ws = workspace();
    ws.add_hypothesis("fibre cut").unwrap();
    ws.create_snapshot("v1", None).unwrap();
    let original = ws.active_analysis_id().unwrap();

    let copy = ws.duplicate_analysis(original).unwrap();
    assert!(ws.analysis(copy).unwrap().snapshots.is_empty());
    assert_eq!(ws.analysis(original).unwrap().snapshots.len(), 1);
}
