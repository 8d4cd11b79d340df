//! Rating matrix cells on the active analysis
//!
//! `set_rating` is an upsert: an existing cell for the pair is updated in
//! place (its note survives), otherwise a new cell is appended. There is
//! never more than one cell per pair.
//!
//! Single-cell mutators only touch pairs whose evidence and hypothesis both
//! exist in the active analysis. A note never creates a cell.

use crate::model::{EvidenceId, HypothesisId, MatrixRating, Rating};
use crate::observability::{log_event_with_fields, Event};

use super::workspace::Workspace;

impl Workspace {
    /// Set the rating for a pair. Returns false when nothing is active or
    /// either id is unknown.
    pub fn set_rating(
        &mut self,
        evidence_id: EvidenceId,
        hypothesis_id: HypothesisId,
        rating: Rating,
    ) -> bool {
        let applied = self
            .mutate_active(|analysis| {
                analysis.evidence_item(evidence_id)?;
                analysis.hypothesis(hypothesis_id)?;
                match analysis
                    .ratings
                    .iter_mut()
                    .find(|r| r.is_for(evidence_id, hypothesis_id))
                {
                    Some(cell) => cell.rating = rating,
                    None => analysis
                        .ratings
                        .push(MatrixRating::new(evidence_id, hypothesis_id, rating)),
                }
                Some(())
            })
            .is_some();
        if applied {
            log_event_with_fields(
                Event::RatingSet,
                &[
                    ("evidence_id", &evidence_id.to_string()),
                    ("hypothesis_id", &hypothesis_id.to_string()),
                    ("rating", rating.code()),
                ],
            );
        }
        applied
    }

    /// Rating for a pair; `Unrated` when the cell is empty or nothing is active
    pub fn get_rating(&self, evidence_id: EvidenceId, hypothesis_id: HypothesisId) -> Rating {
        self.active_analysis()
            .map(|a| a.rating(evidence_id, hypothesis_id))
            .unwrap_or(Rating::Unrated)
    }

    /// Attach a note to an existing cell. Returns false when the pair has
    /// no cell yet.
    pub fn set_rating_notes(
        &mut self,
        evidence_id: EvidenceId,
        hypothesis_id: HypothesisId,
        notes: Option<String>,
    ) -> bool {
        self.mutate_active(|analysis| {
            let cell = analysis
                .ratings
                .iter_mut()
                .find(|r| r.is_for(evidence_id, hypothesis_id))?;
            cell.notes = notes;
            Some(())
        })
        .is_some()
    }

    /// All cells of the active analysis
    pub fn ratings(&self) -> &[MatrixRating] {
        self.active_analysis()
            .map(|a| a.ratings.as_slice())
            .unwrap_or(&[])
    }

    /// Replace the matrix wholesale. Later duplicates of a pair win.
    pub fn set_ratings(&mut self, ratings: Vec<MatrixRating>) -> bool {
        let mut deduped: Vec<MatrixRating> = Vec::with_capacity(ratings.len());
        for cell in ratings {
            match deduped
                .iter_mut()
                .find(|r| r.is_for(cell.evidence_id, cell.hypothesis_id))
            {
                Some(existing) => *existing = cell,
                None => deduped.push(cell),
            }
        }
        let count = deduped.len();
        let replaced = self
            .mutate_active(|analysis| {
                analysis.ratings = deduped;
                Some(())
            })
            .is_some();
        if replaced {
            log_event_with_fields(
                Event::CollectionReplaced,
                &[("collection", "ratings"), ("count", &count.to_string())],
            );
        }
        replaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewEvidence;
    use uuid::Uuid;

    fn workspace() -> Workspace {
        let mut ws = Workspace::new();
        ws.create_analysis("Outage", "Why did the link drop?", None);
        ws
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut ws = workspace();
        let h = ws.add_hypothesis("a").unwrap();
        let e = ws.add_evidence(NewEvidence::new("x")).unwrap();

        ws.set_rating(e.id, h.id, Rating::Inconsistent);
        ws.set_rating(e.id, h.id, Rating::Inconsistent);

        assert_eq!(ws.ratings().len(), 1);
        assert_eq!(ws.get_rating(e.id, h.id), Rating::Inconsistent);
    }

    #[test]
    fn test_upsert_preserves_note() {
        let mut ws = workspace();
        let h = ws.add_hypothesis("a").unwrap();
        let e = ws.add_evidence(NewEvidence::new("x")).unwrap();

        ws.set_rating(e.id, h.id, Rating::Neutral);
        assert!(ws.set_rating_notes(e.id, h.id, Some("source unsure".into())));

        ws.set_rating(e.id, h.id, Rating::Consistent);
        let cell = &ws.ratings()[0];
        assert_eq!(cell.rating, Rating::Consistent);
        assert_eq!(cell.notes.as_deref(), Some("source unsure"));
    }

    #[test]
    fn test_unknown_ids_are_rejected() {
        let mut ws = workspace();
        let h = ws.add_hypothesis("a").unwrap();
        let e = ws.add_evidence(NewEvidence::new("x")).unwrap();
        let before = ws.active_analysis().unwrap().clone();

        assert!(!ws.set_rating(e.id, Uuid::new_v4(), Rating::Inconsistent));
        assert!(!ws.set_rating(Uuid::new_v4(), h.id, Rating::Inconsistent));
        assert!(!ws.set_rating(Uuid::new_v4(), Uuid::new_v4(), Rating::Consistent));
        assert_eq!(ws.active_analysis().unwrap(), &before);
    }

    #[test]
    fn test_note_without_cell_is_noop() {
        let mut ws = workspace();
        let h = ws.add_hypothesis("a").unwrap();
        let e = ws.add_evidence(NewEvidence::new("x")).unwrap();
        let before = ws.active_analysis().unwrap().clone();

        assert!(!ws.set_rating_notes(e.id, h.id, Some("check later".into())));
        assert!(ws.ratings().is_empty());
        assert_eq!(ws.active_analysis().unwrap(), &before);
    }

    #[test]
    fn test_missing_cell_reads_unrated() {
        let ws = workspace();
        assert_eq!(ws.get_rating(Uuid::new_v4(), Uuid::new_v4()), Rating::Unrated);
        assert_eq!(Workspace::new().get_rating(Uuid::new_v4(), Uuid::new_v4()), Rating::Unrated);
    }

    #[test]
    fn test_set_ratings_dedupes_pairs() {
        let mut ws = workspace();
        let (e, h) = (Uuid::new_v4(), Uuid::new_v4());
        ws.set_ratings(vec![
            MatrixRating::new(e, h, Rating::Consistent),
            MatrixRating::new(e, h, Rating::VeryInconsistent),
        ]);
        assert_eq!(ws.ratings().len(), 1);
        assert_eq!(ws.get_rating(e, h), Rating::VeryInconsistent);
    }
}
