//! Evidence CRUD on the active analysis

use crate::labels::{self, LabelKind};
use crate::model::{Evidence, EvidenceId, EvidenceUpdate, NewEvidence};
use crate::observability::{log_event_with_fields, Event};

use super::hypotheses::permutation;
use super::workspace::Workspace;

impl Workspace {
    /// Add an evidence item with the next free label
    pub fn add_evidence(&mut self, new: NewEvidence) -> Option<Evidence> {
        let created = self.mutate_active(|analysis| {
            let number = labels::next_label_number(
                LabelKind::Evidence,
                analysis.evidence.iter().map(|e| e.label.as_str()),
                analysis.evidence_label_high,
            );
            let evidence = Evidence::from_new(
                format!("{}{}", LabelKind::Evidence.prefix(), number),
                analysis.evidence.len(),
                new,
            );
            analysis.evidence_label_high = number;
            analysis.evidence.push(evidence.clone());
            Some(evidence)
        })?;

        log_event_with_fields(
            Event::EvidenceAdded,
            &[
                ("evidence_id", &created.id.to_string()),
                ("kind", created.kind.as_str()),
                ("label", &created.label),
            ],
        );
        Some(created)
    }

    pub fn evidence(&self) -> &[Evidence] {
        self.active_analysis()
            .map(|a| a.evidence.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_evidence(&self, id: EvidenceId) -> Option<&Evidence> {
        self.active_analysis()?.evidence_item(id)
    }

    pub fn update_evidence(&mut self, id: EvidenceId, update: EvidenceUpdate) -> bool {
        if update.is_empty() {
            return false;
        }
        let updated = self
            .mutate_active(|analysis| {
                let evidence = analysis.evidence.iter_mut().find(|e| e.id == id)?;
                update.apply(evidence);
                Some(())
            })
            .is_some();
        if updated {
            log_event_with_fields(Event::EvidenceUpdated, &[("evidence_id", &id.to_string())]);
        }
        updated
    }

    /// Delete an evidence item together with every rating that references it
    pub fn delete_evidence(&mut self, id: EvidenceId) -> bool {
        let removed = self.mutate_active(|analysis| {
            let index = analysis.evidence.iter().position(|e| e.id == id)?;
            let evidence = analysis.evidence.remove(index);
            let before = analysis.ratings.len();
            analysis.ratings.retain(|r| r.evidence_id != id);
            Some((evidence.label, before - analysis.ratings.len()))
        });

        match removed {
            Some((label, ratings)) => {
                log_event_with_fields(
                    Event::EvidenceDeleted,
                    &[("label", &label), ("ratings_removed", &ratings.to_string())],
                );
                true
            }
            None => false,
        }
    }

    /// Put evidence in the given order. `ids` must name every item exactly once.
    pub fn reorder_evidence(&mut self, ids: &[EvidenceId]) -> bool {
        self.mutate_active(|analysis| {
            let positions = permutation(ids, analysis.evidence.iter().map(|e| e.id))?;
            analysis.evidence.sort_by_key(|e| positions.get(&e.id).copied());
            for (index, evidence) in analysis.evidence.iter_mut().enumerate() {
                evidence.order = index;
            }
            Some(())
        })
        .is_some()
    }

    /// Replace the evidence list wholesale
    pub fn set_evidence(&mut self, evidence: Vec<Evidence>) -> bool {
        let count = evidence.len();
        let replaced = self
            .mutate_active(|analysis| {
                let highest = labels::highest_label_number(
                    LabelKind::Evidence,
                    evidence.iter().map(|e| e.label.as_str()),
                );
                analysis.evidence_label_high = analysis.evidence_label_high.max(highest);
                analysis.evidence = evidence;
                Some(())
            })
            .is_some();
        if replaced {
            log_event_with_fields(
                Event::CollectionReplaced,
                &[("collection", "evidence"), ("count", &count.to_string())],
            );
        }
        replaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EvidenceKind, Rating, Reliability};

    fn workspace() -> Workspace {
        let mut ws = Workspace::new();
        ws.create_analysis("Outage", "Why did the link drop?", None);
        ws
    }

    #[test]
    fn test_add_evidence_fields() {
        let mut ws = workspace();
        let e = ws
            .add_evidence(
                NewEvidence::new("carrier ticket")
                    .with_kind(EvidenceKind::Document)
                    .with_reliability(Reliability::High)
                    .with_source("NOC-4411"),
            )
            .unwrap();
        assert_eq!(e.label, "E1");
        assert_eq!(e.kind, EvidenceKind::Document);
        assert_eq!(e.source.as_deref(), Some("NOC-4411"));
    }

    #[test]
    fn test_delete_evidence_cascades_ratings() {
        let mut ws = workspace();
        let h = ws.add_hypothesis("fibre cut").unwrap();
        let e1 = ws.add_evidence(NewEvidence::new("a")).unwrap();
        let e2 = ws.add_evidence(NewEvidence::new("b")).unwrap();
        ws.set_rating(e1.id, h.id, Rating::VeryInconsistent);
        ws.set_rating(e2.id, h.id, Rating::Consistent);

        assert!(ws.delete_evidence(e1.id));
        let analysis = ws.active_analysis().unwrap();
        assert_eq!(analysis.ratings.len(), 1);
        assert_eq!(analysis.ratings[0].evidence_id, e2.id);
        assert!(!ws.delete_evidence(e1.id));
    }

    #[test]
    fn test_evidence_label_gap() {
        let mut ws = workspace();
        ws.add_evidence(NewEvidence::new("a")).unwrap();
        let e2 = ws.add_evidence(NewEvidence::new("b")).unwrap();
        ws.add_evidence(NewEvidence::new("c")).unwrap();
        ws.delete_evidence(e2.id);
        assert_eq!(ws.add_evidence(NewEvidence::new("d")).unwrap().label, "E4");
    }

    #[test]
    fn test_update_missing_evidence_is_noop() {
        let mut ws = workspace();
        let before = ws.active_analysis().unwrap().updated_at;
        let update = EvidenceUpdate {
            description: Some("x".into()),
            ..Default::default()
        };
        assert!(!ws.update_evidence(uuid::Uuid::new_v4(), update));
        assert_eq!(ws.active_analysis().unwrap().updated_at, before);
    }
}
