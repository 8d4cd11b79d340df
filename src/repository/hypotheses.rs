//! Hypothesis CRUD on the active analysis

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::labels::{self, LabelKind};
use crate::model::{Hypothesis, HypothesisId, HypothesisUpdate};
use crate::observability::{log_event_with_fields, Event};

use super::workspace::Workspace;

impl Workspace {
    /// Add a hypothesis with the next free label and palette color
    pub fn add_hypothesis(&mut self, description: impl Into<String>) -> Option<Hypothesis> {
        let description = description.into();
        let created = self.mutate_active(|analysis| {
            let number = labels::next_label_number(
                LabelKind::Hypothesis,
                analysis.hypotheses.iter().map(|h| h.label.as_str()),
                analysis.hypothesis_label_high,
            );
            let count = analysis.hypotheses.len();
            let hypothesis = Hypothesis::new(
                format!("{}{}", LabelKind::Hypothesis.prefix(), number),
                description,
                labels::color_for(count),
                count,
            );
            analysis.hypothesis_label_high = number;
            analysis.hypotheses.push(hypothesis.clone());
            Some(hypothesis)
        })?;

        log_event_with_fields(
            Event::HypothesisAdded,
            &[("hypothesis_id", &created.id.to_string()), ("label", &created.label)],
        );
        Some(created)
    }

    pub fn hypotheses(&self) -> &[Hypothesis] {
        self.active_analysis()
            .map(|a| a.hypotheses.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_hypothesis(&self, id: HypothesisId) -> Option<&Hypothesis> {
        self.active_analysis()?.hypothesis(id)
    }

    pub fn update_hypothesis(&mut self, id: HypothesisId, update: HypothesisUpdate) -> bool {
        if update.is_empty() {
            return false;
        }
        let updated = self
            .mutate_active(|analysis| {
                let hypothesis = analysis.hypotheses.iter_mut().find(|h| h.id == id)?;
                update.apply(hypothesis);
                Some(())
            })
            .is_some();
        if updated {
            log_event_with_fields(Event::HypothesisUpdated, &[("hypothesis_id", &id.to_string())]);
        }
        updated
    }

    /// Delete a hypothesis together with every rating and milestone that
    /// references it.
    pub fn delete_hypothesis(&mut self, id: HypothesisId) -> bool {
        let removed = self.mutate_active(|analysis| {
            let index = analysis.hypotheses.iter().position(|h| h.id == id)?;
            let hypothesis = analysis.hypotheses.remove(index);

            let ratings_before = analysis.ratings.len();
            analysis.ratings.retain(|r| r.hypothesis_id != id);
            let milestones_before = analysis.milestones.len();
            analysis.milestones.retain(|m| m.hypothesis_id != id);

            Some((
                hypothesis.label,
                ratings_before - analysis.ratings.len(),
                milestones_before - analysis.milestones.len(),
            ))
        });

        match removed {
            Some((label, ratings, milestones)) => {
                log_event_with_fields(
                    Event::HypothesisDeleted,
                    &[
                        ("label", &label),
                        ("milestones_removed", &milestones.to_string()),
                        ("ratings_removed", &ratings.to_string()),
                    ],
                );
                true
            }
            None => false,
        }
    }

    /// Put hypotheses in the given order. `ids` must name every hypothesis
    /// exactly once.
    pub fn reorder_hypotheses(&mut self, ids: &[HypothesisId]) -> bool {
        self.mutate_active(|analysis| {
            let positions = permutation(ids, analysis.hypotheses.iter().map(|h| h.id))?;
            analysis.hypotheses.sort_by_key(|h| positions.get(&h.id).copied());
            for (index, hypothesis) in analysis.hypotheses.iter_mut().enumerate() {
                hypothesis.order = index;
            }
            Some(())
        })
        .is_some()
    }

    /// Replace the hypothesis list wholesale
    pub fn set_hypotheses(&mut self, hypotheses: Vec<Hypothesis>) -> bool {
        let count = hypotheses.len();
        let replaced = self
            .mutate_active(|analysis| {
                let highest = labels::highest_label_number(
                    LabelKind::Hypothesis,
                    hypotheses.iter().map(|h| h.label.as_str()),
                );
                analysis.hypothesis_label_high = analysis.hypothesis_label_high.max(highest);
                analysis.hypotheses = hypotheses;
                Some(())
            })
            .is_some();
        if replaced {
            log_event_with_fields(
                Event::CollectionReplaced,
                &[("collection", "hypotheses"), ("count", &count.to_string())],
            );
        }
        replaced
    }
}

/// Position of each id in a reorder request, or `None` unless `ids` is a
/// permutation of `existing`.
pub(crate) fn permutation<I>(ids: &[Uuid], existing: I) -> Option<HashMap<Uuid, usize>>
where
    I: Iterator<Item = Uuid>,
{
    let existing: HashSet<Uuid> = existing.collect();
    let positions: HashMap<Uuid, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

    if positions.len() != ids.len() || positions.len() != existing.len() {
        return None;
    }
    if !existing.iter().all(|id| positions.contains_key(id)) {
        return None;
    }
    Some(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewEvidence, Rating};

    fn workspace() -> Workspace {
        let mut ws = Workspace::new();
        ws.create_analysis("Outage", "Why did the link drop?", None);
        ws
    }

    #[test]
    fn test_labels_are_sequential() {
        let mut ws = workspace();
        let h1 = ws.add_hypothesis("fibre cut").unwrap();
        let h2 = ws.add_hypothesis("router bug").unwrap();
        assert_eq!(h1.label, "H1");
        assert_eq!(h2.label, "H2");
        assert_eq!(h2.order, 1);
        assert_ne!(h1.color, h2.color);
    }

    #[test]
    fn test_label_not_reused_after_delete() {
        let mut ws = workspace();
        ws.add_hypothesis("a").unwrap();
        let h2 = ws.add_hypothesis("b").unwrap();
        let h3 = ws.add_hypothesis("c").unwrap();

        ws.delete_hypothesis(h2.id);
        assert_eq!(ws.add_hypothesis("d").unwrap().label, "H4");

        ws.delete_hypothesis(h3.id);
        let h4 = ws.hypotheses().iter().find(|h| h.label == "H4").unwrap().id;
        ws.delete_hypothesis(h4);
        assert_eq!(ws.add_hypothesis("e").unwrap().label, "H5");
    }

    #[test]
    fn test_add_without_active_analysis() {
        let mut ws = Workspace::new();
        assert!(ws.add_hypothesis("orphan").is_none());
        assert!(ws.hypotheses().is_empty());
    }

    #[test]
    fn test_delete_cascades() {
        let mut ws = workspace();
        let h1 = ws.add_hypothesis("a").unwrap();
        let h2 = ws.add_hypothesis("b").unwrap();
        let e = ws.add_evidence(NewEvidence::new("log line")).unwrap();
        ws.set_rating(e.id, h1.id, Rating::Inconsistent);
        ws.set_rating(e.id, h2.id, Rating::Consistent);
        ws.add_milestone(h1.id, "reboot", None).unwrap();

        assert!(ws.delete_hypothesis(h1.id));

        let analysis = ws.active_analysis().unwrap();
        assert!(analysis.ratings.iter().all(|r| r.hypothesis_id != h1.id));
        assert!(analysis.milestones.is_empty());
        assert_eq!(analysis.ratings.len(), 1);
    }

    #[test]
    fn test_update_hypothesis() {
        let mut ws = workspace();
        let h = ws.add_hypothesis("a").unwrap();
        let update = HypothesisUpdate {
            description: Some("renamed".into()),
            future_indicators: Some(Some("more outages".into())),
            ..Default::default()
        };
        assert!(ws.update_hypothesis(h.id, update));
        let stored = ws.get_hypothesis(h.id).unwrap();
        assert_eq!(stored.description, "renamed");
        assert_eq!(stored.future_indicators.as_deref(), Some("more outages"));
        assert_eq!(stored.label, "H1");
    }

    #[test]
    fn test_reorder_requires_permutation() {
        let mut ws = workspace();
        let a = ws.add_hypothesis("a").unwrap();
        let b = ws.add_hypothesis("b").unwrap();
        let c = ws.add_hypothesis("c").unwrap();

        assert!(!ws.reorder_hypotheses(&[a.id, b.id]));
        assert!(!ws.reorder_hypotheses(&[a.id, a.id, b.id]));
        assert!(ws.reorder_hypotheses(&[c.id, a.id, b.id]));

        let labels: Vec<_> = ws.hypotheses().iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, ["H3", "H1", "H2"]);
        assert_eq!(ws.hypotheses()[0].order, 0);
    }
}
