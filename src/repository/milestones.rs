//! Milestones (future indicators) on the active analysis

use chrono::NaiveDate;

use crate::model::{HypothesisId, Milestone, MilestoneId, MilestoneUpdate};
use crate::observability::{log_event_with_fields, Event};

use super::workspace::Workspace;

impl Workspace {
    /// Add a milestone to an existing hypothesis
    pub fn add_milestone(
        &mut self,
        hypothesis_id: HypothesisId,
        description: impl Into<String>,
        expected_by: Option<NaiveDate>,
    ) -> Option<Milestone> {
        let description = description.into();
        let created = self.mutate_active(|analysis| {
            analysis.hypothesis(hypothesis_id)?;
            let milestone = Milestone::new(hypothesis_id, description, expected_by);
            analysis.milestones.push(milestone.clone());
            Some(milestone)
        })?;

        log_event_with_fields(
            Event::MilestoneAdded,
            &[
                ("hypothesis_id", &hypothesis_id.to_string()),
                ("milestone_id", &created.id.to_string()),
            ],
        );
        Some(created)
    }

    pub fn milestones(&self) -> &[Milestone] {
        self.active_analysis()
            .map(|a| a.milestones.as_slice())
            .unwrap_or(&[])
    }

    pub fn milestones_for(&self, hypothesis_id: HypothesisId) -> Vec<&Milestone> {
        self.milestones()
            .iter()
            .filter(|m| m.hypothesis_id == hypothesis_id)
            .collect()
    }

    pub fn update_milestone(&mut self, id: MilestoneId, update: MilestoneUpdate) -> bool {
        if update.is_empty() {
            return false;
        }
        let updated = self
            .mutate_active(|analysis| {
                let milestone = analysis.milestones.iter_mut().find(|m| m.id == id)?;
                update.apply(milestone);
                Some(())
            })
            .is_some();
        if updated {
            log_event_with_fields(Event::MilestoneUpdated, &[("milestone_id", &id.to_string())]);
        }
        updated
    }

    pub fn delete_milestone(&mut self, id: MilestoneId) -> bool {
        let deleted = self
            .mutate_active(|analysis| {
                let index = analysis.milestones.iter().position(|m| m.id == id)?;
                analysis.milestones.remove(index);
                Some(())
            })
            .is_some();
        if deleted {
            log_event_with_fields(Event::MilestoneDeleted, &[("milestone_id", &id.to_string())]);
        }
        deleted
    }

    /// Replace the milestone list wholesale
    pub fn set_milestones(&mut self, milestones: Vec<Milestone>) -> bool {
        let count = milestones.len();
        let replaced = self
            .mutate_active(|analysis| {
                analysis.milestones = milestones;
                Some(())
            })
            .is_some();
        if replaced {
            log_event_with_fields(
                Event::CollectionReplaced,
                &[("collection", "milestones"), ("count", &count.to_string())],
            );
        }
        replaced
    }
}
