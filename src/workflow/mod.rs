//! Step workflow
//!
//! Tracks where the active analysis is in the eight-stage method.
//! Out-of-range step numbers are ignored. Moving and completing only bump
//! `updated_at` when something actually changed.

mod steps;

pub use steps::{is_valid_step, step, Step, STEPS};

use serde::Serialize;

use crate::model::{FIRST_STEP, LAST_STEP};
use crate::observability::{log_event_with_fields, Event};
use crate::repository::Workspace;

/// Completed steps out of eight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WorkflowProgress {
    pub current_step: u8,
    pub completed: usize,
    pub total: usize,
}

impl Workspace {
    /// Jump to step `n`. No-op outside 1..=8.
    pub fn go_to_step(&mut self, n: u8) -> bool {
        if !is_valid_step(n) {
            return false;
        }
        let moved = self
            .mutate_active(|analysis| {
                if analysis.current_step == n {
                    return None;
                }
                analysis.current_step = n;
                Some(())
            })
            .is_some();
        if moved {
            log_event_with_fields(Event::StepChanged, &[("step", &n.to_string())]);
        }
        moved
    }

    pub fn next_step(&mut self) -> bool {
        match self.current_step() {
            Some(current) if current < LAST_STEP => self.go_to_step(current + 1),
            _ => false,
        }
    }

    pub fn prev_step(&mut self) -> bool {
        match self.current_step() {
            Some(current) if current > FIRST_STEP => self.go_to_step(current - 1),
            _ => false,
        }
    }

    /// Add `n` to the completed set. Idempotent; no-op outside 1..=8.
    pub fn mark_step_complete(&mut self, n: u8) -> bool {
        if !is_valid_step(n) {
            return false;
        }
        let marked = self
            .mutate_active(|analysis| analysis.completed_steps.insert(n).then_some(()))
            .is_some();
        if marked {
            log_event_with_fields(Event::StepCompleted, &[("step", &n.to_string())]);
        }
        marked
    }

    pub fn current_step(&self) -> Option<u8> {
        self.active_analysis().map(|a| a.current_step)
    }

    pub fn is_step_complete(&self, n: u8) -> bool {
        self.active_analysis()
            .map(|a| a.completed_steps.contains(&n))
            .unwrap_or(false)
    }

    /// Zeroed when no analysis is active
    pub fn progress(&self) -> WorkflowProgress {
        match self.active_analysis() {
            Some(analysis) => WorkflowProgress {
                current_step: analysis.current_step,
                completed: analysis.completed_steps.len(),
                total: STEPS.len(),
            },
            None => WorkflowProgress::default(),
        }
    }
}
