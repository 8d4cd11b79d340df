//! The eight ACH stages

use serde::Serialize;

use crate::model::{FIRST_STEP, LAST_STEP};

/// One stage of the method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub number: u8,
    pub title: &'static str,
    pub summary: &'static str,
}

pub const STEPS: [Step; 8] = [
    Step {
        number: 1,
        title: "Identify Hypotheses",
        summary: "List every reasonable explanation for the focus question",
    },
    Step {
        number: 2,
        title: "List Evidence",
        summary: "Record facts, testimony, documents, assumptions and arguments",
    },
    Step {
        number: 3,
        title: "Prepare Matrix",
        summary: "Rate each evidence item against each hypothesis",
    },
    Step {
        number: 4,
        title: "Refine Matrix",
        summary: "Drop evidence with no diagnostic value and reconsider hypotheses",
    },
    Step {
        number: 5,
        title: "Draw Tentative Conclusions",
        summary: "Rank hypotheses by how much evidence contradicts them",
    },
    Step {
        number: 6,
        title: "Sensitivity Analysis",
        summary: "Check which evidence the conclusion depends on",
    },
    Step {
        number: 7,
        title: "Report Conclusions",
        summary: "Write up the relative likelihood of every hypothesis",
    },
    Step {
        number: 8,
        title: "Identify Milestones",
        summary: "Name future observations that would change the assessment",
    },
];

pub fn is_valid_step(n: u8) -> bool {
    (FIRST_STEP..=LAST_STEP).contains(&n)
}

/// Step by number, `None` outside 1..=8
pub fn step(n: u8) -> Option<&'static Step> {
    if !is_valid_step(n) {
        return None;
    }
    STEPS.get(usize::from(n - FIRST_STEP))
}
