//! Read-side engines
//!
//! Pure functions of an analysis' current state:
//! - `scores`: inconsistency / consistency totals and rank
//! - `diagnosticity`: how well each evidence item separates hypotheses
//! - `sensitivity`: which evidence the current winner depends on
//! - `completion`: how much of the matrix is filled in
//!
//! None of them mutate anything, so they can be called in any order.

mod completion;
mod diagnosticity;
mod scores;
mod sensitivity;

pub use completion::{matrix_completion, MatrixCompletion};
pub use diagnosticity::{
    calculate_diagnosticity, EvidenceDiagnosticity, HIGH_DIAGNOSTIC_THRESHOLD,
    LOW_DIAGNOSTIC_THRESHOLD,
};
pub use scores::{calculate_scores, HypothesisScore};
pub use sensitivity::{analyze_sensitivity, SensitivityResult};

use crate::repository::Workspace;

/// Engines applied to the active analysis. With no active analysis each
/// returns an empty or zeroed result.
impl Workspace {
    pub fn calculate_scores(&self) -> Vec<HypothesisScore> {
        self.active_analysis()
            .map(|a| calculate_scores(&a.hypotheses, &a.ratings))
            .unwrap_or_default()
    }

    pub fn calculate_diagnosticity(&self) -> Vec<EvidenceDiagnosticity> {
        self.active_analysis()
            .map(|a| calculate_diagnosticity(&a.evidence, &a.ratings))
            .unwrap_or_default()
    }

    pub fn analyze_sensitivity(&self) -> Vec<SensitivityResult> {
        self.active_analysis()
            .map(|a| analyze_sensitivity(&a.hypotheses, &a.evidence, &a.ratings))
            .unwrap_or_default()
    }

    pub fn matrix_completion(&self) -> MatrixCompletion {
        self.active_analysis()
            .map(matrix_completion)
            .unwrap_or_default()
    }
}
