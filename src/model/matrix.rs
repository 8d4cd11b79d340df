//! # Matrix cells

use serde::{Deserialize, Serialize};

use super::evidence::EvidenceId;
use super::hypothesis::HypothesisId;
use super::rating::Rating;

/// The rating of one evidence item against one hypothesis.
///
/// There is at most one cell per (evidence, hypothesis) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRating {
    pub evidence_id: EvidenceId,
    pub hypothesis_id: HypothesisId,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MatrixRating {
    pub fn new(evidence_id: EvidenceId, hypothesis_id: HypothesisId, rating: Rating) -> Self {
        Self {
            evidence_id,
            hypothesis_id,
            rating,
            notes: None,
        }
    }

    /// True if this cell is for the given pair
    pub fn is_for(&self, evidence_id: EvidenceId, hypothesis_id: HypothesisId) -> bool {
        self.evidence_id == evidence_id && self.hypothesis_id == hypothesis_id
    }
}
