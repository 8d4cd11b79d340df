//! Evidence diagnosticity
//!
//! Evidence rated very differently across hypotheses helps tell them
//! apart; evidence rated the same everywhere does not. The score is the
//! population standard deviation of the polarity values of an item's
//! cells.
//!
//! - no cells: score 0, low
//! - score >= 1.0: high
//! - score < 0.5: low
//! - otherwise neither

use serde::{Deserialize, Serialize};

use crate::model::{Evidence, EvidenceId, MatrixRating};

/// Scores at or above this are highly diagnostic
pub const HIGH_DIAGNOSTIC_THRESHOLD: f64 = 1.0;
/// Scores below this are weakly diagnostic
pub const LOW_DIAGNOSTIC_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceDiagnosticity {
    pub evidence_id: EvidenceId,
    pub label: String,
    /// Number of cells the item has
    pub rating_count: usize,
    /// Mean polarity
    pub mean: f64,
    /// Population variance of polarity
    pub variance: f64,
    /// Standard deviation of polarity
    pub diagnosticity_score: f64,
    pub is_high_diagnostic: bool,
    pub is_low_diagnostic: bool,
}

pub fn calculate_diagnosticity(
    evidence: &[Evidence],
    ratings: &[MatrixRating],
) -> Vec<EvidenceDiagnosticity> {
    evidence
        .iter()
        .map(|item| {
            let values: Vec<f64> = ratings
                .iter()
                .filter(|r| r.evidence_id == item.id)
                .map(|r| f64::from(r.rating.polarity()))
                .collect();
            measure(item, &values)
        })
        .collect()
}

fn measure(item: &Evidence, values: &[f64]) -> EvidenceDiagnosticity {
    if values.is_empty() {
        return EvidenceDiagnosticity {
            evidence_id: item.id,
            label: item.label.clone(),
            rating_count: 0,
            mean: 0.0,
            variance: 0.0,
            diagnosticity_score: 0.0,
            is_high_diagnostic: false,
            is_low_diagnostic: true,
        };
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let score = variance.sqrt();

    EvidenceDiagnosticity {
        evidence_id: item.id,
        label: item.label.clone(),
        rating_count: values.len(),
        mean,
        variance,
        diagnosticity_score: score,
        is_high_diagnostic: score >= HIGH_DIAGNOSTIC_THRESHOLD,
        is_low_diagnostic: score < LOW_DIAGNOSTIC_THRESHOLD,
    }
}
