//! Fully resolved report values
//!
//! Built once from an analysis by running every read-side engine. Renderers
//! only walk these values and never go back to the analysis.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::model::{
    Analysis, AnalysisId, AnalysisStatus, EvidenceKind, Observation, Rating, Reliability,
};
use crate::scoring::{
    analyze_sensitivity, calculate_diagnosticity, calculate_scores, matrix_completion,
    MatrixCompletion, SensitivityResult,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HypothesisRow {
    pub label: String,
    pub description: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub future_indicators: Option<String>,
    pub inconsistency_score: u32,
    pub consistency_score: u32,
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceRow {
    pub label: String,
    pub description: String,
    pub kind: EvidenceKind,
    pub reliability: Reliability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub diagnosticity_score: f64,
    pub is_high_diagnostic: bool,
    pub is_low_diagnostic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixCell {
    pub hypothesis_label: String,
    pub rating: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One evidence row of the matrix, one cell per hypothesis in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRow {
    pub evidence_label: String,
    pub cells: Vec<MatrixCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneRow {
    pub hypothesis_label: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_by: Option<NaiveDate>,
    pub observed: Observation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotSummary {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub hypotheses: usize,
    pub evidence: usize,
    pub ratings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub analysis_id: AnalysisId,
    pub title: String,
    pub focus_question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: AnalysisStatus,
    pub current_step: u8,
    pub completed_steps: Vec<u8>,
    pub generated_at: DateTime<Utc>,

    /// Display order; `rank` carries the conclusion order
    pub hypotheses: Vec<HypothesisRow>,
    pub evidence: Vec<EvidenceRow>,
    pub matrix: Vec<MatrixRow>,
    pub milestones: Vec<MilestoneRow>,
    pub snapshots: Vec<SnapshotSummary>,
    pub sensitivity_notes: String,
    pub sensitivity: Vec<SensitivityResult>,
    pub completion: MatrixCompletion,
}

impl AnalysisReport {
    pub fn build(analysis: &Analysis) -> Self {
        let scores: HashMap<_, _> = calculate_scores(&analysis.hypotheses, &analysis.ratings)
            .into_iter()
            .map(|s| (s.hypothesis_id, s))
            .collect();
        let diagnosticity: HashMap<_, _> =
            calculate_diagnosticity(&analysis.evidence, &analysis.ratings)
                .into_iter()
                .map(|d| (d.evidence_id, d))
                .collect();

        let hypotheses = analysis
            .hypotheses
            .iter()
            .map(|h| {
                let score = scores.get(&h.id);
                HypothesisRow {
                    label: h.label.clone(),
                    description: h.description.clone(),
                    color: h.color.clone(),
                    future_indicators: h.future_indicators.clone(),
                    inconsistency_score: score.map(|s| s.inconsistency_score).unwrap_or(0),
                    consistency_score: score.map(|s| s.consistency_score).unwrap_or(0),
                    rank: score.map(|s| s.rank).unwrap_or(0),
                }
            })
            .collect();

        let evidence = analysis
            .evidence
            .iter()
            .map(|e| {
                let d = diagnosticity.get(&e.id);
                EvidenceRow {
                    label: e.label.clone(),
                    description: e.description.clone(),
                    kind: e.kind,
                    reliability: e.reliability,
                    source: e.source.clone(),
                    diagnosticity_score: d.map(|d| d.diagnosticity_score).unwrap_or(0.0),
                    is_high_diagnostic: d.map(|d| d.is_high_diagnostic).unwrap_or(false),
                    is_low_diagnostic: d.map(|d| d.is_low_diagnostic).unwrap_or(true),
                }
            })
            .collect();

        let matrix = analysis
            .evidence
            .iter()
            .map(|e| MatrixRow {
                evidence_label: e.label.clone(),
                cells: analysis
                    .hypotheses
                    .iter()
                    .map(|h| {
                        let cell = analysis.cell(e.id, h.id);
                        MatrixCell {
                            hypothesis_label: h.label.clone(),
                            rating: cell.map(|c| c.rating).unwrap_or_default(),
                            notes: cell.and_then(|c| c.notes.clone()),
                        }
                    })
                    .collect(),
            })
            .collect();

        let milestones = analysis
            .milestones
            .iter()
            .map(|m| MilestoneRow {
                hypothesis_label: analysis
                    .hypothesis(m.hypothesis_id)
                    .map(|h| h.label.clone())
                    .unwrap_or_default(),
                description: m.description.clone(),
                expected_by: m.expected_by,
                observed: m.observed,
            })
            .collect();

        let snapshots = analysis
            .snapshots
            .iter()
            .map(|s| SnapshotSummary {
                label: s.label.clone(),
                description: s.description.clone(),
                created_at: s.created_at,
                hypotheses: s.data.hypotheses.len(),
                evidence: s.data.evidence.len(),
                ratings: s.data.ratings.len(),
            })
            .collect();

        Self {
            analysis_id: analysis.id,
            title: analysis.title.clone(),
            focus_question: analysis.focus_question.clone(),
            description: analysis.description.clone(),
            status: analysis.status,
            current_step: analysis.current_step,
            completed_steps: analysis.completed_steps.iter().copied().collect(),
            generated_at: Utc::now(),
            hypotheses,
            evidence,
            matrix,
            milestones,
            snapshots,
            sensitivity_notes: analysis.sensitivity_notes.clone(),
            sensitivity: analyze_sensitivity(
                &analysis.hypotheses,
                &analysis.evidence,
                &analysis.ratings,
            ),
            completion: matrix_completion(analysis),
        }
    }

    /// Hypotheses in conclusion order, most likely first
    pub fn ranked_hypotheses(&self) -> Vec<&HypothesisRow> {
        let mut ranked: Vec<_> = self.hypotheses.iter().collect();
        ranked.sort_by_key(|h| h.rank);
        ranked
    }
}
