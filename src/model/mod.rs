//! Domain model for an ACH analysis
//!
//! - `Rating`: the closed rating scale and its two numeric projections
//! - `Hypothesis`, `Evidence`, `MatrixRating`, `Milestone`: the owned collections
//! - `Snapshot`: immutable point-in-time copies
//! - `Analysis`: the aggregate root

mod analysis;
mod evidence;
mod hypothesis;
mod matrix;
mod milestone;
mod rating;
mod snapshot;

pub use analysis::{
    Analysis, AnalysisId, AnalysisStatus, AnalysisSummary, AnalysisUpdate, FIRST_STEP, LAST_STEP,
};
pub use evidence::{Evidence, EvidenceId, EvidenceKind, EvidenceUpdate, NewEvidence, Reliability};
pub use hypothesis::{Hypothesis, HypothesisId, HypothesisUpdate};
pub use matrix::MatrixRating;
pub use milestone::{Milestone, MilestoneId, MilestoneUpdate, Observation};
pub use rating::{Rating, UnknownRating};
pub use snapshot::{Snapshot, SnapshotData, SnapshotId};
