//! # Repository Errors
//!
//! Only the import/export boundary can fail. Everything else in the
//! repository reports absence with `None` / `false`.

use thiserror::Error;

use crate::model::AnalysisId;

/// Result type for repository boundary operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Analysis not found: {0}")]
    AnalysisNotFound(AnalysisId),

    #[error("Invalid analysis JSON: {0}")]
    InvalidJson(String),

    #[error("Import rejected: {0}")]
    ImportRejected(String),
}

impl RepositoryError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RepositoryError::AnalysisNotFound(_) => "ACH_ANALYSIS_NOT_FOUND",
            RepositoryError::InvalidJson(_) => "ACH_INVALID_JSON",
            RepositoryError::ImportRejected(_) => "ACH_IMPORT_REJECTED",
        }
    }
}
