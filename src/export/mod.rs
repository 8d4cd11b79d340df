//! Report export
//!
//! [`AnalysisReport::build`] resolves everything up front; the renderers
//! here turn it into JSON or Markdown.

mod markdown;
mod report;

pub use markdown::to_markdown;
pub use report::{
    AnalysisReport, EvidenceRow, HypothesisRow, MatrixCell, MatrixRow, MilestoneRow,
    SnapshotSummary,
};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::repository::Workspace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Markdown,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "markdown",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to encode report: {0}")]
    Encode(String),
}

impl ExportError {
    pub fn code(&self) -> &'static str {
        match self {
            ExportError::UnsupportedFormat(_) => "ACH_EXPORT_FORMAT",
            ExportError::Encode(_) => "ACH_EXPORT_ENCODE",
        }
    }
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Pretty JSON
pub fn to_json(report: &AnalysisReport) -> ExportResult<String> {
    serde_json::to_string_pretty(report).map_err(|e| ExportError::Encode(e.to_string()))
}

pub fn render(report: &AnalysisReport, format: ExportFormat) -> ExportResult<String> {
    let output = match format {
        ExportFormat::Json => to_json(report)?,
        ExportFormat::Markdown => to_markdown(report),
    };
    log_event_with_fields(
        Event::ReportExported,
        &[
            ("analysis_id", &report.analysis_id.to_string()),
            ("format", format.as_str()),
        ],
    );
    Ok(output)
}

impl Workspace {
    /// Report for the active analysis
    pub fn report(&self) -> Option<AnalysisReport> {
        self.active_analysis().map(AnalysisReport::build)
    }
}
