//! # Workspace
//!
//! The set of analyses plus which one is active. This is the whole engine
//! state and the value handed to the persistence collaborator.

use serde::{Deserialize, Serialize};

use crate::model::{Analysis, AnalysisId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub(crate) analyses: Vec<Analysis>,
    #[serde(default)]
    pub(crate) active_analysis_id: Option<AnalysisId>,
}

impl Workspace {
    /// Empty workspace, no active analysis
    pub fn new() -> Self {
        Self::default()
    }

    /// All analyses in creation order
    pub fn analyses(&self) -> &[Analysis] {
        &self.analyses
    }

    pub fn analysis(&self, id: AnalysisId) -> Option<&Analysis> {
        self.analyses.iter().find(|a| a.id == id)
    }

    pub fn active_analysis_id(&self) -> Option<AnalysisId> {
        self.active_analysis_id
    }

    /// The analysis currently being edited
    pub fn active_analysis(&self) -> Option<&Analysis> {
        self.active_analysis_id.and_then(|id| self.analysis(id))
    }

    pub(crate) fn active_mut(&mut self) -> Option<&mut Analysis> {
        let id = self.active_analysis_id?;
        self.analyses.iter_mut().find(|a| a.id == id)
    }

    /// Run a mutation against the active analysis.
    ///
    /// The closure returns `None` when it made no change; otherwise
    /// `updated_at` is bumped before returning. The closure runs to
    /// completion before anything else can observe the analysis, so callers
    /// see either the whole change or none of it.
    pub(crate) fn mutate_active<R>(
        &mut self,
        f: impl FnOnce(&mut Analysis) -> Option<R>,
    ) -> Option<R> {
        let analysis = self.active_mut()?;
        let result = f(&mut *analysis)?;
        analysis.touch();
        Some(result)
    }
}
