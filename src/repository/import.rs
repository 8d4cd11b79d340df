//! Import and export of single analyses as JSON blobs
//!
//! Import is the one validating boundary in the engine. A blob is accepted
//! only if it parses, carries non-empty `id`, `title` and `focus_question`,
//! and deserializes into a full analysis. Rejection leaves the workspace
//! untouched. Accepted analyses always get a fresh id.

use serde_json::Value;
use uuid::Uuid;

use crate::model::{Analysis, AnalysisId};
use crate::observability::{log_event_with_fields, Event};

use super::errors::{RepositoryError, RepositoryResult};
use super::workspace::Workspace;

const REQUIRED_FIELDS: [&str; 3] = ["id", "title", "focus_question"];

impl Workspace {
    /// Serialize one analysis, snapshots included
    pub fn export_analysis_json(&self, id: AnalysisId) -> RepositoryResult<String> {
        let analysis = self
            .analysis(id)
            .ok_or(RepositoryError::AnalysisNotFound(id))?;
        serde_json::to_string_pretty(analysis)
            .map_err(|e| RepositoryError::InvalidJson(e.to_string()))
    }

    /// Validate and append an analysis blob. Returns the new id.
    pub fn import_analysis(&mut self, json: &str) -> RepositoryResult<AnalysisId> {
        match parse_import(json) {
            Ok((mut analysis, original_id)) => {
                analysis.touch();
                let id = analysis.id;
                log_event_with_fields(
                    Event::AnalysisImported,
                    &[("analysis_id", &id.to_string()), ("original_id", &original_id)],
                );
                self.analyses.push(analysis);
                Ok(id)
            }
            Err(e) => {
                log_event_with_fields(Event::ImportRejected, &[("reason", &e.to_string())]);
                Err(e)
            }
        }
    }
}

/// Parse and validate a blob. The id is replaced before deserializing, so
/// any non-empty id is accepted. Returns the analysis and its original id.
fn parse_import(json: &str) -> RepositoryResult<(Analysis, String)> {
    let mut value: Value =
        serde_json::from_str(json).map_err(|e| RepositoryError::InvalidJson(e.to_string()))?;

    let object = value
        .as_object_mut()
        .ok_or_else(|| RepositoryError::ImportRejected("expected a JSON object".into()))?;

    for field in REQUIRED_FIELDS {
        let present = object
            .get(field)
            .and_then(Value::as_str)
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false);
        if !present {
            return Err(RepositoryError::ImportRejected(format!(
                "missing required field '{}'",
                field
            )));
        }
    }

    let original_id = object
        .insert("id".to_string(), Value::String(Uuid::new_v4().to_string()))
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();

    let analysis = serde_json::from_value(value)
        .map_err(|e| RepositoryError::ImportRejected(e.to_string()))?;
    Ok((analysis, original_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewEvidence;

    #[test]
    fn test_export_then_import_gets_new_id() {
        let mut ws = Workspace::new();
        let id = ws.create_analysis("Fraud", "Who moved the funds?", None);
        ws.add_hypothesis("insider").unwrap();
        ws.add_evidence(NewEvidence::new("wire log")).unwrap();

        let blob = ws.export_analysis_json(id).unwrap();
        let imported = ws.import_analysis(&blob).unwrap();

        assert_ne!(imported, id);
        assert_eq!(ws.analyses().len(), 2);
        let copy = ws.analysis(imported).unwrap();
        assert_eq!(copy.title, "Fraud");
        assert_eq!(copy.hypotheses.len(), 1);
    }

    #[test]
    fn test_import_rejects_missing_fields() {
        let mut ws = Workspace::new();
        let blob = r#"{"id": "x", "title": "No question"}"#;
        let err = ws.import_analysis(blob).unwrap_err();
        assert!(matches!(err, RepositoryError::ImportRejected(_)));
        assert!(ws.analyses().is_empty());
    }

    #[test]
    fn test_import_accepts_foreign_id() {
        let mut ws = Workspace::new();
        let blob = r#"{
            "id": "legacy-17",
            "title": "Imported",
            "focus_question": "What happened?",
            "created_at": "2026-01-05T10:00:00Z",
            "updated_at": "2026-01-05T10:00:00Z"
        }"#;
        let id = ws.import_analysis(blob).unwrap();
        let analysis = ws.analysis(id).unwrap();
        assert_eq!(analysis.current_step, 1);
        assert!(analysis.hypotheses.is_empty());
    }

    #[test]
    fn test_import_rejects_blank_title() {
        let mut ws = Workspace::new();
        let blob = r#"{"id": "x", "title": "  ", "focus_question": "q"}"#;
        assert!(ws.import_analysis(blob).is_err());
    }

    #[test]
    fn test_import_rejects_garbage() {
        let mut ws = Workspace::new();
        assert!(matches!(
            ws.import_analysis("not json"),
            Err(RepositoryError::InvalidJson(_))
        ));
        assert!(matches!(
            ws.import_analysis("[1, 2]"),
            Err(RepositoryError::ImportRejected(_))
        ));
        assert!(ws.analyses().is_empty());
    }

    #[test]
    fn test_export_unknown_analysis() {
        let ws = Workspace::new();
        assert!(matches!(
            ws.export_analysis_json(Uuid::new_v4()),
            Err(RepositoryError::AnalysisNotFound(_))
        ));
    }
}
