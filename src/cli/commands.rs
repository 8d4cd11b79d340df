//! CLI command implementations
//!
//! Every command except `init` follows the same sequence:
//! 1. Load and validate the config
//! 2. Load the workspace from the state file
//! 3. Run the command against the workspace
//! 4. Save the workspace if the command changed it
//!
//! A state file that cannot be read stops the command before anything is
//! saved, so an unreadable file is never replaced by an empty workspace.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::AchConfig;
use crate::export::{self, ExportFormat};
use crate::model::{
    Analysis, AnalysisStatus, AnalysisUpdate, EvidenceId, EvidenceKind, EvidenceUpdate,
    HypothesisId, HypothesisUpdate, MilestoneUpdate, NewEvidence, Observation, Rating,
    Reliability,
};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::persistence::{FileStateStore, StateStore};
use crate::repository::Workspace;
use crate::workflow;

use super::args::{
    AnalysisAction, AnalysisUpdateArgs, Cli, Command, EvidenceAction, HypothesisAction,
    MilestoneAction, SnapshotAction, StepAction,
};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Result of one command: the response body and whether state changed
#[derive(Debug)]
pub struct Outcome {
    pub data: Value,
    pub changed: bool,
}

impl Outcome {
    fn read(data: Value) -> Self {
        Self {
            data,
            changed: false,
        }
    }

    fn changed(data: Value) -> Self {
        Self {
            data,
            changed: true,
        }
    }

    fn when(changed: bool, data: Value) -> Self {
        Self { data, changed }
    }
}

/// Main CLI entry point
///
/// Parses arguments, dispatches, and reports failures as an error response.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let result = run_command(&cli.config, cli.command);
    if let Err(e) = &result {
        let _ = write_error(e.code_str(), e.message());
    }
    result
}

/// Run one command and write its response
pub fn run_command(config_path: &Path, command: Command) -> CliResult<()> {
    match command {
        Command::Init => init(config_path),
        other => {
            let data = run_with_state(config_path, other)?;
            write_response(data)
        }
    }
}

/// Write a default config file. Does not create the state file; the first
/// mutating command does.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = AchConfig::default();
    config.write_new(config_path)?;

    write_response(json!({
        "initialized": true,
        "config": config_path.display().to_string(),
        "state_file": config.state_path(config_path).display().to_string(),
    }))
}

fn load_config(config_path: &Path) -> CliResult<AchConfig> {
    if !config_path.exists() {
        return Err(CliError::not_initialized(config_path.display()));
    }
    let config = AchConfig::load(config_path)?;
    Logger::set_min_severity(config.severity()?);
    Ok(config)
}

/// Load state, run `command`, save if it changed anything
pub fn run_with_state(config_path: &Path, command: Command) -> CliResult<Value> {
    let config = load_config(config_path)?;
    let store = FileStateStore::new(config.state_path(config_path));

    let mut workspace = store.load()?.unwrap_or_default();
    let outcome = execute(&mut workspace, &config, command)?;

    if outcome.changed {
        store.save(&workspace)?;
        log_event_with_fields(
            Event::StateSaved,
            &[("path", &store.path().display().to_string())],
        );
    }
    Ok(outcome.data)
}

/// Run a command against an in-memory workspace
pub fn execute(
    workspace: &mut Workspace,
    config: &AchConfig,
    command: Command,
) -> CliResult<Outcome> {
    match command {
        Command::Init => Err(CliError::invalid_argument(
            "init does not operate on a workspace",
        )),
        Command::Analysis { action } => analysis(workspace, action),
        Command::Hypothesis { action } => hypothesis(workspace, action),
        Command::Evidence { action } => evidence(workspace, action),
        Command::Rate {
            evidence,
            hypothesis,
            rating,
            notes,
        } => rate(workspace, &evidence, &hypothesis, &rating, notes),
        Command::Milestone { action } => milestone(workspace, action),
        Command::Score => {
            active(workspace)?;
            Ok(Outcome::read(to_value(workspace.calculate_scores())?))
        }
        Command::Diagnosticity => {
            active(workspace)?;
            Ok(Outcome::read(to_value(workspace.calculate_diagnosticity())?))
        }
        Command::Sensitivity => {
            active(workspace)?;
            Ok(Outcome::read(to_value(workspace.analyze_sensitivity())?))
        }
        Command::Completion => {
            active(workspace)?;
            Ok(Outcome::read(to_value(workspace.matrix_completion())?))
        }
        Command::Snapshot { action } => snapshot(workspace, action),
        Command::Step { action } => step(workspace, action),
        Command::Export { format, output } => export_report(workspace, config, format, output),
        Command::Import { path } => {
            let content = fs::read_to_string(&path).map_err(|e| {
                CliError::io_error(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let id = workspace.import_analysis(&content)?;
            Ok(Outcome::changed(json!({ "analysis_id": id })))
        }
    }
}

fn analysis(workspace: &mut Workspace, action: AnalysisAction) -> CliResult<Outcome> {
    match action {
        AnalysisAction::Create {
            title,
            question,
            description,
        } => {
            let id = workspace.create_analysis(title, question, description);
            let created = workspace
                .analysis(id)
                .ok_or_else(|| CliError::not_found("Analysis", &id.to_string()))?;
            Ok(Outcome::changed(to_value(created)?))
        }
        AnalysisAction::List => Ok(Outcome::read(json!({
            "active_analysis_id": workspace.active_analysis_id(),
            "analyses": workspace.list_analyses(),
        }))),
        AnalysisAction::Show => Ok(Outcome::read(to_value(active(workspace)?)?)),
        AnalysisAction::Select { id } => {
            let id = parse_uuid(&id, "analysis id")?;
            if !workspace.select_analysis(id) {
                return Err(CliError::not_found("Analysis", &id.to_string()));
            }
            Ok(Outcome::changed(json!({ "active_analysis_id": id })))
        }
        AnalysisAction::Update(args) => {
            active(workspace)?;
            let update = analysis_update(args)?;
            if update.is_empty() {
                return Err(CliError::invalid_argument("Nothing to update"));
            }
            workspace.update_analysis(update);
            Ok(Outcome::changed(summary(active(workspace)?)))
        }
        AnalysisAction::Notes { text } => {
            active(workspace)?;
            workspace.set_sensitivity_notes(text);
            Ok(Outcome::changed(summary(active(workspace)?)))
        }
        AnalysisAction::Delete { id } => {
            let id = parse_uuid(&id, "analysis id")?;
            if !workspace.delete_analysis(id) {
                return Err(CliError::not_found("Analysis", &id.to_string()));
            }
            Ok(Outcome::changed(json!({ "deleted": id })))
        }
        AnalysisAction::Duplicate { id } => {
            let id = parse_uuid(&id, "analysis id")?;
            let copy = workspace
                .duplicate_analysis(id)
                .ok_or_else(|| CliError::not_found("Analysis", &id.to_string()))?;
            Ok(Outcome::changed(json!({ "analysis_id": copy })))
        }
        AnalysisAction::ExportJson { id } => {
            let id = parse_uuid(&id, "analysis id")?;
            let json = workspace.export_analysis_json(id)?;
            Ok(Outcome::read(serde_json::from_str(&json)?))
        }
    }
}

fn analysis_update(args: AnalysisUpdateArgs) -> CliResult<AnalysisUpdate> {
    Ok(AnalysisUpdate {
        title: args.title,
        focus_question: args.question,
        description: optional_text(args.description),
        status: args
            .status
            .map(|s| parse_arg::<AnalysisStatus>(&s))
            .transpose()?,
    })
}

fn hypothesis(workspace: &mut Workspace, action: HypothesisAction) -> CliResult<Outcome> {
    match action {
        HypothesisAction::Add { description } => {
            let created = workspace
                .add_hypothesis(description)
                .ok_or_else(CliError::no_active_analysis)?;
            Ok(Outcome::changed(to_value(created)?))
        }
        HypothesisAction::List => {
            active(workspace)?;
            Ok(Outcome::read(to_value(workspace.hypotheses())?))
        }
        HypothesisAction::Update {
            label,
            description,
            color,
            indicators,
        } => {
            let id = hypothesis_id(workspace, &label)?;
            let update = HypothesisUpdate {
                description,
                color,
                future_indicators: optional_text(indicators),
            };
            if !workspace.update_hypothesis(id, update) {
                return Err(CliError::invalid_argument("Nothing to update"));
            }
            Ok(Outcome::changed(to_value(workspace.get_hypothesis(id))?))
        }
        HypothesisAction::Delete { label } => {
            let id = hypothesis_id(workspace, &label)?;
            workspace.delete_hypothesis(id);
            Ok(Outcome::changed(json!({ "deleted": label })))
        }
        HypothesisAction::Reorder { labels } => {
            let ids = labels
                .iter()
                .map(|label| hypothesis_id(workspace, label))
                .collect::<CliResult<Vec<_>>>()?;
            if !workspace.reorder_hypotheses(&ids) {
                return Err(CliError::invalid_argument(
                    "Reorder must name every hypothesis exactly once",
                ));
            }
            Ok(Outcome::changed(to_value(workspace.hypotheses())?))
        }
    }
}

fn evidence(workspace: &mut Workspace, action: EvidenceAction) -> CliResult<Outcome> {
    match action {
        EvidenceAction::Add {
            description,
            kind,
            reliability,
            source,
        } => {
            let mut new = NewEvidence::new(description);
            if let Some(kind) = kind {
                new = new.with_kind(parse_arg::<EvidenceKind>(&kind)?);
            }
            if let Some(reliability) = reliability {
                new = new.with_reliability(parse_arg::<Reliability>(&reliability)?);
            }
            if let Some(source) = source {
                new = new.with_source(source);
            }
            let created = workspace
                .add_evidence(new)
                .ok_or_else(CliError::no_active_analysis)?;
            Ok(Outcome::changed(to_value(created)?))
        }
        EvidenceAction::List => {
            active(workspace)?;
            Ok(Outcome::read(to_value(workspace.evidence())?))
        }
        EvidenceAction::Update {
            label,
            description,
            kind,
            reliability,
            source,
        } => {
            let id = evidence_id(workspace, &label)?;
            let update = EvidenceUpdate {
                description,
                kind: kind.map(|k| parse_arg::<EvidenceKind>(&k)).transpose()?,
                reliability: reliability
                    .map(|r| parse_arg::<Reliability>(&r))
                    .transpose()?,
                source: optional_text(source),
            };
            if !workspace.update_evidence(id, update) {
                return Err(CliError::invalid_argument("Nothing to update"));
            }
            Ok(Outcome::changed(to_value(workspace.get_evidence(id))?))
        }
        EvidenceAction::Delete { label } => {
            let id = evidence_id(workspace, &label)?;
            workspace.delete_evidence(id);
            Ok(Outcome::changed(json!({ "deleted": label })))
        }
        EvidenceAction::Reorder { labels } => {
            let ids = labels
                .iter()
                .map(|label| evidence_id(workspace, label))
                .collect::<CliResult<Vec<_>>>()?;
            if !workspace.reorder_evidence(&ids) {
                return Err(CliError::invalid_argument(
                    "Reorder must name every evidence item exactly once",
                ));
            }
            Ok(Outcome::changed(to_value(workspace.evidence())?))
        }
    }
}

fn rate(
    workspace: &mut Workspace,
    evidence_label: &str,
    hypothesis_label: &str,
    rating: &str,
    notes: Option<String>,
) -> CliResult<Outcome> {
    let e = evidence_id(workspace, evidence_label)?;
    let h = hypothesis_id(workspace, hypothesis_label)?;
    let rating = parse_arg::<Rating>(rating)?;

    workspace.set_rating(e, h, rating);
    if let Some(notes) = optional_text(notes) {
        workspace.set_rating_notes(e, h, notes);
    }

    let cell = active(workspace)?.cell(e, h);
    Ok(Outcome::changed(json!({
        "evidence": evidence_label.to_ascii_uppercase(),
        "hypothesis": hypothesis_label.to_ascii_uppercase(),
        "rating": rating.code(),
        "notes": cell.and_then(|c| c.notes.clone()),
    })))
}

fn milestone(workspace: &mut Workspace, action: MilestoneAction) -> CliResult<Outcome> {
    match action {
        MilestoneAction::Add {
            hypothesis,
            description,
            expected_by,
        } => {
            let h = hypothesis_id(workspace, &hypothesis)?;
            let expected_by = expected_by.map(|d| parse_date(&d)).transpose()?;
            let created = workspace
                .add_milestone(h, description, expected_by)
                .ok_or_else(|| CliError::not_found("Hypothesis", &hypothesis))?;
            Ok(Outcome::changed(to_value(created)?))
        }
        MilestoneAction::List { hypothesis } => {
            active(workspace)?;
            let listed = match hypothesis {
                Some(label) => {
                    let h = hypothesis_id(workspace, &label)?;
                    to_value(workspace.milestones_for(h))?
                }
                None => to_value(workspace.milestones())?,
            };
            Ok(Outcome::read(listed))
        }
        MilestoneAction::Update {
            id,
            description,
            observed,
            observed_at,
            notes,
        } => {
            active(workspace)?;
            let id = parse_uuid(&id, "milestone id")?;
            let update = MilestoneUpdate {
                description,
                expected_by: None,
                observed: observed.map(|o| parse_arg::<Observation>(&o)).transpose()?,
                observed_at: observed_at
                    .map(|d| parse_date(&d).map(Some))
                    .transpose()?,
                observation_notes: optional_text(notes),
            };
            if update.is_empty() {
                return Err(CliError::invalid_argument("Nothing to update"));
            }
            if !workspace.update_milestone(id, update) {
                return Err(CliError::not_found("Milestone", &id.to_string()));
            }
            let updated = workspace.milestones().iter().find(|m| m.id == id);
            Ok(Outcome::changed(to_value(updated)?))
        }
        MilestoneAction::Delete { id } => {
            active(workspace)?;
            let id = parse_uuid(&id, "milestone id")?;
            if !workspace.delete_milestone(id) {
                return Err(CliError::not_found("Milestone", &id.to_string()));
            }
            Ok(Outcome::changed(json!({ "deleted": id })))
        }
    }
}

fn snapshot(workspace: &mut Workspace, action: SnapshotAction) -> CliResult<Outcome> {
    match action {
        SnapshotAction::Create { label, description } => {
            let created = workspace
                .create_snapshot(label, description)
                .ok_or_else(CliError::no_active_analysis)?;
            Ok(Outcome::changed(json!({
                "id": created.id,
                "label": created.label,
                "created_at": created.created_at,
            })))
        }
        SnapshotAction::List => {
            active(workspace)?;
            let listed: Vec<Value> = workspace
                .snapshots()
                .iter()
                .map(|s| {
                    json!({
                        "id": s.id,
                        "label": s.label,
                        "description": s.description,
                        "created_at": s.created_at,
                    })
                })
                .collect();
            Ok(Outcome::read(Value::Array(listed)))
        }
        SnapshotAction::Show { id } => {
            let id = parse_uuid(&id, "snapshot id")?;
            let found = workspace
                .get_snapshot(id)
                .ok_or_else(|| CliError::not_found("Snapshot", &id.to_string()))?;
            Ok(Outcome::read(to_value(found)?))
        }
        SnapshotAction::Compare { id } => {
            let id = parse_uuid(&id, "snapshot id")?;
            let diff = workspace
                .compare_snapshot(id)
                .ok_or_else(|| CliError::not_found("Snapshot", &id.to_string()))?;
            Ok(Outcome::read(to_value(diff)?))
        }
        SnapshotAction::Restore { id } => {
            let id = parse_uuid(&id, "snapshot id")?;
            if !workspace.restore_snapshot(id) {
                return Err(CliError::not_found("Snapshot", &id.to_string()));
            }
            Ok(Outcome::changed(summary(active(workspace)?)))
        }
    }
}

fn step(workspace: &mut Workspace, action: StepAction) -> CliResult<Outcome> {
    active(workspace)?;
    let changed = match action {
        StepAction::Show => false,
        StepAction::Go { step } => {
            require_step(step)?;
            workspace.go_to_step(step)
        }
        StepAction::Next => workspace.next_step(),
        StepAction::Prev => workspace.prev_step(),
        StepAction::Complete { step } => {
            require_step(step)?;
            workspace.mark_step_complete(step)
        }
    };
    Ok(Outcome::when(changed, step_status(active(workspace)?)))
}

fn require_step(step: u8) -> CliResult<()> {
    if workflow::is_valid_step(step) {
        Ok(())
    } else {
        Err(CliError::invalid_argument(format!(
            "Step must be between 1 and {}, got {}",
            workflow::STEPS.len(),
            step
        )))
    }
}

fn step_status(analysis: &Analysis) -> Value {
    let steps: Vec<Value> = workflow::STEPS
        .iter()
        .map(|s| {
            json!({
                "number": s.number,
                "title": s.title,
                "complete": analysis.completed_steps.contains(&s.number),
                "current": s.number == analysis.current_step,
            })
        })
        .collect();
    json!({
        "current_step": analysis.current_step,
        "completed": analysis.completed_steps.len(),
        "steps": steps,
    })
}

fn export_report(
    workspace: &Workspace,
    config: &AchConfig,
    format: Option<String>,
    output: Option<std::path::PathBuf>,
) -> CliResult<Outcome> {
    let format = match format {
        Some(f) => parse_arg::<ExportFormat>(&f)?,
        None => config.export_format()?,
    };
    let report = workspace.report().ok_or_else(CliError::no_active_analysis)?;
    let content = export::render(&report, format)?;

    match output {
        Some(path) => {
            fs::write(&path, &content).map_err(|e| {
                CliError::io_error(format!("Failed to write {}: {}", path.display(), e))
            })?;
            Ok(Outcome::read(json!({
                "format": format.as_str(),
                "path": path.display().to_string(),
            })))
        }
        None => Ok(Outcome::read(json!({
            "format": format.as_str(),
            "content": content,
        }))),
    }
}

fn active(workspace: &Workspace) -> CliResult<&Analysis> {
    workspace
        .active_analysis()
        .ok_or_else(CliError::no_active_analysis)
}

fn summary(analysis: &Analysis) -> Value {
    json!({
        "id": analysis.id,
        "title": analysis.title,
        "status": analysis.status,
        "updated_at": analysis.updated_at,
    })
}

fn hypothesis_id(workspace: &Workspace, label: &str) -> CliResult<HypothesisId> {
    active(workspace)?
        .hypothesis_by_label(label.trim())
        .map(|h| h.id)
        .ok_or_else(|| CliError::not_found("Hypothesis", label))
}

fn evidence_id(workspace: &Workspace, label: &str) -> CliResult<EvidenceId> {
    active(workspace)?
        .evidence_by_label(label.trim())
        .map(|e| e.id)
        .ok_or_else(|| CliError::not_found("Evidence", label))
}

fn parse_uuid(s: &str, what: &str) -> CliResult<Uuid> {
    Uuid::parse_str(s.trim())
        .map_err(|e| CliError::invalid_argument(format!("Invalid {} '{}': {}", what, s, e)))
}

fn parse_date(s: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| {
        CliError::invalid_argument(format!("Invalid date '{}', expected YYYY-MM-DD: {}", s, e))
    })
}

fn parse_arg<T>(s: &str) -> CliResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    s.parse::<T>()
        .map_err(|e| CliError::invalid_argument(e.to_string()))
}

/// `Some("")` clears an optional field
fn optional_text(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| if v.trim().is_empty() { None } else { Some(v) })
}

fn to_value<T: Serialize>(value: T) -> CliResult<Value> {
    Ok(serde_json::to_value(value)?)
}
