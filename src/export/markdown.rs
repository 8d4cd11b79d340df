//! Markdown rendering of an [`AnalysisReport`]

use std::fmt::{self, Write};

use super::report::AnalysisReport;
use crate::workflow;

/// Render the report as a Markdown document
pub fn to_markdown(report: &AnalysisReport) -> String {
    let mut out = String::with_capacity(4096);
    // Writing into a String cannot fail
    let _ = write_report(report, &mut out);
    out
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn write_report(report: &AnalysisReport, out: &mut String) -> fmt::Result {
    writeln!(out, "# {}", report.title)?;
    writeln!(out)?;
    writeln!(out, "**Focus question:** {}", report.focus_question)?;
    writeln!(out)?;
    if let Some(description) = &report.description {
        writeln!(out, "{}", description)?;
        writeln!(out)?;
    }
    let step_title = workflow::step(report.current_step)
        .map(|s| s.title)
        .unwrap_or("");
    writeln!(
        out,
        "Status: {} | Step {} ({}) | {} of {} steps complete | Matrix {}% rated ({}/{})",
        report.status.as_str(),
        report.current_step,
        step_title,
        report.completed_steps.len(),
        workflow::STEPS.len(),
        report.completion.percentage,
        report.completion.rated,
        report.completion.total,
    )?;
    writeln!(out)?;

    writeln!(out, "## Conclusions")?;
    writeln!(out)?;
    if report.hypotheses.is_empty() {
        writeln!(out, "No hypotheses recorded.")?;
    } else {
        writeln!(out, "| Rank | Hypothesis | Description | Inconsistency | Consistency |")?;
        writeln!(out, "|---|---|---|---|---|")?;
        for h in report.ranked_hypotheses() {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                h.rank,
                h.label,
                cell(&h.description),
                h.inconsistency_score,
                h.consistency_score
            )?;
        }
    }
    writeln!(out)?;

    writeln!(out, "## Evidence")?;
    writeln!(out)?;
    if report.evidence.is_empty() {
        writeln!(out, "No evidence recorded.")?;
    } else {
        writeln!(out, "| Evidence | Description | Type | Reliability | Diagnosticity |")?;
        writeln!(out, "|---|---|---|---|---|")?;
        for e in &report.evidence {
            let flag = if e.is_high_diagnostic {
                " (high)"
            } else if e.is_low_diagnostic {
                " (low)"
            } else {
                ""
            };
            writeln!(
                out,
                "| {} | {} | {} | {} | {:.2}{} |",
                e.label,
                cell(&e.description),
                e.kind,
                e.reliability,
                e.diagnosticity_score,
                flag
            )?;
        }
    }
    writeln!(out)?;

    if !report.matrix.is_empty() && !report.hypotheses.is_empty() {
        writeln!(out, "## Matrix")?;
        writeln!(out)?;
        write!(out, "| |")?;
        for h in &report.hypotheses {
            write!(out, " {} |", h.label)?;
        }
        writeln!(out)?;
        write!(out, "|---|")?;
        for _ in &report.hypotheses {
            write!(out, "---|")?;
        }
        writeln!(out)?;
        for row in &report.matrix {
            write!(out, "| {} |", row.evidence_label)?;
            for c in &row.cells {
                let code = if c.rating.is_rated() { c.rating.code() } else { "-" };
                write!(out, " {} |", code)?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "## Sensitivity")?;
    writeln!(out)?;
    let critical: Vec<_> = report.sensitivity.iter().filter(|s| s.is_critical).collect();
    if critical.is_empty() {
        writeln!(out, "Removing any single evidence item leaves the leading hypothesis unchanged.")?;
    } else {
        for s in critical {
            writeln!(
                out,
                "- {} is critical: without it {} leads instead of {}",
                s.evidence_label, s.winner_if_removed, s.original_winner
            )?;
        }
    }
    if !report.sensitivity_notes.trim().is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", report.sensitivity_notes.trim())?;
    }
    writeln!(out)?;

    if !report.milestones.is_empty() {
        writeln!(out, "## Milestones")?;
        writeln!(out)?;
        for m in &report.milestones {
            let due = m
                .expected_by
                .map(|d| format!(" (by {})", d))
                .unwrap_or_default();
            writeln!(
                out,
                "- [{}] {}: {}{}",
                m.observed.as_str(),
                m.hypothesis_label,
                m.description,
                due
            )?;
        }
        writeln!(out)?;
    }

    if !report.snapshots.is_empty() {
        writeln!(out, "## Snapshots")?;
        writeln!(out)?;
        for s in &report.snapshots {
            writeln!(
                out,
                "- {} ({}): {} hypotheses, {} evidence, {} ratings",
                s.label,
                s.created_at.format("%Y-%m-%d %H:%M UTC"),
                s.hypotheses,
                s.evidence,
                s.ratings
            )?;
        }
        writeln!(out)?;
    }

    Ok(())
}
