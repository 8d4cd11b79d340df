//! CLI argument definitions using clap
//!
//! Commands:
//! - achdb init
//! - achdb analysis create|list|show|select|update|notes|delete|duplicate
//! - achdb hypothesis add|list|update|delete|reorder
//! - achdb evidence add|list|update|delete|reorder
//! - achdb rate <evidence> <hypothesis> <rating>
//! - achdb milestone add|list|update|delete
//! - achdb score | diagnosticity | sensitivity | completion
//! - achdb snapshot create|list|show|compare|restore
//! - achdb step show|go|next|prev|complete
//! - achdb export | import
//!
//! Hypotheses and evidence are addressed by label (`H2`, `E5`).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// achdb - Analysis of Competing Hypotheses from the command line
#[derive(Parser, Debug)]
#[command(name = "achdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./achdb.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    Init,

    /// Manage analyses
    Analysis {
        #[command(subcommand)]
        action: AnalysisAction,
    },

    /// Manage hypotheses of the active analysis
    Hypothesis {
        #[command(subcommand)]
        action: HypothesisAction,
    },

    /// Manage evidence of the active analysis
    Evidence {
        #[command(subcommand)]
        action: EvidenceAction,
    },

    /// Rate an evidence item against a hypothesis
    Rate {
        /// Evidence label
        evidence: String,
        /// Hypothesis label
        hypothesis: String,
        /// CC, C, N, I, II, or "-" to clear
        rating: String,
        /// Note attached to the cell
        #[arg(long)]
        notes: Option<String>,
    },

    /// Manage milestones of the active analysis
    Milestone {
        #[command(subcommand)]
        action: MilestoneAction,
    },

    /// Rank hypotheses by inconsistency
    Score,

    /// Diagnostic value of each evidence item
    Diagnosticity,

    /// Leave-one-out sensitivity of the leading hypothesis
    Sensitivity,

    /// How much of the matrix is rated
    Completion,

    /// Manage snapshots of the active analysis
    Snapshot {
        #[command(subcommand)]
        action: SnapshotAction,
    },

    /// Move through the eight-step method
    Step {
        #[command(subcommand)]
        action: StepAction,
    },

    /// Export a report of the active analysis
    Export {
        /// markdown or json; defaults to the configured format
        #[arg(long)]
        format: Option<String>,
        /// Write to this file instead of the response body
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Import an analysis previously written by `analysis export-json`
    Import {
        /// Path to the analysis JSON
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum AnalysisAction {
    /// Create an analysis and make it active
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        question: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List all analyses
    List,
    /// Show the active analysis
    Show,
    /// Make an analysis active
    Select { id: String },
    /// Update the active analysis
    Update(AnalysisUpdateArgs),
    /// Replace the sensitivity notes of the active analysis
    Notes { text: String },
    /// Delete an analysis
    Delete { id: String },
    /// Copy an analysis under fresh ids
    Duplicate { id: String },
    /// Print one analysis as importable JSON
    ExportJson { id: String },
}

#[derive(Args, Debug, Default)]
pub struct AnalysisUpdateArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub question: Option<String>,
    /// Empty string clears the description
    #[arg(long)]
    pub description: Option<String>,
    /// draft, in_progress, complete, archived
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum HypothesisAction {
    Add { description: String },
    List,
    Update {
        label: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
        /// Empty string clears the note
        #[arg(long)]
        indicators: Option<String>,
    },
    /// Delete a hypothesis with its ratings and milestones
    Delete { label: String },
    /// New display order, every label exactly once
    Reorder { labels: Vec<String> },
}

#[derive(Subcommand, Debug)]
pub enum EvidenceAction {
    Add {
        description: String,
        /// fact, testimony, document, assumption, argument
        #[arg(long)]
        kind: Option<String>,
        /// high, medium, low
        #[arg(long)]
        reliability: Option<String>,
        #[arg(long)]
        source: Option<String>,
    },
    List,
    Update {
        label: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        reliability: Option<String>,
        /// Empty string clears the source
        #[arg(long)]
        source: Option<String>,
    },
    /// Delete an evidence item with its ratings
    Delete { label: String },
    Reorder { labels: Vec<String> },
}

#[derive(Subcommand, Debug)]
pub enum MilestoneAction {
    Add {
        /// Hypothesis label
        hypothesis: String,
        description: String,
        /// YYYY-MM-DD
        #[arg(long)]
        expected_by: Option<String>,
    },
    List {
        /// Only milestones of this hypothesis
        #[arg(long)]
        hypothesis: Option<String>,
    },
    Update {
        id: String,
        #[arg(long)]
        description: Option<String>,
        /// observed, pending, contradicted
        #[arg(long)]
        observed: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        observed_at: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum SnapshotAction {
    Create {
        label: String,
        #[arg(long)]
        description: Option<String>,
    },
    List,
    Show { id: String },
    /// Changes from a snapshot to the current state
    Compare { id: String },
    /// Put the snapshot's data back into the analysis
    Restore { id: String },
}

#[derive(Subcommand, Debug)]
pub enum StepAction {
    Show,
    Go { step: u8 },
    Next,
    Prev,
    Complete { step: u8 },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
