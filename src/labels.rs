//! Label and color allocation for new hypotheses and evidence
//!
//! Labels are `H<n>` / `E<n>`. The next number is one past the highest
//! number among the existing labels, or one past the analysis' high-water
//! mark if that is higher, so a deleted label is never handed out again.
//! Labels that do not match `^H\d+$` (resp. `^E\d+$`) are ignored.
//!
//! Colors cycle an 8-entry palette by the number of items present at
//! creation time, not by label number.

use std::sync::OnceLock;

use regex::Regex;

/// Display palette cycled by item count
pub const PALETTE: [&str; 8] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
];

/// Label family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Hypothesis,
    Evidence,
}

impl LabelKind {
    pub fn prefix(&self) -> char {
        match self {
            LabelKind::Hypothesis => 'H',
            LabelKind::Evidence => 'E',
        }
    }

    fn pattern(&self) -> &'static Regex {
        static HYPOTHESIS: OnceLock<Regex> = OnceLock::new();
        static EVIDENCE: OnceLock<Regex> = OnceLock::new();
        // Literal patterns; compilation cannot fail.
        match self {
            LabelKind::Hypothesis => {
                HYPOTHESIS.get_or_init(|| Regex::new(r"^H(\d+)$").expect("valid label pattern"))
            }
            LabelKind::Evidence => {
                EVIDENCE.get_or_init(|| Regex::new(r"^E(\d+)$").expect("valid label pattern"))
            }
        }
    }

    /// Numeric suffix of a well-formed label
    pub fn label_number(&self, label: &str) -> Option<u32> {
        self.pattern()
            .captures(label)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

/// Highest label number among `labels`, 0 when none match.
pub fn highest_label_number<'a, I>(kind: LabelKind, labels: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    labels
        .into_iter()
        .filter_map(|label| kind.label_number(label))
        .max()
        .unwrap_or(0)
}

/// Next label number given the existing labels and the high-water mark.
pub fn next_label_number<'a, I>(kind: LabelKind, labels: I, high_water: u32) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    highest_label_number(kind, labels).max(high_water) + 1
}

/// Next label (`H4`, `E12`, ...)
pub fn next_label<'a, I>(kind: LabelKind, labels: I, high_water: u32) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    format!("{}{}", kind.prefix(), next_label_number(kind, labels, high_water))
}

/// Palette color for the item about to be created
pub fn color_for(current_count: usize) -> &'static str {
    PALETTE[current_count % PALETTE.len()]
}
