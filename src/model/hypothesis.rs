//! # Hypothesis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hypothesis identifier
pub type HypothesisId = Uuid;

/// One of the competing explanations under evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub id: HypothesisId,

    /// `H<n>`, unique within the analysis and never reused
    pub label: String,

    pub description: String,

    /// Display color (hex)
    pub color: String,

    /// Display order
    pub order: usize,

    /// What we would expect to see next if this hypothesis holds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_indicators: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Hypothesis {
    /// Create a new hypothesis with a fresh id
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        color: impl Into<String>,
        order: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            description: description.into(),
            color: color.into(),
            order,
            future_indicators: None,
            created_at: Utc::now(),
        }
    }
}

/// Partial update for a hypothesis. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HypothesisUpdate {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    /// `Some(None)` clears the note
    #[serde(default)]
    pub future_indicators: Option<Option<String>>,
}

impl HypothesisUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.color.is_none() && self.future_indicators.is_none()
    }

    pub(crate) fn apply(self, hypothesis: &mut Hypothesis) {
        if let Some(description) = self.description {
            hypothesis.description = description;
        }
        if let Some(color) = self.color {
            hypothesis.color = color;
        }
        if let Some(indicators) = self.future_indicators {
            hypothesis.future_indicators = indicators;
        }
    }
}
