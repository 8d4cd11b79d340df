//! # Milestones
//!
//! Future indicators attached to a hypothesis: things that should happen
//! (or not) if the hypothesis is correct.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::hypothesis::HypothesisId;

/// Milestone identifier
pub type MilestoneId = Uuid;

/// Whether the expected indicator has shown up.
///
/// Serialized as -1 / 0 / 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Observation {
    Contradicted,
    #[default]
    Pending,
    Observed,
}

impl Observation {
    pub fn value(&self) -> i8 {
        match self {
            Observation::Contradicted => -1,
            Observation::Pending => 0,
            Observation::Observed => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Observation::Contradicted => "contradicted",
            Observation::Pending => "pending",
            Observation::Observed => "observed",
        }
    }
}

impl From<Observation> for i8 {
    fn from(o: Observation) -> Self {
        o.value()
    }
}

impl TryFrom<i8> for Observation {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Observation::Contradicted),
            0 => Ok(Observation::Pending),
            1 => Ok(Observation::Observed),
            other => Err(format!("Invalid observation value: {}", other)),
        }
    }
}

impl std::str::FromStr for Observation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contradicted" | "-1" => Ok(Observation::Contradicted),
            "pending" | "0" => Ok(Observation::Pending),
            "observed" | "1" => Ok(Observation::Observed),
            other => Err(format!("Unknown observation: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: MilestoneId,
    pub hypothesis_id: HypothesisId,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_by: Option<NaiveDate>,
    #[serde(default)]
    pub observed: Observation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Milestone {
    pub fn new(
        hypothesis_id: HypothesisId,
        description: impl Into<String>,
        expected_by: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            hypothesis_id,
            description: description.into(),
            expected_by,
            observed: Observation::Pending,
            observed_at: None,
            observation_notes: None,
            created_at: Utc::now(),
        }
    }
}

/// Partial update for a milestone
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MilestoneUpdate {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub expected_by: Option<Option<NaiveDate>>,
    #[serde(default)]
    pub observed: Option<Observation>,
    #[serde(default)]
    pub observed_at: Option<Option<NaiveDate>>,
    #[serde(default)]
    pub observation_notes: Option<Option<String>>,
}

impl MilestoneUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.expected_by.is_none()
            && self.observed.is_none()
            && self.observed_at.is_none()
            && self.observation_notes.is_none()
    }

    pub(crate) fn apply(self, milestone: &mut Milestone) {
        if let Some(description) = self.description {
            milestone.description = description;
        }
        if let Some(expected_by) = self.expected_by {
            milestone.expected_by = expected_by;
        }
        if let Some(observed) = self.observed {
            milestone.observed = observed;
        }
        if let Some(observed_at) = self.observed_at {
            milestone.observed_at = observed_at;
        }
        if let Some(notes) = self.observation_notes {
            milestone.observation_notes = notes;
        }
    }
}
