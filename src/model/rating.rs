//! Rating scale for the hypothesis/evidence matrix
//!
//! A rating carries two numeric projections that must never be mixed up:
//! - inconsistency weight, used by hypothesis scoring
//! - polarity, used by diagnosticity
//!
//! Both are methods on the enum so each engine names the projection it uses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How consistent one piece of evidence is with one hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rating {
    /// CC
    #[serde(rename = "CC")]
    VeryConsistent,
    /// C
    #[serde(rename = "C")]
    Consistent,
    /// N
    #[serde(rename = "N")]
    Neutral,
    /// I
    #[serde(rename = "I")]
    Inconsistent,
    /// II
    #[serde(rename = "II")]
    VeryInconsistent,
    /// Empty cell
    #[default]
    #[serde(rename = "")]
    Unrated,
}

impl Rating {
    /// All ratings, most consistent first.
    pub const ALL: [Rating; 6] = [
        Rating::VeryConsistent,
        Rating::Consistent,
        Rating::Neutral,
        Rating::Inconsistent,
        Rating::VeryInconsistent,
        Rating::Unrated,
    ];

    /// Contradiction weight counted against a hypothesis.
    pub fn inconsistency_weight(&self) -> u32 {
        match self {
            Rating::Inconsistent => 1,
            Rating::VeryInconsistent => 2,
            Rating::VeryConsistent | Rating::Consistent | Rating::Neutral | Rating::Unrated => 0,
        }
    }

    /// Support credit counted in favour of a hypothesis.
    pub fn consistency_credit(&self) -> u32 {
        match self {
            Rating::VeryConsistent => 2,
            Rating::Consistent => 1,
            _ => 0,
        }
    }

    /// Signed value on a -2..=2 axis, used to measure spread across hypotheses.
    pub fn polarity(&self) -> i32 {
        match self {
            Rating::VeryConsistent => 2,
            Rating::Consistent => 1,
            Rating::Neutral | Rating::Unrated => 0,
            Rating::Inconsistent => -1,
            Rating::VeryInconsistent => -2,
        }
    }

    /// Matrix cell code ("CC", "C", "N", "I", "II", or "" for unrated).
    pub fn code(&self) -> &'static str {
        match self {
            Rating::VeryConsistent => "CC",
            Rating::Consistent => "C",
            Rating::Neutral => "N",
            Rating::Inconsistent => "I",
            Rating::VeryInconsistent => "II",
            Rating::Unrated => "",
        }
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            Rating::VeryConsistent => "Very Consistent",
            Rating::Consistent => "Consistent",
            Rating::Neutral => "Neutral",
            Rating::Inconsistent => "Inconsistent",
            Rating::VeryInconsistent => "Very Inconsistent",
            Rating::Unrated => "Unrated",
        }
    }

    pub fn is_rated(&self) -> bool {
        !matches!(self, Rating::Unrated)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned when a rating code is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown rating code: {0}")]
pub struct UnknownRating(pub String);

impl FromStr for Rating {
    type Err = UnknownRating;

    /// Accepts the matrix codes case-insensitively. An empty string or "-"
    /// clears the cell.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CC" => Ok(Rating::VeryConsistent),
            "C" => Ok(Rating::Consistent),
            "N" => Ok(Rating::Neutral),
            "I" => Ok(Rating::Inconsistent),
            "II" => Ok(Rating::VeryInconsistent),
            "" | "-" => Ok(Rating::Unrated),
            _ => Err(UnknownRating(s.to_string())),
        }
    }
}
