//! # Evidence

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Evidence identifier
pub type EvidenceId = Uuid;

/// What sort of item the evidence is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    #[default]
    Fact,
    Testimony,
    Document,
    Assumption,
    Argument,
}

impl EvidenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceKind::Fact => "fact",
            EvidenceKind::Testimony => "testimony",
            EvidenceKind::Document => "document",
            EvidenceKind::Assumption => "assumption",
            EvidenceKind::Argument => "argument",
        }
    }
}

impl fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EvidenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fact" => Ok(EvidenceKind::Fact),
            "testimony" => Ok(EvidenceKind::Testimony),
            "document" => Ok(EvidenceKind::Document),
            "assumption" => Ok(EvidenceKind::Assumption),
            "argument" => Ok(EvidenceKind::Argument),
            other => Err(format!("Unknown evidence kind: {}", other)),
        }
    }
}

/// How much the source can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reliability {
    High,
    #[default]
    Medium,
    Low,
}

impl Reliability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reliability::High => "high",
            Reliability::Medium => "medium",
            Reliability::Low => "low",
        }
    }
}

impl fmt::Display for Reliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Reliability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Reliability::High),
            "medium" => Ok(Reliability::Medium),
            "low" => Ok(Reliability::Low),
            other => Err(format!("Unknown reliability: {}", other)),
        }
    }
}

/// A piece of evidence or argument rated against every hypothesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub id: EvidenceId,

    /// `E<n>`, unique within the analysis and never reused
    pub label: String,

    pub description: String,

    #[serde(rename = "type", default)]
    pub kind: EvidenceKind,

    #[serde(default)]
    pub reliability: Reliability,

    /// Citation for where the evidence came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    pub order: usize,

    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the caller when adding evidence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewEvidence {
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: EvidenceKind,
    #[serde(default)]
    pub reliability: Reliability,
    #[serde(default)]
    pub source: Option<String>,
}

impl NewEvidence {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: EvidenceKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_reliability(mut self, reliability: Reliability) -> Self {
        self.reliability = reliability;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Evidence {
    pub(crate) fn from_new(label: String, order: usize, new: NewEvidence) -> Self {
        Self {
            id: Uuid::new_v4(),
            label,
            description: new.description,
            kind: new.kind,
            reliability: new.reliability,
            source: new.source,
            order,
            created_at: Utc::now(),
        }
    }
}

/// Partial update for an evidence item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvidenceUpdate {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<EvidenceKind>,
    #[serde(default)]
    pub reliability: Option<Reliability>,
    /// `Some(None)` clears the citation
    #[serde(default)]
    pub source: Option<Option<String>>,
}

impl EvidenceUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.kind.is_none()
            && self.reliability.is_none()
            && self.source.is_none()
    }

    pub(crate) fn apply(self, evidence: &mut Evidence) {
        if let Some(description) = self.description {
            evidence.description = description;
        }
        if let Some(kind) = self.kind {
            evidence.kind = kind;
        }
        if let Some(reliability) = self.reliability {
            evidence.reliability = reliability;
        }
        if let Some(source) = self.source {
            evidence.source = source;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&EvidenceKind::Testimony).unwrap();
        assert_eq!(json, "\"testimony\"");
    }

    #[test]
    fn test_update_leaves_unset_fields() {
        let mut evidence = Evidence::from_new("E1".into(), 0, NewEvidence::new("radar contact"));
        EvidenceUpdate {
            reliability: Some(Reliability::Low),
            ..Default::default()
        }
        .apply(&mut evidence);

        assert_eq!(evidence.description, "radar contact");
        assert_eq!(evidence.reliability, Reliability::Low);
        assert_eq!(evidence.kind, EvidenceKind::Fact);
    }

    #[test]
    fn test_parse_kind_and_reliability() {
        assert_eq!("Document".parse::<EvidenceKind>().unwrap(), EvidenceKind::Document);
        assert_eq!("HIGH".parse::<Reliability>().unwrap(), Reliability::High);
        assert!("rumour".parse::<EvidenceKind>().is_err());
    }
}
