//! Opinion entities and the triage-level vocabulary

use crate::core::error::AggregationError;
use crate::opinion::role::Role;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Triage urgency level reported by a role
///
/// The three defined levels carry an ordinal encoding used for the
/// disagreement metric; `Unknown` means the role declined to place the
/// case and never enters that metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TriageLevel {
    SelfCare,
    Consult,
    Urgent,
    #[default]
    Unknown,
}

impl TriageLevel {
    /// Ordinal encoding for disagreement scoring; `Unknown` has none
    pub fn ordinal(&self) -> Option<u8> {
        match self {
            TriageLevel::SelfCare => Some(0),
            TriageLevel::Consult => Some(1),
            TriageLevel::Urgent => Some(2),
            TriageLevel::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TriageLevel::SelfCare => "self_care",
            TriageLevel::Consult => "consult",
            TriageLevel::Urgent => "urgent",
            TriageLevel::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TriageLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Providers emit both "self-care" and "self_care"
        match s.to_lowercase().replace('-', "_").as_str() {
            "self_care" => Ok(TriageLevel::SelfCare),
            "consult" => Ok(TriageLevel::Consult),
            "urgent" => Ok(TriageLevel::Urgent),
            "unknown" => Ok(TriageLevel::Unknown),
            _ => Err(format!("Unknown triage level: {}", s)),
        }
    }
}

/// A single role's structured assessment of a case
///
/// Produced by one provider call in Round 1 and immutable afterwards.
/// Scores are optional because not every role reports them: Evidence
/// assesses data quality only, and Ethics may answer with nothing but a
/// veto.
///
/// # Example
///
/// ```
/// use triage_domain::{Opinion, Role, TriageLevel};
///
/// let opinion = Opinion::new(Role::Risk, TriageLevel::Urgent)
///     .with_risk_score(90)
///     .with_confidence(60)
///     .with_red_flag("possible meningitis");
/// assert!(opinion.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opinion {
    /// Role that produced this opinion
    pub role: Role,
    /// Where this role places the case
    #[serde(default)]
    pub triage_level: TriageLevel,
    /// Risk estimate in [0, 100], if this role reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u8>,
    /// Self-assessed confidence in [0, 100], if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    /// Indicators of potentially serious findings
    #[serde(default)]
    pub red_flags: Vec<String>,
    /// Absolute safety override; only Ethics asserts this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veto: Option<bool>,
    /// Role-specific fields (symptom summary, worst-case analysis, ...)
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Opinion {
    pub fn new(role: Role, triage_level: TriageLevel) -> Self {
        Self {
            role,
            triage_level,
            risk_score: None,
            confidence: None,
            red_flags: Vec::new(),
            veto: None,
            extra: Map::new(),
        }
    }

    pub fn with_risk_score(mut self, score: u8) -> Self {
        self.risk_score = Some(score);
        self
    }

    pub fn with_confidence(mut self, confidence: u8) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_red_flag(mut self, flag: impl Into<String>) -> Self {
        self.red_flags.push(flag.into());
        self
    }

    pub fn with_red_flags(mut self, flags: Vec<String>) -> Self {
        self.red_flags = flags;
        self
    }

    pub fn with_veto(mut self, veto: bool) -> Self {
        self.veto = Some(veto);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Whether this opinion asserts a veto
    pub fn has_veto(&self) -> bool {
        self.veto == Some(true)
    }

    /// Check field constraints before aggregation.
    ///
    /// A violation is surfaced with the offending role and field; values
    /// are never clamped into range.
    pub fn validate(&self) -> Result<(), AggregationError> {
        if let Some(score) = self.risk_score {
            if score > 100 {
                return Err(AggregationError::out_of_range(
                    self.role,
                    "risk_score",
                    score as i64,
                ));
            }
        }
        if let Some(confidence) = self.confidence {
            if confidence > 100 {
                return Err(AggregationError::out_of_range(
                    self.role,
                    "confidence",
                    confidence as i64,
                ));
            }
        }
        Ok(())
    }
}

/// Partial re-assessment from a Round 2 review
///
/// Only red flags and the veto are meaningful here; a reviewer that finds
/// nothing new returns an empty findings value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewFindings {
    /// Reviewing role (Risk or Ethics)
    pub role: Role,
    /// Red flags the reviewer believes Round 1 missed
    #[serde(default)]
    pub red_flags: Vec<String>,
    /// Safety veto asserted on review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veto: Option<bool>,
    /// Role-specific fields
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl ReviewFindings {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            red_flags: Vec::new(),
            veto: None,
            extra: Map::new(),
        }
    }

    /// Findings that add nothing: no flags, no veto.
    ///
    /// Used by the explicit degrade policy when a review call fails.
    pub fn empty(role: Role) -> Self {
        Self::new(role)
    }

    pub fn with_red_flag(mut self, flag: impl Into<String>) -> Self {
        self.red_flags.push(flag.into());
        self
    }

    pub fn with_red_flags(mut self, flags: Vec<String>) -> Self {
        self.red_flags = flags;
        self
    }

    pub fn with_veto(mut self, veto: bool) -> Self {
        self.veto = Some(veto);
        self
    }

    pub fn has_veto(&self) -> bool {
        self.veto == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_encoding() {
        assert_eq!(TriageLevel::SelfCare.ordinal(), Some(0));
        assert_eq!(TriageLevel::Consult.ordinal(), Some(1));
        assert_eq!(TriageLevel::Urgent.ordinal(), Some(2));
        assert_eq!(TriageLevel::Unknown.ordinal(), None);
    }

    #[test]
    fn test_parse_triage_level_accepts_both_spellings() {
        assert_eq!("self-care".parse::<TriageLevel>(), Ok(TriageLevel::SelfCare));
        assert_eq!("self_care".parse::<TriageLevel>(), Ok(TriageLevel::SelfCare));
        assert_eq!("URGENT".parse::<TriageLevel>(), Ok(TriageLevel::Urgent));
        assert!("critical".parse::<TriageLevel>().is_err());
    }

    #[test]
    fn test_opinion_builder() {
        let opinion = Opinion::new(Role::Symptom, TriageLevel::Consult)
            .with_risk_score(50)
            .with_confidence(80)
            .with_red_flag("stiff neck");

        assert_eq!(opinion.risk_score, Some(50));
        assert_eq!(opinion.confidence, Some(80));
        assert_eq!(opinion.red_flags, vec!["stiff neck".to_string()]);
        assert!(!opinion.has_veto());
    }

    #[test]
    fn test_validate_rejects_out_of_range_score() {
        let opinion = Opinion::new(Role::Risk, TriageLevel::Urgent).with_risk_score(150);
        let err = opinion.validate().unwrap_err();
        assert_eq!(err.role, Role::Risk);
        assert_eq!(err.field, "risk_score");
    }

    #[test]
    fn test_validate_rejects_out_of_range_confidence() {
        let opinion = Opinion::new(Role::Evidence, TriageLevel::Unknown).with_confidence(101);
        let err = opinion.validate().unwrap_err();
        assert_eq!(err.field, "confidence");
    }

    #[test]
    fn test_empty_findings_add_nothing() {
        let findings = ReviewFindings::empty(Role::Ethics);
        assert!(findings.red_flags.is_empty());
        assert!(!findings.has_veto());
    }
}
