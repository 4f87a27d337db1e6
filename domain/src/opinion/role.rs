//! Specialist roles participating in a deliberation
//!
//! Roles are a fixed set of tagged variants, not a class hierarchy; each
//! one is bound to a provider capability at the application boundary.

use serde::{Deserialize, Serialize};

/// A specialist role in the deliberation panel
///
/// All four roles produce an independent opinion in Round 1. Risk and
/// Ethics additionally act as reviewers in Round 2.
///
/// # Example
///
/// ```
/// use triage_domain::Role;
///
/// assert!(Role::Risk.is_reviewer());
/// assert!(!Role::Evidence.is_reviewer());
/// assert_eq!("ethics".parse::<Role>(), Ok(Role::Ethics));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Extracts structured symptoms and detects red flags
    Symptom,
    /// Assumes the worst plausible case; penalizes optimism
    Risk,
    /// Scores completeness and quality of the supplied data
    Evidence,
    /// Enforces safety; holds absolute veto power
    Ethics,
}

impl Role {
    /// All roles, in panel order
    pub const ALL: [Role; 4] = [Role::Symptom, Role::Risk, Role::Evidence, Role::Ethics];

    /// Roles that perform the Round 2 challenge pass
    pub const REVIEWERS: [Role; 2] = [Role::Risk, Role::Ethics];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Symptom => "symptom",
            Role::Risk => "risk",
            Role::Evidence => "evidence",
            Role::Ethics => "ethics",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Symptom => "Symptom Interpretation",
            Role::Risk => "Risk Stratification",
            Role::Evidence => "Evidence Quality",
            Role::Ethics => "Ethics & Safety",
        }
    }

    /// Whether this role contributes to max/avg risk aggregation.
    ///
    /// Evidence and Ethics assess data quality and safety, not clinical
    /// risk, so their scores never enter the risk metrics.
    pub fn reports_risk(&self) -> bool {
        matches!(self, Role::Symptom | Role::Risk)
    }

    /// Whether this role performs a Round 2 review
    pub fn is_reviewer(&self) -> bool {
        matches!(self, Role::Risk | Role::Ethics)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "symptom" => Ok(Role::Symptom),
            "risk" => Ok(Role::Risk),
            "evidence" => Ok(Role::Evidence),
            "ethics" => Ok(Role::Ethics),
            _ => Err(format!(
                "Unknown role: {}. Valid: symptom, risk, evidence, ethics",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_contains_every_role_once() {
        assert_eq!(Role::ALL.len(), 4);
        for role in Role::ALL {
            assert_eq!(Role::ALL.iter().filter(|r| **r == role).count(), 1);
        }
    }

    #[test]
    fn test_reviewers_are_risk_and_ethics() {
        assert_eq!(Role::REVIEWERS, [Role::Risk, Role::Ethics]);
        for role in Role::ALL {
            assert_eq!(role.is_reviewer(), Role::REVIEWERS.contains(&role));
        }
    }

    #[test]
    fn test_risk_reporting_roles() {
        assert!(Role::Symptom.reports_risk());
        assert!(Role::Risk.reports_risk());
        assert!(!Role::Evidence.reports_risk());
        assert!(!Role::Ethics.reports_risk());
    }

    #[test]
    fn test_parse_role() {
        assert_eq!("symptom".parse::<Role>(), Ok(Role::Symptom));
        assert_eq!("ETHICS".parse::<Role>(), Ok(Role::Ethics));
        assert!("coordinator".parse::<Role>().is_err());
    }
}
