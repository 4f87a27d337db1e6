//! Domain error types

use crate::opinion::role::Role;
use thiserror::Error;

/// Case input rejected before Round 1 begins
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("case input is missing symptoms")]
    MissingSymptoms,

    #[error("case input is missing age")]
    MissingAge,
}

/// A structurally well-formed opinion violated a field constraint.
///
/// Raised during aggregation when a provider returns a score outside
/// `[0, 100]` or a triage level outside the known vocabulary. The
/// offending role and field are always named; values are never silently
/// clamped into range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{role} opinion rejected: field `{field}` {problem}")]
pub struct AggregationError {
    /// Role whose opinion violated the constraint
    pub role: Role,
    /// Name of the offending field
    pub field: &'static str,
    /// What was wrong with it
    pub problem: String,
}

impl AggregationError {
    pub fn out_of_range(role: Role, field: &'static str, value: i64) -> Self {
        Self {
            role,
            field,
            problem: format!("value {} is outside [0, 100]", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_error_names_role_and_field() {
        let err = AggregationError::out_of_range(Role::Risk, "risk_score", 150);
        let msg = err.to_string();
        assert!(msg.contains("Risk"));
        assert!(msg.contains("risk_score"));
        assert!(msg.contains("150"));
    }
}
