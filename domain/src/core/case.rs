//! Case input value object

use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};

/// A single health complaint submitted for triage
///
/// Created once per request and never mutated; the engine holds no case
/// history across runs.
///
/// # Example
///
/// ```
/// use triage_domain::CaseInput;
///
/// let case = CaseInput::new("Crushing chest pain", "58", "Hypertension");
/// assert!(case.validate().is_ok());
///
/// let empty = CaseInput::new("", "58", "");
/// assert!(empty.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseInput {
    /// Free-text symptom description
    pub symptoms: String,
    /// Patient age as entered (kept as text; "58" and "about 60" both occur)
    pub age: String,
    /// Relevant medical history, may be empty
    #[serde(default)]
    pub history: String,
}

impl CaseInput {
    pub fn new(
        symptoms: impl Into<String>,
        age: impl Into<String>,
        history: impl Into<String>,
    ) -> Self {
        Self {
            symptoms: symptoms.into(),
            age: age.into(),
            history: history.into(),
        }
    }

    /// Check the input is complete enough to deliberate on.
    ///
    /// Runs before Round 1; an invalid case never reaches a provider.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.symptoms.trim().is_empty() {
            return Err(ValidationError::MissingSymptoms);
        }
        if self.age.trim().is_empty() {
            return Err(ValidationError::MissingAge);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_case() {
        let case = CaseInput::new("headache and fever", "25", "none");
        assert!(case.validate().is_ok());
    }

    #[test]
    fn test_missing_symptoms_rejected() {
        let case = CaseInput::new("   ", "25", "");
        assert!(matches!(
            case.validate(),
            Err(ValidationError::MissingSymptoms)
        ));
    }

    #[test]
    fn test_missing_age_rejected() {
        let case = CaseInput::new("headache", "", "");
        assert!(matches!(case.validate(), Err(ValidationError::MissingAge)));
    }
}
