//! Deliberation run configuration
//!
//! Everything that used to be ambient process state in systems like this
//! (timeouts, retry toggles, failure policies) is an explicit value
//! passed to the orchestrator at construction.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What to do when a Round 2 review call fails
///
/// Round 1 failures always abort the run. Round 2 is different only
/// because a review adds findings on top of an already complete opinion
/// set - but degrading must still be an explicit choice, never a silent
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewFailurePolicy {
    /// Abort the run (default, safer)
    #[default]
    Abort,
    /// Treat the failed review as contributing no new findings
    NoNewFindings,
}

impl std::str::FromStr for ReviewFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(ReviewFailurePolicy::Abort),
            "no_new_findings" => Ok(ReviewFailurePolicy::NoNewFindings),
            _ => Err(format!(
                "Unknown review failure policy: {}. Valid: abort, no_new_findings",
                s
            )),
        }
    }
}

/// Parameters governing one deliberation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliberationParams {
    /// Deadline per provider call
    pub call_timeout: Duration,
    /// Retries per failed call; providers are stateless classifiers so a
    /// bounded retry is safe
    pub max_retries: u8,
    /// Round 2 failure handling
    pub review_failure_policy: ReviewFailurePolicy,
}

impl Default for DeliberationParams {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(60),
            max_retries: 1,
            review_failure_policy: ReviewFailurePolicy::default(),
        }
    }
}

impl DeliberationParams {
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Disable retries entirely
    pub fn without_retries(mut self) -> Self {
        self.max_retries = 0;
        self
    }

    /// Opt into the degrade-on-review-failure mode
    pub fn degrade_reviews(mut self) -> Self {
        self.review_failure_policy = ReviewFailurePolicy::NoNewFindings;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_aborts() {
        let params = DeliberationParams::default();
        assert_eq!(params.review_failure_policy, ReviewFailurePolicy::Abort);
        assert_eq!(params.max_retries, 1);
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!(
            "abort".parse::<ReviewFailurePolicy>(),
            Ok(ReviewFailurePolicy::Abort)
        );
        assert_eq!(
            "no_new_findings".parse::<ReviewFailurePolicy>(),
            Ok(ReviewFailurePolicy::NoNewFindings)
        );
        assert!("ignore".parse::<ReviewFailurePolicy>().is_err());
    }
}
