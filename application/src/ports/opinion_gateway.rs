//! Opinion gateway port
//!
//! Defines the interface for obtaining structured opinions from the four
//! specialist roles. Implementations (adapters) live in the
//! infrastructure layer; the deliberation engine never knows how an
//! opinion was produced.

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;
use triage_domain::{CaseInput, Opinion, ReviewFindings, Role};

/// What went wrong inside a provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Provider could not be reached
    Unreachable,
    /// Call exceeded the configured deadline
    Timeout,
    /// Response could not be parsed into the expected opinion shape
    Malformed,
    /// Provider answered but declined the request
    Rejected,
}

impl ProviderErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderErrorKind::Unreachable => "unreachable",
            ProviderErrorKind::Timeout => "timeout",
            ProviderErrorKind::Malformed => "malformed response",
            ProviderErrorKind::Rejected => "rejected",
        }
    }
}

/// A provider call that failed, naming the role it was serving
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{role} provider failed ({}): {detail}", kind.as_str())]
pub struct ProviderError {
    pub role: Role,
    pub kind: ProviderErrorKind,
    pub detail: String,
}

impl ProviderError {
    pub fn new(role: Role, kind: ProviderErrorKind, detail: impl Into<String>) -> Self {
        Self {
            role,
            kind,
            detail: detail.into(),
        }
    }

    pub fn timeout(role: Role) -> Self {
        Self::new(role, ProviderErrorKind::Timeout, "call deadline exceeded")
    }

    pub fn malformed(role: Role, detail: impl Into<String>) -> Self {
        Self::new(role, ProviderErrorKind::Malformed, detail)
    }

    /// Whether retrying this call could plausibly succeed.
    ///
    /// Providers are stateless classifiers, so repeating a transport-level
    /// failure is safe; a malformed or rejected answer tends to repeat.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ProviderErrorKind::Unreachable | ProviderErrorKind::Timeout
        )
    }
}

/// Gateway for obtaining role opinions
///
/// `classify` serves Round 1 for all four roles; `review` serves Round 2
/// and is only ever invoked for the reviewer roles (Risk, Ethics). The
/// two contracts are kept separate so an initial opinion and a partial
/// re-assessment stay independently typed and testable.
#[async_trait]
pub trait OpinionGateway: Send + Sync {
    /// Produce a role's independent Round 1 opinion for a case
    async fn classify(&self, role: Role, case: &CaseInput) -> Result<Opinion, ProviderError>;

    /// Produce a role's Round 2 review of the full round-1 opinion set
    async fn review(
        &self,
        role: Role,
        round1: &BTreeMap<Role, Opinion>,
    ) -> Result<ReviewFindings, ProviderError>;
}
