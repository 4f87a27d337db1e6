//! Audit sink port
//!
//! A deliberation is meant to be auditable after the fact: the full
//! opinion set, the metrics, and the gated outcome are handed to an audit
//! sink once synthesis completes. Sinks must never influence the run -
//! a failing sink is logged and ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use triage_domain::{CaseInput, Decision, DeliberationState};

/// One completed deliberation, ready for the audit trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// When synthesis completed
    pub timestamp: DateTime<Utc>,
    /// The case as submitted
    pub case: CaseInput,
    /// Everything the panel said, both rounds
    pub state: DeliberationState,
    /// The gated outcome
    pub decision: Decision,
}

impl AuditRecord {
    pub fn new(case: CaseInput, state: DeliberationState, decision: Decision) -> Self {
        Self {
            timestamp: Utc::now(),
            case,
            state,
            decision,
        }
    }
}

/// Destination for completed deliberation records
pub trait AuditSink: Send + Sync {
    /// Record a completed deliberation. Errors are the sink's problem;
    /// the run has already produced its decision.
    fn record(&self, record: &AuditRecord);
}

/// No-op sink for callers that keep no audit trail
pub struct NoAudit;

impl AuditSink for NoAudit {
    fn record(&self, _record: &AuditRecord) {}
}
