//! Deliberation state - the run-local opinion accumulator

use crate::opinion::entities::{Opinion, ReviewFindings};
use crate::opinion::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One synchronized phase of the deliberation protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Round {
    /// Round 1 - independent analysis by all four roles
    Analysis,
    /// Round 2 - challenge pass by Risk and Ethics
    Review,
    /// Round 3 - aggregation, gating, and referral matching
    Synthesis,
}

impl Round {
    pub fn as_str(&self) -> &'static str {
        match self {
            Round::Analysis => "round1",
            Round::Review => "round2",
            Round::Synthesis => "round3",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Round::Analysis => "Round 1: Independent Analysis",
            Round::Review => "Round 2: Challenge & Review",
            Round::Synthesis => "Round 3: Decision Gate",
        }
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Mutable accumulator for one deliberation run
///
/// Holds the round-1 opinions and round-2 review findings keyed by role,
/// so the collected set carries no trace of arrival order. Local to a
/// single run and discarded after synthesis; concurrent runs never share
/// one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliberationState {
    /// Round 1 opinions, one per role
    pub round1: BTreeMap<Role, Opinion>,
    /// Round 2 review findings, one per reviewer
    pub round2: BTreeMap<Role, ReviewFindings>,
}

impl DeliberationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_opinion(&mut self, opinion: Opinion) {
        self.round1.insert(opinion.role, opinion);
    }

    pub fn record_review(&mut self, findings: ReviewFindings) {
        self.round2.insert(findings.role, findings);
    }

    /// Whether every role has delivered a Round 1 opinion.
    ///
    /// Synthesis from a partial set is never allowed; this is the
    /// barrier condition between Round 1 and Round 2.
    pub fn round1_complete(&self) -> bool {
        Role::ALL.iter().all(|role| self.round1.contains_key(role))
    }

    pub fn opinion(&self, role: Role) -> Option<&Opinion> {
        self.round1.get(&role)
    }

    pub fn review(&self, role: Role) -> Option<&ReviewFindings> {
        self.round2.get(&role)
    }
}
