//! Domain layer for triage-council
//!
//! This crate contains the core deliberation logic, entities, and value
//! objects. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Deliberation
//!
//! A deliberation is one run of the three-round triage protocol:
//!
//! - **Round 1 (Analysis)**: Four specialist roles each produce an
//!   independent structured [`Opinion`] about a case
//! - **Round 2 (Review)**: Risk and Ethics re-examine the round-1 opinions
//!   for missed red flags and safety vetoes
//! - **Round 3 (Synthesis)**: Opinions reduce to [`Metrics`], the decision
//!   gate maps metrics to a final category, and referrals are matched
//!
//! The gate is a deterministic ordered rule list: identical opinion sets
//! always produce the identical [`Decision`].

pub mod core;
pub mod deliberation;
pub mod opinion;
pub mod prompt;
pub mod referral;

// Re-export commonly used types
pub use core::{
    case::CaseInput,
    error::{AggregationError, ValidationError},
};
pub use deliberation::{
    decision::Decision,
    gate::{ConfidenceLevel, FinalDecision, decide},
    metrics::Metrics,
    state::{DeliberationState, Round},
};
pub use opinion::{
    entities::{Opinion, ReviewFindings, TriageLevel},
    parsing::{OpinionParseError, parse_opinion, parse_review},
    role::Role,
};
pub use prompt::PromptTemplate;
pub use referral::{
    doctor::{Doctor, default_directory},
    matcher::{GENERAL_PRACTICE, recommend},
};
