//! Opinion types for triage deliberation
//!
//! An opinion is one role's structured assessment of a case. Opinions are
//! immutable once produced; all arbitration happens over the full set.

pub mod entities;
pub mod parsing;
pub mod role;

pub use entities::{Opinion, ReviewFindings, TriageLevel};
pub use parsing::{OpinionParseError, parse_opinion, parse_review};
pub use role::Role;
