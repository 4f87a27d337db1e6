//! Deliberation protocol types
//!
//! The accumulator, aggregate metrics, decision gate, and final decision
//! value object for one run of the three-round protocol.

pub mod decision;
pub mod gate;
pub mod metrics;
pub mod state;

pub use decision::Decision;
pub use gate::{ConfidenceLevel, FinalDecision, decide};
pub use metrics::Metrics;
pub use state::{DeliberationState, Round};
