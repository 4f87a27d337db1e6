//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod audit;
pub mod opinion_gateway;
pub mod progress;
