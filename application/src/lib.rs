//! Application layer for triage-council
//!
//! This crate contains the deliberation use case, port definitions, and
//! run configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DeliberationParams, ReviewFailurePolicy};
pub use ports::{
    audit::{AuditRecord, AuditSink, NoAudit},
    opinion_gateway::{OpinionGateway, ProviderError, ProviderErrorKind},
    progress::{DeliberationProgress, NoProgress},
};
pub use use_cases::run_deliberation::{
    DeliberationCause, DeliberationError, RunDeliberationUseCase,
};
