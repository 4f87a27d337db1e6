//! Use cases (application services)

pub mod run_deliberation;

pub use run_deliberation::{DeliberationCause, DeliberationError, RunDeliberationUseCase};
