//! Presentation layer for triage-council
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive intake session.

pub mod cli;
pub mod intake;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use intake::IntakeSession;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
