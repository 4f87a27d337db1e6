//! CLI argument handling

pub mod commands;

pub use commands::{Cli, OutputFormat};
