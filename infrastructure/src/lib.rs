//! Infrastructure layer for triage-council
//!
//! This crate contains the adapters behind the application ports:
//! opinion providers, configuration loading, directory loading, and the
//! JSONL audit trail.

pub mod audit;
pub mod config;
pub mod directory;
pub mod providers;

// Re-export commonly used types
pub use audit::JsonlAuditSink;
pub use config::{ConfigLoader, FileConfig};
pub use directory::{DirectoryError, load_directory, load_directory_file};
pub use providers::ScriptedOpinionGateway;

#[cfg(feature = "openai")]
pub use providers::openai::OpenAiOpinionGateway;
