//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! where appropriate.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use triage_application::{DeliberationParams, ReviewFailurePolicy};

/// Raw provider configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// API key for the OpenAI-compatible endpoint; usually left unset
    /// here and supplied via OPENAI_API_KEY
    pub api_key: Option<String>,
    /// Base URL override (e.g. a Groq or local gateway endpoint)
    pub base_url: Option<String>,
    /// Model name to request
    pub model: Option<String>,
}

/// Raw behavior configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Deadline in seconds for each provider call
    pub timeout_seconds: u64,
    /// Retries per failed call (0 disables retries)
    pub max_retries: u8,
    /// Round 2 failure handling: "abort" or "no_new_findings"
    pub review_failure_policy: String,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 60,
            max_retries: 1,
            review_failure_policy: "abort".to_string(),
        }
    }
}

impl FileBehaviorConfig {
    /// Convert into run parameters; an unrecognized policy string falls
    /// back to the safe default (abort)
    pub fn deliberation_params(&self) -> DeliberationParams {
        DeliberationParams {
            call_timeout: Duration::from_secs(self.timeout_seconds),
            max_retries: self.max_retries,
            review_failure_policy: self
                .review_failure_policy
                .parse::<ReviewFailurePolicy>()
                .unwrap_or_default(),
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Path for the JSONL audit trail; unset disables auditing
    pub audit_file: Option<String>,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            audit_file: None,
        }
    }
}

/// Raw directory configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDirectoryConfig {
    /// Path to a TOML doctor directory; unset uses the built-in one
    pub path: Option<String>,
}

/// Complete raw configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub provider: FileProviderConfig,
    pub behavior: FileBehaviorConfig,
    pub output: FileOutputConfig,
    pub directory: FileDirectoryConfig,
}
