//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for triage decisions
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with metrics and referrals
    Full,
    /// Only the decision and next steps
    Summary,
    /// JSON output
    Json,
}

/// CLI arguments for triage-council
#[derive(Parser, Debug)]
#[command(name = "triage-council")]
#[command(author, version, about = "Medical triage council - four roles deliberate, a safety gate decides")]
#[command(long_about = r#"
Triage Council runs a panel of four specialist roles over a symptom
description and gates their opinions into one triage decision.

The process has three rounds:
1. Independent Analysis: Symptom, Risk, Evidence, and Ethics each assess
   the case in parallel, without seeing each other
2. Challenge & Review: Risk and Ethics re-check the complete opinion set
   for missed red flags and safety problems
3. Decision Gate: deterministic safety rules turn the aggregated opinions
   into SELF_CARE, CONSULT, URGENT, or REFUSED

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./triage.toml       Project-level config
3. ~/.config/triage-council/config.toml   Global config

Example:
  triage-council "severe chest pain and shortness of breath" --age 58
  triage-council --interactive
  triage-council --scripted "mild headache" --age 25 --output json
"#)]
pub struct Cli {
    /// Symptom description (not required in interactive mode)
    pub symptoms: Option<String>,

    /// Patient age
    #[arg(short, long, value_name = "AGE")]
    pub age: Option<String>,

    /// Relevant medical history
    #[arg(long, value_name = "HISTORY", default_value = "")]
    pub history: String,

    /// Start an interactive intake session
    #[arg(short, long)]
    pub interactive: bool,

    /// Use the built-in scripted panel instead of a live provider
    #[arg(long)]
    pub scripted: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
