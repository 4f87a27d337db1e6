//! CLI entrypoint for Triage Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use triage_application::{AuditSink, NoAudit, OpinionGateway, RunDeliberationUseCase};
use triage_domain::{CaseInput, Doctor};
use triage_infrastructure::{
    ConfigLoader, FileConfig, JsonlAuditSink, ScriptedOpinionGateway, load_directory,
};
use triage_presentation::{Cli, ConsoleFormatter, IntakeSession, OutputFormat, ProgressReporter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        print_config_locations();
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting Triage Council");

    let directory = load_directory(config.directory.path.as_deref().map(Path::new));
    let audit = audit_sink(&config);

    // === Dependency Injection ===
    if cli.scripted {
        let gateway = Arc::new(ScriptedOpinionGateway::new());
        return run(gateway, cli, &config, directory, audit).await;
    }

    run_live(cli, &config, directory, audit).await
}

#[cfg(feature = "openai")]
async fn run_live(
    cli: Cli,
    config: &FileConfig,
    directory: Vec<Doctor>,
    audit: Arc<dyn AuditSink>,
) -> Result<()> {
    let gateway = Arc::new(openai_gateway(config)?);
    run(gateway, cli, config, directory, audit).await
}

#[cfg(not(feature = "openai"))]
async fn run_live(
    _cli: Cli,
    _config: &FileConfig,
    _directory: Vec<Doctor>,
    _audit: Arc<dyn AuditSink>,
) -> Result<()> {
    bail!("Built without the openai feature. Use --scripted.")
}

/// Run intake mode or a single case against the given gateway
async fn run<G: OpinionGateway + 'static>(
    gateway: Arc<G>,
    cli: Cli,
    config: &FileConfig,
    directory: Vec<Doctor>,
    audit: Arc<dyn AuditSink>,
) -> Result<()> {
    let use_case = RunDeliberationUseCase::new(gateway, directory)
        .with_params(config.behavior.deliberation_params())
        .with_audit(audit);

    // Interactive intake mode
    if cli.interactive {
        let session = IntakeSession::new(use_case)
            .with_progress(!cli.quiet)
            .with_output(cli.output);

        session.run().await?;
        return Ok(());
    }

    // Single case mode - symptoms and age are required
    let symptoms = match cli.symptoms {
        Some(s) => s,
        None => bail!("Symptoms are required. Use --interactive for intake mode."),
    };
    let age = match cli.age {
        Some(a) => a,
        None => bail!("Patient age is required (--age)."),
    };

    let case = CaseInput::new(symptoms, age, cli.history);

    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|                    Triage Council                          |");
        println!("+============================================================+");
        println!();
        println!("Symptoms: {}", case.symptoms);
        println!("Age: {}", case.age);
        if !case.history.is_empty() {
            println!("History: {}", case.history);
        }
        println!();
    }

    // Execute with or without progress reporting
    let decision = if cli.quiet {
        use_case.execute(case).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(case, &progress).await?
    };

    // Output the decision
    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&decision),
        OutputFormat::Summary => ConsoleFormatter::format_summary(&decision),
        OutputFormat::Json => ConsoleFormatter::format_json(&decision),
    };

    println!("{}", output);

    Ok(())
}

/// Build the audit sink from configuration; auditing is off by default
fn audit_sink(config: &FileConfig) -> Arc<dyn AuditSink> {
    match &config.output.audit_file {
        Some(path) => match JsonlAuditSink::new(path) {
            Some(sink) => Arc::new(sink),
            None => Arc::new(NoAudit),
        },
        None => Arc::new(NoAudit),
    }
}

#[cfg(feature = "openai")]
fn openai_gateway(
    config: &FileConfig,
) -> Result<triage_infrastructure::OpenAiOpinionGateway> {
    use triage_infrastructure::providers::openai::OpenAiSettings;

    let api_key = match config
        .provider
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    {
        Some(key) if !key.is_empty() => key,
        _ => bail!(
            "No API key configured. Set OPENAI_API_KEY or [provider].api_key, \
             or use --scripted."
        ),
    };

    let mut settings = OpenAiSettings::new(api_key);
    if let Some(base_url) = &config.provider.base_url {
        settings = settings.with_base_url(base_url);
    }
    if let Some(model) = &config.provider.model {
        settings = settings.with_model(model);
    }

    Ok(triage_infrastructure::OpenAiOpinionGateway::new(settings))
}

fn print_config_locations() {
    println!("Configuration file locations (in priority order):");
    println!("  1. --config <path>");
    println!("  2. ./triage.toml or ./.triage.toml");
    if let Some(path) = ConfigLoader::global_config_path() {
        println!("  3. {}", path.display());
    }
}
