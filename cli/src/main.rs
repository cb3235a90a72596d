//! CLI entrypoint for proxy-secrets
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use secrets_application::{SecretSource, ValidateSecretsInput, ValidateSecretsUseCase};
use secrets_infrastructure::{ConfigLoader, FileSecretSource, ReportFormat};
use secrets_presentation::{Cli, ConsoleFormatter, FormatOptions, OutputFormat};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

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
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if cli.paths.is_empty() {
        bail!("At least one PATH is required. Use `-` to read from stdin.");
    }

    info!("Validating {} input(s)", cli.paths.len());

    // === Dependency Injection ===
    let sources: Vec<Arc<dyn SecretSource>> = cli
        .paths
        .iter()
        .map(|path| Arc::new(FileSecretSource::new(path)) as Arc<dyn SecretSource>)
        .collect();

    let mut behavior = config.behavior_config();
    if cli.fail_fast {
        behavior.fail_fast = true;
    }

    let use_case = ValidateSecretsUseCase::new(sources);
    let report = use_case.execute(ValidateSecretsInput::new(behavior)).await?;

    // CLI flags win over config file values
    let format = cli.output.unwrap_or(match config.output.format.unwrap_or_default() {
        ReportFormat::Text => OutputFormat::Text,
        ReportFormat::Json => OutputFormat::Json,
    });
    let options = FormatOptions {
        redact: config.output.redact && !cli.no_redact,
        show_normalized: config.output.show_normalized || cli.show_normalized,
    };
    ConsoleFormatter::set_color(config.output.color && !cli.no_color);

    if !(cli.quiet && report.is_success()) {
        let output = match format {
            OutputFormat::Text => ConsoleFormatter::format(&report, &options),
            OutputFormat::Json => ConsoleFormatter::format_json(&report, &options),
        };
        println!("{}", output);
    }

    if !report.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
