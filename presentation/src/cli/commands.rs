//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for validation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON document
    Json,
}

/// CLI arguments for proxy-secrets
#[derive(Parser, Debug)]
#[command(name = "proxy-secrets")]
#[command(author, version, about = "Validate LLM proxy credential records")]
#[command(long_about = r#"
proxy-secrets checks API credential records ("secrets") before they are stored
or used by the proxy. Every record must carry a `secret` and a provider `type`;
the allowed metadata depends on the type:

  perplexity, anthropic, google, replicate, together, mistral, js
      metadata (optional): models, customModels
  openai
      metadata (required): models, customModels, organization_id
  azure
      metadata (required): models, customModels, api_base, api_version, deployment

Unknown keys are rejected at every level. Azure's api_version defaults to
2023-07-01-preview.

Inputs may be .json (object or array), .jsonl/.ndjson, .toml, or `-` for stdin.

Configuration files are loaded from (in priority order):
1. --config <path>           Explicit config file
2. ./proxy-secrets.toml      Project-level config
3. ~/.config/proxy-secrets/config.toml   Global config

Example:
  proxy-secrets secrets.json
  proxy-secrets --output json --show-normalized keys.jsonl
  cat secret.json | proxy-secrets -
"#)]
pub struct Cli {
    /// Files to validate (`-` reads JSON from stdin)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Stop at the first invalid record
    #[arg(long)]
    pub fail_fast: bool,

    /// Print the normalized form of every accepted record
    #[arg(long)]
    pub show_normalized: bool,

    /// Print credentials in full instead of masking them
    #[arg(long)]
    pub no_redact: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only set the exit status; print nothing on success
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
