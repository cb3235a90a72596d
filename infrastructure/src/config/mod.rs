//! Configuration file loading for proxy-secrets
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./proxy-secrets.toml` or `./.proxy-secrets.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/proxy-secrets/config.toml`
//! 4. `PROXY_SECRETS_*` environment variables
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileBehaviorConfig, FileConfig, FileOutputConfig, ReportFormat};
pub use loader::ConfigLoader;
