//! Presentation layer for proxy-secrets
//!
//! This crate contains CLI definitions and report formatters.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::{FormatOptions, OutputFormatter, normalized_json};
