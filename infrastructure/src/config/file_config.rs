//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

use serde::{Deserialize, Serialize};

/// How validation reports are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable summary (default)
    #[default]
    Text,
    /// Machine-readable JSON document
    Json,
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Report format
    pub format: Option<ReportFormat>,
    /// Mask credentials when printing normalized records
    pub redact: bool,
    /// Enable colored terminal output
    pub color: bool,
    /// Print the normalized record of every accepted candidate
    pub show_normalized: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            redact: true,
            color: true,
            show_normalized: false,
        }
    }
}

/// Raw behavior configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Stop at the first invalid candidate
    pub fail_fast: bool,
}

/// Complete configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub output: FileOutputConfig,
    pub behavior: FileBehaviorConfig,
}

impl FileConfig {
    /// Behavior settings for the application layer
    pub fn behavior_config(&self) -> secrets_application::BehaviorConfig {
        secrets_application::BehaviorConfig {
            fail_fast: self.behavior.fail_fast,
        }
    }
}
