//! File-backed secret source
//!
//! Reads candidate records from disk (or stdin for `-`). The format is picked
//! from the file extension:
//!
//! | Extension | Layout | Label |
//! |-----------|--------|-------|
//! | `.json` | one object, or an array of objects | `file` / `file#index` |
//! | `.jsonl`, `.ndjson` | one JSON value per non-blank line | `file:line` |
//! | `.toml` | `[[secrets]]` tables, or a single top-level table | `file#index` / `file` |
//!
//! Stdin is always read as JSON.

use async_trait::async_trait;
use secrets_application::{CandidateSecret, SecretSource, SourceError};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::debug;

const STDIN_PATH: &str = "-";

/// Layout of a secrets file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    JsonLines,
    Toml,
}

impl FileFormat {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(FileFormat::Json),
            "jsonl" | "ndjson" => Some(FileFormat::JsonLines),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Secret source reading a single file, or stdin for `-`
#[derive(Debug, Clone)]
pub struct FileSecretSource {
    path: PathBuf,
}

impl FileSecretSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn stdin() -> Self {
        Self::new(STDIN_PATH)
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == STDIN_PATH
    }

    fn format(&self) -> Result<FileFormat, SourceError> {
        if self.is_stdin() {
            return Ok(FileFormat::Json);
        }
        FileFormat::from_path(&self.path).ok_or_else(|| SourceError::Unsupported {
            source_name: self.name(),
            message: "expected a .json, .jsonl, .ndjson or .toml file".to_string(),
        })
    }

    async fn read_text(&self) -> Result<String, SourceError> {
        let io_error = |error| SourceError::Io {
            source_name: self.name(),
            error,
        };

        if self.is_stdin() {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .map_err(io_error)?;
            Ok(text)
        } else {
            tokio::fs::read_to_string(&self.path).await.map_err(io_error)
        }
    }
}

#[async_trait]
impl SecretSource for FileSecretSource {
    fn name(&self) -> String {
        if self.is_stdin() {
            "<stdin>".to_string()
        } else {
            self.path.display().to_string()
        }
    }

    async fn load(&self) -> Result<Vec<CandidateSecret>, SourceError> {
        let format = self.format()?;
        let text = self.read_text().await?;
        debug!("Read {} bytes from {} as {:?}", text.len(), self.name(), format);

        let name = self.name();
        match format {
            FileFormat::Json => parse_json(&name, &text),
            FileFormat::JsonLines => parse_json_lines(&name, &text),
            FileFormat::Toml => parse_toml(&name, &text),
        }
    }
}

fn parse_error(name: &str, message: impl ToString) -> SourceError {
    SourceError::Parse {
        source_name: name.to_string(),
        message: message.to_string(),
    }
}

/// A top-level array yields one candidate per element
pub fn parse_json(name: &str, text: &str) -> Result<Vec<CandidateSecret>, SourceError> {
    let value: Value = serde_json::from_str(text).map_err(|e| parse_error(name, e))?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| CandidateSecret::new(format!("{}#{}", name, i), item))
            .collect(),
        other => vec![CandidateSecret::new(name, other)],
    })
}

pub fn parse_json_lines(name: &str, text: &str) -> Result<Vec<CandidateSecret>, SourceError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let line_no = i + 1;
            serde_json::from_str(line)
                .map(|value| CandidateSecret::new(format!("{}:{}", name, line_no), value))
                .map_err(|e| parse_error(name, format!("line {}: {}", line_no, e)))
        })
        .collect()
}

pub fn parse_toml(name: &str, text: &str) -> Result<Vec<CandidateSecret>, SourceError> {
    let mut table: toml::Table = toml::from_str(text).map_err(|e| parse_error(name, e))?;

    let is_list = table.len() == 1 && matches!(table.get("secrets"), Some(toml::Value::Array(_)));
    if is_list {
        if let Some(toml::Value::Array(items)) = table.remove("secrets") {
            return items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    serde_json::to_value(item)
                        .map(|value| CandidateSecret::new(format!("{}#{}", name, i), value))
                        .map_err(|e| parse_error(name, e))
                })
                .collect();
        }
    }

    let value = serde_json::to_value(table).map_err(|e| parse_error(name, e))?;
    Ok(vec![CandidateSecret::new(name, value)])
}
