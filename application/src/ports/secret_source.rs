//! Secret source port
//!
//! Defines how candidate secret records reach the application. Adapters in
//! the infrastructure layer read them from files, stdin or a store.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// An unvalidated record plus a label locating it in its source
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSecret {
    /// e.g. `secrets.json#2` or `keys.jsonl:14`
    pub label: String,
    pub value: Value,
}

impl CandidateSecret {
    pub fn new(label: impl Into<String>, value: Value) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Errors that can occur while loading candidates
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("Failed to parse {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    #[error("Unsupported source {source_name}: {message}")]
    Unsupported {
        source_name: String,
        message: String,
    },
}

/// Port for loading candidate secrets
///
/// Loading never validates; every well-formed record is returned as-is and
/// shape checking happens in the use case.
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Human-readable name used in logs and labels
    fn name(&self) -> String;

    /// Load every candidate this source holds, in source order
    async fn load(&self) -> Result<Vec<CandidateSecret>, SourceError>;
}
