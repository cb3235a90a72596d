//! Domain error types
//!
//! Validation is the only thing the domain can fail at, so there is a single
//! error type, [`ValidationError`], carrying one [`ValidationIssue`] per
//! offending field.

use super::path::FieldPath;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// JSON kind of a value, used for expected/received reporting.
///
/// Issues report the *kind* of a received value rather than the value itself
/// so that a mistyped credential never ends up in an error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Null => ValueKind::Null,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Null => "null",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What went wrong at a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum IssueKind {
    /// A required field is absent
    Missing { expected: ValueKind },
    /// The field has the wrong JSON kind
    InvalidType {
        expected: ValueKind,
        received: ValueKind,
    },
    /// A string outside a closed set of literals
    InvalidEnumValue {
        expected: Vec<&'static str>,
        received: String,
    },
    /// A string that is not a hyphenated UUID
    InvalidUuid,
    /// Keys not declared for a closed object
    UnrecognizedKeys { keys: Vec<String> },
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::Missing { expected } => write!(f, "required {} is missing", expected),
            IssueKind::InvalidType { expected, received } => {
                write!(f, "expected {}, received {}", expected, received)
            }
            IssueKind::InvalidEnumValue { expected, received } => {
                let options = expected
                    .iter()
                    .map(|o| format!("'{}'", o))
                    .collect::<Vec<_>>()
                    .join(" | ");
                write!(f, "expected one of {}, received '{}'", options, received)
            }
            IssueKind::InvalidUuid => write!(f, "expected a UUID string"),
            IssueKind::UnrecognizedKeys { keys } => {
                let keys = keys
                    .iter()
                    .map(|k| format!("'{}'", k))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "unrecognized key(s) {}", keys)
            }
        }
    }
}

/// A single structural violation at a field path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: FieldPath,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl ValidationIssue {
    pub fn new(path: FieldPath, kind: IssueKind) -> Self {
        Self { path, kind }
    }

    pub fn missing(path: FieldPath, expected: ValueKind) -> Self {
        Self::new(path, IssueKind::Missing { expected })
    }

    pub fn invalid_type(path: FieldPath, expected: ValueKind, received: &Value) -> Self {
        Self::new(
            path,
            IssueKind::InvalidType {
                expected,
                received: ValueKind::of(received),
            },
        )
    }

    pub fn invalid_enum(
        path: FieldPath,
        expected: &[&'static str],
        received: impl Into<String>,
    ) -> Self {
        Self::new(
            path,
            IssueKind::InvalidEnumValue {
                expected: expected.to_vec(),
                received: received.into(),
            },
        )
    }

    pub fn unrecognized_keys(path: FieldPath, keys: Vec<String>) -> Self {
        Self::new(path, IssueKind::UnrecognizedKeys { keys })
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// The alternatives of the secret record union, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretAlternative {
    /// perplexity, anthropic, google, replicate, together, mistral, js
    Base,
    OpenAi,
    Azure,
}

impl SecretAlternative {
    pub const ALL: [SecretAlternative; 3] = [
        SecretAlternative::Base,
        SecretAlternative::OpenAi,
        SecretAlternative::Azure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SecretAlternative::Base => "base",
            SecretAlternative::OpenAi => "openai",
            SecretAlternative::Azure => "azure",
        }
    }
}

impl std::fmt::Display for SecretAlternative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why one union alternative rejected the candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternativeAttempt {
    pub alternative: SecretAlternative,
    pub issues: Vec<ValidationIssue>,
}

/// Structural mismatch between a candidate and the expected shape.
///
/// [`issues`](Self::issues) is the primary diagnostic: for a secret record it
/// belongs to the alternative whose `type` matched, or is a merged report when
/// no alternative accepted the discriminant. [`attempts`](Self::attempts)
/// lists every alternative that was tried; it is empty for errors raised by a
/// metadata validator on its own.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{}", render_issues(.issues))]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attempts: Vec<AlternativeAttempt>,
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self {
            issues,
            attempts: Vec::new(),
        }
    }

    pub fn with_attempts(mut self, attempts: Vec<AlternativeAttempt>) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn attempts(&self) -> &[AlternativeAttempt] {
        &self.attempts
    }

    /// Rendered paths of all primary issues, in report order
    pub fn paths(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.path.to_string()).collect()
    }

    /// Check if any primary issue points at `path` (rendered form)
    pub fn has_issue_at(&self, path: &str) -> bool {
        self.issues.iter().any(|i| i.path.to_string() == path)
    }
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    match issues {
        [] => "validation failed".to_string(),
        [issue] => format!("validation failed: {}", issue),
        _ => format!(
            "validation failed with {} issues: {}",
            issues.len(),
            issues
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}
