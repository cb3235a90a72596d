//! Application layer for proxy-secrets
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::secret_source::{CandidateSecret, SecretSource, SourceError};
pub use use_cases::validate_secrets::{
    SecretOutcome, ValidateSecretsError, ValidateSecretsInput, ValidateSecretsUseCase,
    ValidationReport, validate_candidates,
};
