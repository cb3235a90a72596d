//! Domain layer for proxy-secrets
//!
//! This crate contains the secret record types and the pure validators that
//! turn untrusted JSON into them. It has no I/O and no logging.
//!
//! # Core Concepts
//!
//! ## Secret
//!
//! A credential for one LLM provider plus provider-specific metadata. The
//! `type` discriminant decides which metadata shape is allowed:
//!
//! - **Base** (perplexity, anthropic, google, replicate, together, mistral, js):
//!   `{models?, customModels?}`, and metadata may be omitted
//! - **OpenAI**: base fields + `organization_id?`
//! - **Azure**: base fields + `api_base`, `api_version` (defaulted), `deployment?`
//!
//! ## Validation
//!
//! Validation is a parse: [`validate_secret`] returns a normalized [`Secret`]
//! or a [`ValidationError`] listing every offending field path. Every object
//! level is closed, so unknown keys are errors.

pub mod core;
pub mod secret;

// Re-export commonly used types
pub use crate::core::{
    error::{
        AlternativeAttempt, IssueKind, SecretAlternative, ValidationError, ValidationIssue,
        ValueKind,
    },
    path::{FieldPath, PathSegment},
};
pub use secret::{
    entities::{Secret, SecretKind},
    metadata::{AzureMetadata, BaseMetadata, DEFAULT_AZURE_API_VERSION, OpenAiMetadata},
    provider::{BaseProvider, ModelFlavor, ModelFormat, ModelSpec, ProviderType},
    validation::validate_secret,
};
