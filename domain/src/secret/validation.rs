//! Secret record validation
//!
//! A candidate is matched against three alternatives, tried in order; the
//! first one that accepts it wins:
//!
//! 1. **Base** - `type` is one of perplexity, anthropic, google, replicate,
//!    together, mistral, js; `metadata` is optional base metadata.
//! 2. **OpenAI** - `type = "openai"`; `metadata` is required OpenAI metadata.
//! 3. **Azure** - `type = "azure"`; `metadata` is required Azure metadata.
//!
//! All alternatives share the closed top-level fields `id` (UUID), `org_name`,
//! `name` and `secret` (required). The alternatives are disjoint on `type`, so
//! when every alternative fails the one whose discriminant matched supplies
//! the primary diagnostic. If none matched, the report is the shared-field
//! issues plus a single `type` issue listing all nine provider names.
//!
//! # Examples
//!
//! ```
//! use secrets_domain::{ProviderType, validate_secret};
//! use serde_json::json;
//!
//! let secret = validate_secret(&json!({
//!     "type": "azure",
//!     "secret": "k",
//!     "metadata": {"api_base": "https://x"},
//! }))
//! .unwrap();
//! assert_eq!(secret.provider_type(), ProviderType::Azure);
//!
//! let err = validate_secret(&json!({"type": "bogus", "secret": "k"})).unwrap_err();
//! assert!(err.has_issue_at("type"));
//! ```

use super::entities::{Secret, SecretKind};
use super::metadata::{AzureMetadata, BaseMetadata, OpenAiMetadata};
use super::provider::{BaseProvider, ProviderType};
use super::reader::{ObjectReader, expect_string};
use crate::core::error::{
    AlternativeAttempt, IssueKind, SecretAlternative, ValidationError, ValidationIssue, ValueKind,
};
use crate::core::path::FieldPath;
use serde_json::Value;
use uuid::Uuid;

const SECRET_KEYS: [&str; 6] = ["id", "org_name", "name", "secret", "type", "metadata"];

/// Hyphenated 8-4-4-4-12 form; `Uuid::parse_str` alone also accepts simple,
/// braced and URN forms.
const HYPHENATED_UUID_LEN: usize = 36;

/// Fields shared by every alternative
struct CommonFields {
    id: Option<Uuid>,
    org_name: Option<String>,
    name: Option<String>,
    secret: Option<String>,
}

/// Validate an untyped candidate and produce a normalized [`Secret`]
pub fn validate_secret(candidate: &Value) -> Result<Secret, ValidationError> {
    let mut common_issues = Vec::new();
    let Some(reader) = ObjectReader::new(candidate, FieldPath::root(), &mut common_issues) else {
        let attempts = SecretAlternative::ALL
            .into_iter()
            .map(|alternative| AlternativeAttempt {
                alternative,
                issues: common_issues.clone(),
            })
            .collect();
        return Err(ValidationError::new(common_issues).with_attempts(attempts));
    };

    reader.reject_unknown(&SECRET_KEYS, &mut common_issues);
    let common = read_common_fields(&reader, &mut common_issues);

    let mut attempts = Vec::with_capacity(SecretAlternative::ALL.len());
    for alternative in SecretAlternative::ALL {
        match try_alternative(alternative, &reader, &common, &common_issues) {
            Ok(secret) => return Ok(secret),
            Err(issues) => attempts.push(AlternativeAttempt {
                alternative,
                issues,
            }),
        }
    }

    Err(merge_attempts(&reader, common_issues, attempts))
}

fn read_common_fields(
    reader: &ObjectReader<'_>,
    issues: &mut Vec<ValidationIssue>,
) -> CommonFields {
    let id = match reader.get("id") {
        Some(value) => parse_uuid(value, reader.field_path("id"), issues),
        None => None,
    };

    CommonFields {
        id,
        org_name: reader.optional_string("org_name", issues).flatten(),
        name: reader.optional_string("name", issues).flatten(),
        secret: reader.required_string("secret", issues),
    }
}

fn parse_uuid(value: &Value, path: FieldPath, issues: &mut Vec<ValidationIssue>) -> Option<Uuid> {
    let s = expect_string(value, path.clone(), issues)?;
    let parsed = (s.len() == HYPHENATED_UUID_LEN)
        .then(|| Uuid::parse_str(s).ok())
        .flatten();
    if parsed.is_none() {
        issues.push(ValidationIssue::new(path, IssueKind::InvalidUuid));
    }
    parsed
}

/// Checks `type` against the names one alternative accepts
fn read_discriminant<'a>(
    reader: &ObjectReader<'a>,
    accepted: &[&'static str],
    issues: &mut Vec<ValidationIssue>,
) -> Option<&'a str> {
    let path = reader.field_path("type");
    let Some(value) = reader.get("type") else {
        issues.push(ValidationIssue::missing(path, ValueKind::String));
        return None;
    };
    let name = expect_string(value, path.clone(), issues)?;
    if accepted.contains(&name) {
        Some(name)
    } else {
        issues.push(ValidationIssue::invalid_enum(path, accepted, name));
        None
    }
}

fn required_metadata<T>(
    reader: &ObjectReader<'_>,
    issues: &mut Vec<ValidationIssue>,
    parse: fn(&Value, FieldPath) -> Result<T, Vec<ValidationIssue>>,
) -> Option<T> {
    let path = reader.field_path("metadata");
    match reader.get("metadata") {
        Some(value) => collect(parse(value, path), issues),
        None => {
            issues.push(ValidationIssue::missing(path, ValueKind::Object));
            None
        }
    }
}

fn collect<T>(
    result: Result<T, Vec<ValidationIssue>>,
    issues: &mut Vec<ValidationIssue>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(found) => {
            issues.extend(found);
            None
        }
    }
}

fn try_alternative(
    alternative: SecretAlternative,
    reader: &ObjectReader<'_>,
    common: &CommonFields,
    common_issues: &[ValidationIssue],
) -> Result<Secret, Vec<ValidationIssue>> {
    let mut issues = common_issues.to_vec();

    let kind = match alternative {
        SecretAlternative::Base => {
            let provider = read_discriminant(reader, &BaseProvider::NAMES, &mut issues)
                .and_then(|name| name.parse::<BaseProvider>().ok());
            let metadata = match reader.get("metadata") {
                Some(value) => collect(
                    BaseMetadata::parse_at(value, reader.field_path("metadata")),
                    &mut issues,
                )
                .map(Some),
                None => Some(None),
            };
            provider
                .zip(metadata)
                .map(|(provider, metadata)| SecretKind::Base { provider, metadata })
        }
        SecretAlternative::OpenAi => {
            let matched = read_discriminant(reader, &["openai"], &mut issues);
            let metadata = required_metadata(reader, &mut issues, OpenAiMetadata::parse_at);
            matched
                .zip(metadata)
                .map(|(_, metadata)| SecretKind::OpenAi { metadata })
        }
        SecretAlternative::Azure => {
            let matched = read_discriminant(reader, &["azure"], &mut issues);
            let metadata = required_metadata(reader, &mut issues, AzureMetadata::parse_at);
            matched
                .zip(metadata)
                .map(|(_, metadata)| SecretKind::Azure { metadata })
        }
    };

    match (kind, &common.secret) {
        (Some(kind), Some(secret)) if issues.is_empty() => Ok(Secret {
            id: common.id,
            org_name: common.org_name.clone(),
            name: common.name.clone(),
            secret: secret.clone(),
            kind,
        }),
        _ => Err(issues),
    }
}

fn merge_attempts(
    reader: &ObjectReader<'_>,
    common_issues: Vec<ValidationIssue>,
    attempts: Vec<AlternativeAttempt>,
) -> ValidationError {
    let type_path = reader.field_path("type");
    let closest = attempts
        .iter()
        .find(|attempt| attempt.issues.iter().all(|issue| issue.path != type_path));

    let issues = match closest {
        Some(attempt) => attempt.issues.clone(),
        None => {
            let mut issues = common_issues;
            read_discriminant(reader, &ProviderType::ALL_NAMES, &mut issues);
            issues
        }
    };

    ValidationError::new(issues).with_attempts(attempts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret::metadata::DEFAULT_AZURE_API_VERSION;
    use serde_json::json;

    fn metadata_json(secret: &Secret) -> Value {
        serde_json::to_value(secret).unwrap()["metadata"].clone()
    }

    // ==================== Required secret ====================

    #[test]
    fn test_missing_secret_fails_for_every_type() {
        for provider in ProviderType::ALL_NAMES {
            let candidate = json!({
                "type": provider,
                "metadata": {"api_base": "https://x"},
            });
            let err = validate_secret(&candidate).unwrap_err();
            assert!(err.has_issue_at("secret"), "provider {}", provider);
        }
    }

    #[test]
    fn test_secret_must_be_string_and_is_not_echoed() {
        let err = validate_secret(&json!({"type": "anthropic", "secret": 987654321}))
            .unwrap_err();
        assert!(err.has_issue_at("secret"));
        assert!(!err.to_string().contains("987654321"));
    }

    // ==================== Base providers ====================

    #[test]
    fn test_base_provider_without_metadata() {
        let secret = validate_secret(&json!({"type": "anthropic", "secret": "x"})).unwrap();
        assert_eq!(
            secret.kind,
            SecretKind::Base {
                provider: BaseProvider::Anthropic,
                metadata: None
            }
        );
    }

    #[test]
    fn test_every_base_provider_accepted() {
        for name in BaseProvider::NAMES {
            let secret = validate_secret(&json!({
                "type": name,
                "secret": "x",
                "metadata": {"models": ["m1"]},
            }))
            .unwrap();
            assert_eq!(secret.provider_type().as_str(), name);
            assert_eq!(secret.models(), ["m1"]);
        }
    }

    #[test]
    fn test_base_provider_rejects_api_base() {
        let err = validate_secret(&json!({
            "type": "anthropic",
            "secret": "x",
            "metadata": {"api_base": "https://x"},
        }))
        .unwrap_err();
        assert!(err.has_issue_at("metadata"));
        assert!(matches!(
            err.issues()[0].kind,
            IssueKind::UnrecognizedKeys { .. }
        ));
    }

    #[test]
    fn test_top_level_unknown_key() {
        let err = validate_secret(&json!({"type": "anthropic", "secret": "x", "extra": "y"}))
            .unwrap_err();
        assert_eq!(
            err.issues()[0],
            ValidationIssue::unrecognized_keys(FieldPath::root(), vec!["extra".to_string()])
        );
    }

    #[test]
    fn test_common_fields() {
        let secret = validate_secret(&json!({
            "id": "1B4E28BA-2FA1-11D2-883F-0016D3CCA427",
            "org_name": "acme",
            "name": "prod key",
            "type": "mistral",
            "secret": "x",
        }))
        .unwrap();
        assert_eq!(
            secret.id.map(|id| id.to_string()).as_deref(),
            Some("1b4e28ba-2fa1-11d2-883f-0016d3cca427")
        );
        assert_eq!(secret.org_name.as_deref(), Some("acme"));
        assert_eq!(secret.name.as_deref(), Some("prod key"));
    }

    #[test]
    fn test_malformed_uuid() {
        for id in [
            json!("not-a-uuid"),
            json!("1b4e28ba2fa111d2883f0016d3cca427"),
            json!("{1b4e28ba-2fa1-11d2-883f-0016d3cca427}"),
        ] {
            let err = validate_secret(&json!({"id": id, "type": "google", "secret": "x"}))
                .unwrap_err();
            assert_eq!(err.issues()[0].kind, IssueKind::InvalidUuid);
        }

        let err = validate_secret(&json!({"id": 7, "type": "google", "secret": "x"}))
            .unwrap_err();
        assert!(matches!(err.issues()[0].kind, IssueKind::InvalidType { .. }));
    }

    #[test]
    fn test_null_optional_field_is_rejected() {
        let err = validate_secret(&json!({"type": "js", "secret": "x", "name": null}))
            .unwrap_err();
        assert!(err.has_issue_at("name"));
    }

    // ==================== OpenAI ====================

    #[test]
    fn test_openai_example() {
        let secret = validate_secret(&json!({
            "type": "openai",
            "secret": "sk-1",
            "metadata": {"organization_id": "org-1"},
        }))
        .unwrap();
        assert_eq!(metadata_json(&secret), json!({"organization_id": "org-1"}));
    }

    #[test]
    fn test_openai_without_organization_id() {
        let secret = validate_secret(&json!({
            "type": "openai",
            "secret": "sk-1",
            "metadata": {},
        }))
        .unwrap();
        assert_eq!(
            secret.kind,
            SecretKind::OpenAi {
                metadata: OpenAiMetadata::default()
            }
        );
    }

    #[test]
    fn test_openai_organization_id_non_string() {
        for bad in [json!(1), json!(true), json!(["org"]), json!(null)] {
            let err = validate_secret(&json!({
                "type": "openai",
                "secret": "sk-1",
                "metadata": {"organization_id": bad},
            }))
            .unwrap_err();
            assert_eq!(err.paths(), vec!["metadata.organization_id"]);
        }
    }

    #[test]
    fn test_openai_requires_metadata() {
        let err = validate_secret(&json!({"type": "openai", "secret": "sk-1"})).unwrap_err();
        assert_eq!(
            err.issues(),
            [ValidationIssue::missing(
                FieldPath::root().key("metadata"),
                ValueKind::Object
            )]
        );
    }

    // ==================== Azure ====================

    #[test]
    fn test_azure_example_defaults_api_version() {
        let secret = validate_secret(&json!({
            "type": "azure",
            "secret": "k",
            "metadata": {"api_base": "https://x"},
        }))
        .unwrap();
        assert_eq!(
            metadata_json(&secret),
            json!({"api_base": "https://x", "api_version": DEFAULT_AZURE_API_VERSION})
        );
    }

    #[test]
    fn test_azure_missing_api_base() {
        let err = validate_secret(&json!({
            "type": "azure",
            "secret": "k",
            "metadata": {"deployment": "d"},
        }))
        .unwrap_err();
        assert_eq!(err.paths(), vec!["metadata.api_base"]);
    }

    #[test]
    fn test_azure_requires_metadata() {
        let err = validate_secret(&json!({"type": "azure", "secret": "k"})).unwrap_err();
        assert!(err.has_issue_at("metadata"));
    }

    // ==================== Union diagnostics ====================

    #[test]
    fn test_unknown_type() {
        let err = validate_secret(&json!({"type": "bogus", "secret": "k"})).unwrap_err();
        assert_eq!(
            err.issues(),
            [ValidationIssue::invalid_enum(
                FieldPath::root().key("type"),
                &ProviderType::ALL_NAMES,
                "bogus"
            )]
        );
        assert_eq!(err.attempts().len(), 3);
    }

    #[test]
    fn test_missing_type() {
        let err = validate_secret(&json!({"secret": "k"})).unwrap_err();
        assert_eq!(
            err.issues()[0].kind,
            IssueKind::Missing {
                expected: ValueKind::String
            }
        );
    }

    #[test]
    fn test_closest_alternative_reported() {
        let err = validate_secret(&json!({
            "type": "azure",
            "secret": "k",
            "metadata": {"organization_id": "org"},
        }))
        .unwrap_err();

        // Azure matched the discriminant, so its issues are primary
        assert!(err.has_issue_at("metadata.api_base"));
        assert!(err.has_issue_at("metadata"));
        assert!(!err.has_issue_at("type"));

        let alternatives: Vec<_> = err.attempts().iter().map(|a| a.alternative).collect();
        assert_eq!(alternatives, SecretAlternative::ALL);
        assert!(
            err.attempts()[1]
                .issues
                .iter()
                .any(|i| i.path.to_string() == "type")
        );
    }

    #[test]
    fn test_candidate_must_be_object() {
        let err = validate_secret(&json!("sk-raw")).unwrap_err();
        assert_eq!(err.paths(), vec!["<root>"]);
        assert!(!err.to_string().contains("sk-raw"));
    }

    // ==================== Idempotence ====================

    #[test]
    fn test_revalidating_output_is_stable() {
        let candidates = [
            json!({"type": "azure", "secret": "k", "metadata": {"api_base": "https://x"}}),
            json!({"type": "openai", "secret": "sk", "metadata": {"models": ["a", "a"]}}),
            json!({
                "id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
                "name": "n",
                "type": "together",
                "secret": "x",
                "metadata": {"customModels": {"m": {"format": "js", "flavor": "chat"}}},
            }),
        ];
        for candidate in candidates {
            let first = validate_secret(&candidate).unwrap();
            let serialized = serde_json::to_value(&first).unwrap();
            let second = validate_secret(&serialized).unwrap();
            assert_eq!(first, second);
            assert_eq!(serialized, serde_json::to_value(&second).unwrap());
        }
    }
}
