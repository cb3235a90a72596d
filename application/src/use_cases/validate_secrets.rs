//! Validate Secrets use case
//!
//! Loads candidates from every configured source and runs each through the
//! domain validator, producing a per-candidate report.

use crate::config::BehaviorConfig;
use crate::ports::secret_source::{CandidateSecret, SecretSource, SourceError};
use futures::future::join_all;
use secrets_domain::{Secret, ValidationError, validate_secret};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a validation run
///
/// A rejected candidate is not an error here; it is recorded in the report.
#[derive(Error, Debug)]
pub enum ValidateSecretsError {
    #[error("No secret sources configured")]
    NoSources,

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Input for the ValidateSecrets use case
#[derive(Debug, Clone, Default)]
pub struct ValidateSecretsInput {
    pub behavior: BehaviorConfig,
}

impl ValidateSecretsInput {
    pub fn new(behavior: BehaviorConfig) -> Self {
        Self { behavior }
    }
}

/// Validation result for one candidate
#[derive(Debug, Clone)]
pub struct SecretOutcome {
    pub label: String,
    pub result: Result<Secret, ValidationError>,
}

impl SecretOutcome {
    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcome of a whole validation run
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// One entry per checked candidate, in source order
    pub outcomes: Vec<SecretOutcome>,
    /// Candidates left unchecked because of fail-fast
    pub skipped: usize,
}

impl ValidationReport {
    pub fn valid_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_valid()).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.outcomes.len() - self.valid_count()
    }

    /// True when every loaded candidate was checked and accepted
    pub fn is_success(&self) -> bool {
        self.skipped == 0 && self.invalid_count() == 0
    }

    pub fn valid(&self) -> impl Iterator<Item = (&str, &Secret)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|s| (o.label.as_str(), s)))
    }

    pub fn invalid(&self) -> impl Iterator<Item = (&str, &ValidationError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.label.as_str(), e)))
    }
}

/// Validate already-loaded candidates
pub fn validate_candidates(
    candidates: Vec<CandidateSecret>,
    behavior: BehaviorConfig,
) -> ValidationReport {
    let total = candidates.len();
    let mut report = ValidationReport::default();

    for candidate in candidates {
        let result = validate_secret(&candidate.value);
        match &result {
            Ok(secret) => debug!(
                "{}: accepted {} secret",
                candidate.label,
                secret.provider_type()
            ),
            Err(e) => warn!(
                "{}: rejected with {} issue(s)",
                candidate.label,
                e.issues().len()
            ),
        }

        let rejected = result.is_err();
        report.outcomes.push(SecretOutcome {
            label: candidate.label,
            result,
        });

        if rejected && behavior.fail_fast {
            report.skipped = total - report.outcomes.len();
            if report.skipped > 0 {
                info!("Fail-fast: skipping {} remaining candidate(s)", report.skipped);
            }
            break;
        }
    }

    report
}

/// Use case for validating secrets from one or more sources
pub struct ValidateSecretsUseCase {
    sources: Vec<Arc<dyn SecretSource>>,
}

impl ValidateSecretsUseCase {
    pub fn new(sources: Vec<Arc<dyn SecretSource>>) -> Self {
        Self { sources }
    }

    /// Load all sources concurrently, then validate in source order
    pub async fn execute(
        &self,
        input: ValidateSecretsInput,
    ) -> Result<ValidationReport, ValidateSecretsError> {
        if self.sources.is_empty() {
            return Err(ValidateSecretsError::NoSources);
        }

        info!("Loading secrets from {} source(s)", self.sources.len());

        let loaded = join_all(self.sources.iter().map(|s| s.load())).await;

        let mut candidates = Vec::new();
        for (source, result) in self.sources.iter().zip(loaded) {
            let batch = result?;
            debug!("{}: {} candidate(s)", source.name(), batch.len());
            candidates.extend(batch);
        }

        let report = validate_candidates(candidates, input.behavior);
        info!(
            "Validated {} candidate(s): {} valid, {} invalid",
            report.outcomes.len(),
            report.valid_count(),
            report.invalid_count()
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use secrets_domain::ProviderType;
    use serde_json::json;

    struct StaticSource {
        name: String,
        candidates: Vec<CandidateSecret>,
    }

    impl StaticSource {
        fn new(name: &str, values: Vec<serde_json::Value>) -> Arc<dyn SecretSource> {
            let candidates = values
                .into_iter()
                .enumerate()
                .map(|(i, v)| CandidateSecret::new(format!("{}#{}", name, i), v))
                .collect();
            Arc::new(Self {
                name: name.to_string(),
                candidates,
            })
        }
    }

    #[async_trait]
    impl SecretSource for StaticSource {
        fn name(&self) -> String {
            self.name.clone()
        }

        async fn load(&self) -> Result<Vec<CandidateSecret>, SourceError> {
            Ok(self.candidates.clone())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl SecretSource for BrokenSource {
        fn name(&self) -> String {
            "broken".to_string()
        }

        async fn load(&self) -> Result<Vec<CandidateSecret>, SourceError> {
            Err(SourceError::Parse {
                source_name: "broken".to_string(),
                message: "unexpected end of input".to_string(),
            })
        }
    }

    fn valid() -> serde_json::Value {
        json!({"type": "anthropic", "secret": "sk-ant"})
    }

    fn invalid() -> serde_json::Value {
        json!({"type": "azure", "secret": "k"})
    }

    #[test]
    fn test_validate_candidates_counts() {
        let candidates = vec![
            CandidateSecret::new("a", valid()),
            CandidateSecret::new("b", invalid()),
            CandidateSecret::new("c", valid()),
        ];
        let report = validate_candidates(candidates, BehaviorConfig::default());
        assert_eq!(report.valid_count(), 2);
        assert_eq!(report.invalid_count(), 1);
        assert_eq!(report.skipped, 0);
        assert!(!report.is_success());

        let invalid_labels: Vec<_> = report.invalid().map(|(label, _)| label).collect();
        assert_eq!(invalid_labels, vec!["b"]);
    }

    #[test]
    fn test_fail_fast_skips_remaining() {
        let candidates = vec![
            CandidateSecret::new("a", invalid()),
            CandidateSecret::new("b", valid()),
            CandidateSecret::new("c", valid()),
        ];
        let report = validate_candidates(candidates, BehaviorConfig::fail_fast());
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn test_empty_report_is_success() {
        let report = validate_candidates(vec![], BehaviorConfig::default());
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_execute_keeps_source_order() {
        let use_case = ValidateSecretsUseCase::new(vec![
            StaticSource::new("first", vec![valid(), invalid()]),
            StaticSource::new(
                "second",
                vec![json!({"type": "openai", "secret": "sk", "metadata": {}})],
            ),
        ]);

        let report = use_case
            .execute(ValidateSecretsInput::default())
            .await
            .unwrap();
        let labels: Vec<_> = report.outcomes.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["first#0", "first#1", "second#0"]);

        let providers: Vec<_> = report.valid().map(|(_, s)| s.provider_type()).collect();
        assert_eq!(providers, vec![ProviderType::Anthropic, ProviderType::OpenAi]);
    }

    #[tokio::test]
    async fn test_execute_without_sources() {
        let use_case = ValidateSecretsUseCase::new(vec![]);
        let result = use_case.execute(ValidateSecretsInput::default()).await;
        assert!(matches!(result, Err(ValidateSecretsError::NoSources)));
    }

    #[tokio::test]
    async fn test_source_error_aborts() {
        let use_case = ValidateSecretsUseCase::new(vec![
            StaticSource::new("ok", vec![valid()]),
            Arc::new(BrokenSource),
        ]);
        let err = use_case
            .execute(ValidateSecretsInput::default())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to parse broken: unexpected end of input"
        );
    }
}
