//! Provider metadata variants and their validators
//!
//! Three closed shapes share the `{models, customModels}` base:
//!
//! | Variant | Extra fields |
//! |---------|--------------|
//! | [`BaseMetadata`] | none |
//! | [`OpenAiMetadata`] | `organization_id?` |
//! | [`AzureMetadata`] | `api_base`, `api_version` (defaulted), `deployment?` |
//!
//! Each `from_value` is a parse: on success it returns a normalized value,
//! which for Azure includes the default `api_version` when it was omitted.

use super::provider::{ModelFlavor, ModelFormat, ModelSpec};
use super::reader::{ObjectReader, expect_literal, expect_string};
use crate::core::error::{ValidationError, ValidationIssue, ValueKind};
use crate::core::path::FieldPath;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// `api_version` used for Azure secrets that do not pin one
pub const DEFAULT_AZURE_API_VERSION: &str = "2023-07-01-preview";

const BASE_KEYS: [&str; 2] = ["models", "customModels"];
const OPENAI_KEYS: [&str; 3] = ["models", "customModels", "organization_id"];
const AZURE_KEYS: [&str; 5] = [
    "models",
    "customModels",
    "api_base",
    "api_version",
    "deployment",
];
const MODEL_SPEC_KEYS: [&str; 2] = ["format", "flavor"];

/// Metadata shared by every provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BaseMetadata {
    /// Model identifiers enabled for this secret, order preserved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
    /// Custom model declarations keyed by model name
    #[serde(rename = "customModels", skip_serializing_if = "Option::is_none")]
    pub custom_models: Option<BTreeMap<String, ModelSpec>>,
}

impl BaseMetadata {
    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = Some(models.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_custom_model(mut self, name: impl Into<String>, spec: ModelSpec) -> Self {
        self.custom_models
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), spec);
        self
    }

    /// Validate `value` as closed base metadata
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        Self::parse_at(value, FieldPath::root()).map_err(ValidationError::new)
    }

    pub(crate) fn parse_at(value: &Value, path: FieldPath) -> Result<Self, Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        let Some(reader) = ObjectReader::new(value, path, &mut issues) else {
            return Err(issues);
        };
        reader.reject_unknown(&BASE_KEYS, &mut issues);
        let base = read_base_fields(&reader, &mut issues);
        finish(base, issues)
    }
}

/// OpenAI metadata: base fields plus an optional organization id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OpenAiMetadata {
    #[serde(flatten)]
    pub base: BaseMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

impl OpenAiMetadata {
    pub fn with_organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    /// Validate `value` as closed OpenAI metadata
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        Self::parse_at(value, FieldPath::root()).map_err(ValidationError::new)
    }

    pub(crate) fn parse_at(value: &Value, path: FieldPath) -> Result<Self, Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        let Some(reader) = ObjectReader::new(value, path, &mut issues) else {
            return Err(issues);
        };
        reader.reject_unknown(&OPENAI_KEYS, &mut issues);
        let base = read_base_fields(&reader, &mut issues);
        let organization_id = reader.optional_string("organization_id", &mut issues);

        match (base, organization_id) {
            (Some(base), Some(organization_id)) if issues.is_empty() => Ok(Self {
                base,
                organization_id,
            }),
            _ => Err(issues),
        }
    }
}

/// Azure OpenAI metadata: base fields plus deployment coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AzureMetadata {
    #[serde(flatten)]
    pub base: BaseMetadata,
    pub api_base: String,
    pub api_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment: Option<String>,
}

impl AzureMetadata {
    /// Metadata for `api_base` with the default API version
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            base: BaseMetadata::default(),
            api_base: api_base.into(),
            api_version: DEFAULT_AZURE_API_VERSION.to_string(),
            deployment: None,
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = Some(deployment.into());
        self
    }

    /// Validate `value` as closed Azure metadata, defaulting `api_version`
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        Self::parse_at(value, FieldPath::root()).map_err(ValidationError::new)
    }

    pub(crate) fn parse_at(value: &Value, path: FieldPath) -> Result<Self, Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        let Some(reader) = ObjectReader::new(value, path, &mut issues) else {
            return Err(issues);
        };
        reader.reject_unknown(&AZURE_KEYS, &mut issues);
        let base = read_base_fields(&reader, &mut issues);
        let api_base = reader.required_string("api_base", &mut issues);
        let api_version = reader
            .optional_string("api_version", &mut issues)
            .map(|v| v.unwrap_or_else(|| DEFAULT_AZURE_API_VERSION.to_string()));
        let deployment = reader.optional_string("deployment", &mut issues);

        match (base, api_base, api_version, deployment) {
            (Some(base), Some(api_base), Some(api_version), Some(deployment))
                if issues.is_empty() =>
            {
                Ok(Self {
                    base,
                    api_base,
                    api_version,
                    deployment,
                })
            }
            _ => Err(issues),
        }
    }
}

fn finish<T>(value: Option<T>, issues: Vec<ValidationIssue>) -> Result<T, Vec<ValidationIssue>> {
    match value {
        Some(value) if issues.is_empty() => Ok(value),
        _ => Err(issues),
    }
}

fn read_base_fields(
    reader: &ObjectReader<'_>,
    issues: &mut Vec<ValidationIssue>,
) -> Option<BaseMetadata> {
    let models = match reader.get("models") {
        Some(value) => parse_models(value, reader.field_path("models"), issues).map(Some),
        None => Some(None),
    };
    let custom_models = match reader.get("customModels") {
        Some(value) => {
            parse_custom_models(value, reader.field_path("customModels"), issues).map(Some)
        }
        None => Some(None),
    };

    Some(BaseMetadata {
        models: models?,
        custom_models: custom_models?,
    })
}

fn parse_models(
    value: &Value,
    path: FieldPath,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Vec<String>> {
    let Value::Array(items) = value else {
        issues.push(ValidationIssue::invalid_type(path, ValueKind::Array, value));
        return None;
    };

    let before = issues.len();
    let models: Vec<String> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| expect_string(item, path.index(i), issues).map(str::to_string))
        .collect();
    (issues.len() == before).then_some(models)
}

fn parse_custom_models(
    value: &Value,
    path: FieldPath,
    issues: &mut Vec<ValidationIssue>,
) -> Option<BTreeMap<String, ModelSpec>> {
    let Value::Object(entries) = value else {
        issues.push(ValidationIssue::invalid_type(path, ValueKind::Object, value));
        return None;
    };

    let before = issues.len();
    let specs: BTreeMap<String, ModelSpec> = entries
        .iter()
        .filter_map(|(name, spec)| {
            parse_model_spec(spec, path.key(name.as_str()), issues).map(|s| (name.clone(), s))
        })
        .collect();
    (issues.len() == before).then_some(specs)
}

fn parse_model_spec(
    value: &Value,
    path: FieldPath,
    issues: &mut Vec<ValidationIssue>,
) -> Option<ModelSpec> {
    let reader = ObjectReader::new(value, path, issues)?;
    reader.reject_unknown(&MODEL_SPEC_KEYS, issues);

    let format = match reader.get("format") {
        Some(v) => expect_literal::<ModelFormat>(
            v,
            reader.field_path("format"),
            &ModelFormat::NAMES,
            issues,
        ),
        None => {
            issues.push(ValidationIssue::missing(
                reader.field_path("format"),
                ValueKind::String,
            ));
            None
        }
    };
    let flavor = match reader.get("flavor") {
        Some(v) => expect_literal::<ModelFlavor>(
            v,
            reader.field_path("flavor"),
            &ModelFlavor::NAMES,
            issues,
        ),
        None => {
            issues.push(ValidationIssue::missing(
                reader.field_path("flavor"),
                ValueKind::String,
            ));
            None
        }
    };

    Some(ModelSpec::new(format?, flavor?))
}
