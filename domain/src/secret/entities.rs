//! Secret entity - a validated provider credential record

use super::metadata::{AzureMetadata, BaseMetadata, OpenAiMetadata};
use super::provider::{BaseProvider, ProviderType};
use super::validation::validate_secret;
use crate::core::error::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

/// Provider discriminant together with the metadata shape it requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretKind {
    /// Providers with plain metadata; the metadata itself is optional
    Base {
        provider: BaseProvider,
        metadata: Option<BaseMetadata>,
    },
    OpenAi { metadata: OpenAiMetadata },
    Azure { metadata: AzureMetadata },
}

impl SecretKind {
    pub fn provider_type(&self) -> ProviderType {
        match self {
            SecretKind::Base { provider, .. } => (*provider).into(),
            SecretKind::OpenAi { .. } => ProviderType::OpenAi,
            SecretKind::Azure { .. } => ProviderType::Azure,
        }
    }

    /// Base fields shared by every variant, if metadata is present
    pub fn base_metadata(&self) -> Option<&BaseMetadata> {
        match self {
            SecretKind::Base { metadata, .. } => metadata.as_ref(),
            SecretKind::OpenAi { metadata } => Some(&metadata.base),
            SecretKind::Azure { metadata } => Some(&metadata.base),
        }
    }
}

/// API credential for one LLM provider (Entity)
///
/// Only obtainable through validation (or the builders below), so a `Secret`
/// always has a metadata shape matching its provider type. `Debug` output
/// masks the credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret {
    /// Identifier assigned once persisted
    pub id: Option<Uuid>,
    /// Tenant/organization label
    pub org_name: Option<String>,
    /// Human-readable label
    pub name: Option<String>,
    /// Raw credential material
    pub secret: String,
    pub kind: SecretKind,
}

impl Secret {
    pub fn new(secret: impl Into<String>, kind: SecretKind) -> Self {
        Self {
            id: None,
            org_name: None,
            name: None,
            secret: secret.into(),
            kind,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_org_name(mut self, org_name: impl Into<String>) -> Self {
        self.org_name = Some(org_name.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Parse an untyped candidate record
    pub fn from_value(candidate: &Value) -> Result<Self, ValidationError> {
        validate_secret(candidate)
    }

    pub fn provider_type(&self) -> ProviderType {
        self.kind.provider_type()
    }

    /// Model identifiers declared in metadata
    pub fn models(&self) -> &[String] {
        self.kind
            .base_metadata()
            .and_then(|m| m.models.as_deref())
            .unwrap_or(&[])
    }

    /// At most the first four characters of the credential, then `****`
    pub fn redacted_preview(&self) -> String {
        let mut chars = self.secret.chars();
        let head: String = chars.by_ref().take(4).collect();
        if chars.next().is_none() {
            "****".to_string()
        } else {
            format!("{}****", head)
        }
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret")
            .field("id", &self.id)
            .field("org_name", &self.org_name)
            .field("name", &self.name)
            .field("secret", &"[REDACTED]")
            .field("kind", &self.kind)
            .finish()
    }
}

#[derive(Serialize)]
struct SecretWire<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    org_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    secret: &'a str,
    #[serde(rename = "type")]
    provider: ProviderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<MetadataWire<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MetadataWire<'a> {
    Base(&'a BaseMetadata),
    OpenAi(&'a OpenAiMetadata),
    Azure(&'a AzureMetadata),
}

impl Serialize for Secret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let metadata = match &self.kind {
            SecretKind::Base { metadata, .. } => metadata.as_ref().map(MetadataWire::Base),
            SecretKind::OpenAi { metadata } => Some(MetadataWire::OpenAi(metadata)),
            SecretKind::Azure { metadata } => Some(MetadataWire::Azure(metadata)),
        };
        SecretWire {
            id: self.id.as_ref(),
            org_name: self.org_name.as_deref(),
            name: self.name.as_deref(),
            secret: &self.secret,
            provider: self.provider_type(),
            metadata,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        validate_secret(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret::metadata::DEFAULT_AZURE_API_VERSION;
    use serde_json::json;

    fn anthropic(secret: &str) -> Secret {
        Secret::new(
            secret,
            SecretKind::Base {
                provider: BaseProvider::Anthropic,
                metadata: None,
            },
        )
    }

    #[test]
    fn test_debug_masks_secret() {
        let secret = anthropic("sk-ant-very-secret").with_name("prod");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("sk-ant-very-secret"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("prod"));
    }

    #[test]
    fn test_redacted_preview() {
        assert_eq!(anthropic("sk-ant-123").redacted_preview(), "sk-a****");
        assert_eq!(anthropic("abcd").redacted_preview(), "****");
        assert_eq!(anthropic("").redacted_preview(), "****");
        // Multi-byte characters are never split
        assert_eq!(anthropic("ключ-секрет").redacted_preview(), "ключ****");
    }

    #[test]
    fn test_provider_type() {
        assert_eq!(anthropic("k").provider_type(), ProviderType::Anthropic);
        let azure = Secret::new(
            "k",
            SecretKind::Azure {
                metadata: AzureMetadata::new("https://x"),
            },
        );
        assert_eq!(azure.provider_type(), ProviderType::Azure);
    }

    #[test]
    fn test_models_accessor() {
        assert!(anthropic("k").models().is_empty());
        let openai = Secret::new(
            "k",
            SecretKind::OpenAi {
                metadata: OpenAiMetadata {
                    base: BaseMetadata::default().with_models(["gpt-4o", "gpt-4o-mini"]),
                    organization_id: None,
                },
            },
        );
        assert_eq!(openai.models(), ["gpt-4o", "gpt-4o-mini"]);
    }

    #[test]
    fn test_serialize_base_without_metadata() {
        let secret = anthropic("k").with_org_name("acme");
        assert_eq!(
            serde_json::to_value(&secret).unwrap(),
            json!({"org_name": "acme", "secret": "k", "type": "anthropic"})
        );
    }

    #[test]
    fn test_serialize_azure() {
        let id = Uuid::parse_str("1b4e28ba-2fa1-11d2-883f-0016d3cca427").unwrap();
        let secret = Secret::new(
            "k",
            SecretKind::Azure {
                metadata: AzureMetadata::new("https://x"),
            },
        )
        .with_id(id);
        assert_eq!(
            serde_json::to_value(&secret).unwrap(),
            json!({
                "id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
                "secret": "k",
                "type": "azure",
                "metadata": {
                    "api_base": "https://x",
                    "api_version": DEFAULT_AZURE_API_VERSION,
                },
            })
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let secret: Secret = serde_json::from_str(
            r#"{"type": "openai", "secret": "sk-1", "metadata": {"organization_id": "org-1"}}"#,
        )
        .unwrap();
        assert_eq!(secret.provider_type(), ProviderType::OpenAi);

        let err = serde_json::from_str::<Secret>(r#"{"type": "bogus", "secret": "k"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("type"));
    }
}
