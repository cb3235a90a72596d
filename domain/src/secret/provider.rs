//! Provider type discriminant and custom model declarations

use serde::{Deserialize, Serialize};

/// Provider a secret authenticates against (the `type` discriminant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Perplexity,
    Anthropic,
    Google,
    Replicate,
    Together,
    Mistral,
    Js,
    OpenAi,
    Azure,
}

impl ProviderType {
    /// Every provider type, in declaration order
    pub const ALL: [ProviderType; 9] = [
        ProviderType::Perplexity,
        ProviderType::Anthropic,
        ProviderType::Google,
        ProviderType::Replicate,
        ProviderType::Together,
        ProviderType::Mistral,
        ProviderType::Js,
        ProviderType::OpenAi,
        ProviderType::Azure,
    ];

    /// Wire names of every provider type
    pub const ALL_NAMES: [&'static str; 9] = [
        "perplexity",
        "anthropic",
        "google",
        "replicate",
        "together",
        "mistral",
        "js",
        "openai",
        "azure",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Perplexity => "perplexity",
            ProviderType::Anthropic => "anthropic",
            ProviderType::Google => "google",
            ProviderType::Replicate => "replicate",
            ProviderType::Together => "together",
            ProviderType::Mistral => "mistral",
            ProviderType::Js => "js",
            ProviderType::OpenAi => "openai",
            ProviderType::Azure => "azure",
        }
    }

    /// Check if this provider uses the plain `{models, customModels}` metadata
    pub fn uses_base_metadata(&self) -> bool {
        BaseProvider::try_from(*self).is_ok()
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderType::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown provider type: {}", s))
    }
}

/// The providers whose secrets carry plain `{models, customModels}` metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseProvider {
    Perplexity,
    Anthropic,
    Google,
    Replicate,
    Together,
    Mistral,
    Js,
}

impl BaseProvider {
    pub const NAMES: [&'static str; 7] = [
        "perplexity",
        "anthropic",
        "google",
        "replicate",
        "together",
        "mistral",
        "js",
    ];

    pub fn as_str(&self) -> &'static str {
        ProviderType::from(*self).as_str()
    }
}

impl From<BaseProvider> for ProviderType {
    fn from(provider: BaseProvider) -> Self {
        match provider {
            BaseProvider::Perplexity => ProviderType::Perplexity,
            BaseProvider::Anthropic => ProviderType::Anthropic,
            BaseProvider::Google => ProviderType::Google,
            BaseProvider::Replicate => ProviderType::Replicate,
            BaseProvider::Together => ProviderType::Together,
            BaseProvider::Mistral => ProviderType::Mistral,
            BaseProvider::Js => ProviderType::Js,
        }
    }
}

impl TryFrom<ProviderType> for BaseProvider {
    type Error = ProviderType;

    fn try_from(provider: ProviderType) -> Result<Self, Self::Error> {
        match provider {
            ProviderType::Perplexity => Ok(BaseProvider::Perplexity),
            ProviderType::Anthropic => Ok(BaseProvider::Anthropic),
            ProviderType::Google => Ok(BaseProvider::Google),
            ProviderType::Replicate => Ok(BaseProvider::Replicate),
            ProviderType::Together => Ok(BaseProvider::Together),
            ProviderType::Mistral => Ok(BaseProvider::Mistral),
            ProviderType::Js => Ok(BaseProvider::Js),
            other @ (ProviderType::OpenAi | ProviderType::Azure) => Err(other),
        }
    }
}

impl std::fmt::Display for BaseProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BaseProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let provider: ProviderType = s.parse()?;
        BaseProvider::try_from(provider)
            .map_err(|p| format!("{} does not use base metadata", p))
    }
}

/// Request format a custom model speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    OpenAi,
    Anthropic,
    Google,
    Js,
}

impl ModelFormat {
    pub const NAMES: [&'static str; 4] = ["openai", "anthropic", "google", "js"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFormat::OpenAi => "openai",
            ModelFormat::Anthropic => "anthropic",
            ModelFormat::Google => "google",
            ModelFormat::Js => "js",
        }
    }
}

impl std::fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(ModelFormat::OpenAi),
            "anthropic" => Ok(ModelFormat::Anthropic),
            "google" => Ok(ModelFormat::Google),
            "js" => Ok(ModelFormat::Js),
            other => Err(format!("unknown model format: {}", other)),
        }
    }
}

/// Conversational flavor of a custom model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFlavor {
    Completion,
    Chat,
}

impl ModelFlavor {
    pub const NAMES: [&'static str; 2] = ["completion", "chat"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFlavor::Completion => "completion",
            ModelFlavor::Chat => "chat",
        }
    }
}

impl std::fmt::Display for ModelFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completion" => Ok(ModelFlavor::Completion),
            "chat" => Ok(ModelFlavor::Chat),
            other => Err(format!("unknown model flavor: {}", other)),
        }
    }
}

/// Declaration of a custom model: its request format and flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ModelSpec {
    pub format: ModelFormat,
    pub flavor: ModelFlavor,
}

impl ModelSpec {
    pub fn new(format: ModelFormat, flavor: ModelFlavor) -> Self {
        Self { format, flavor }
    }
}
