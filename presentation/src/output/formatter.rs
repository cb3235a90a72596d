//! Output formatter trait

use secrets_application::ValidationReport;
use secrets_domain::Secret;
use serde_json::Value;

/// Knobs shared by every formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Mask credentials in normalized records
    pub redact: bool,
    /// Include the normalized record of accepted candidates
    pub show_normalized: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            redact: true,
            show_normalized: false,
        }
    }
}

/// Trait for formatting validation reports
pub trait OutputFormatter {
    /// Human-readable report
    fn format(&self, report: &ValidationReport, options: &FormatOptions) -> String;

    /// Machine-readable report
    fn format_json(&self, report: &ValidationReport, options: &FormatOptions) -> String;
}

/// Normalized wire form of `secret`, with the credential masked if `redact`
pub fn normalized_json(secret: &Secret, redact: bool) -> Value {
    let mut value = serde_json::to_value(secret).unwrap_or(Value::Null);
    if redact {
        if let Some(field) = value.get_mut("secret") {
            *field = Value::String(secret.redacted_preview());
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn secret() -> Secret {
        Secret::from_value(&json!({"type": "mistral", "secret": "mistral-key-123"})).unwrap()
    }

    #[test]
    fn test_normalized_json_redacts() {
        let value = normalized_json(&secret(), true);
        assert_eq!(value["secret"], "mist****");
        assert_eq!(value["type"], "mistral");
    }

    #[test]
    fn test_normalized_json_unredacted() {
        let value = normalized_json(&secret(), false);
        assert_eq!(value["secret"], "mistral-key-123");
    }
}
