//! Console output formatter for validation reports

use crate::output::formatter::{FormatOptions, OutputFormatter, normalized_json};
use colored::Colorize;
use secrets_application::{SecretOutcome, ValidationReport};
use secrets_domain::ValidationError;
use serde_json::{Value, json};

/// Formats validation reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Enable or disable ANSI colors for everything this formatter prints
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format the complete report
    pub fn format(report: &ValidationReport, options: &FormatOptions) -> String {
        let mut output = String::new();

        for outcome in &report.outcomes {
            output.push_str(&Self::format_outcome(outcome, options));
        }

        output.push_str(&Self::summary(report));
        output
    }

    /// Format as JSON
    pub fn format_json(report: &ValidationReport, options: &FormatOptions) -> String {
        let results: Vec<Value> = report
            .outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(secret) => {
                    let mut entry = json!({
                        "label": outcome.label,
                        "valid": true,
                        "type": secret.provider_type().as_str(),
                    });
                    if options.show_normalized {
                        entry["normalized"] = normalized_json(secret, options.redact);
                    }
                    entry
                }
                Err(error) => json!({
                    "label": outcome.label,
                    "valid": false,
                    "error": error.to_string(),
                    "details": error,
                }),
            })
            .collect();

        let document = json!({
            "valid": report.valid_count(),
            "invalid": report.invalid_count(),
            "skipped": report.skipped,
            "results": results,
        });
        serde_json::to_string_pretty(&document).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_outcome(outcome: &SecretOutcome, options: &FormatOptions) -> String {
        match &outcome.result {
            Ok(secret) => {
                let mut text = format!(
                    "{} {} ({})\n",
                    "ok".green().bold(),
                    outcome.label,
                    secret.provider_type()
                );
                if options.show_normalized {
                    let normalized = normalized_json(secret, options.redact);
                    let pretty = serde_json::to_string_pretty(&normalized)
                        .unwrap_or_else(|_| "{}".to_string());
                    text.push_str(&Self::indent(&pretty, "    "));
                    text.push('\n');
                }
                text
            }
            Err(error) => format!(
                "{} {}\n{}",
                "invalid".red().bold(),
                outcome.label,
                Self::format_error(error)
            ),
        }
    }

    fn format_error(error: &ValidationError) -> String {
        let mut text = String::new();
        for issue in error.issues() {
            text.push_str(&format!(
                "    {} {}\n",
                format!("{}:", issue.path).yellow(),
                issue.kind
            ));
        }
        if !error.attempts().is_empty() {
            let tried = error
                .attempts()
                .iter()
                .map(|a| a.alternative.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            text.push_str(&format!("    {}\n", format!("(tried: {})", tried).dimmed()));
        }
        text
    }

    fn summary(report: &ValidationReport) -> String {
        let mut line = format!(
            "\n{} {} valid, {} invalid",
            "Summary:".cyan().bold(),
            report.valid_count(),
            report.invalid_count()
        );
        if report.skipped > 0 {
            line.push_str(&format!(", {} skipped", report.skipped));
        }
        line.push('\n');
        line
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &ValidationReport, options: &FormatOptions) -> String {
        Self::format(report, options)
    }

    fn format_json(&self, report: &ValidationReport, options: &FormatOptions) -> String {
        Self::format_json(report, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrets_application::{BehaviorConfig, CandidateSecret, validate_candidates};

    fn report() -> ValidationReport {
        ConsoleFormatter::set_color(false);
        validate_candidates(
            vec![
                CandidateSecret::new(
                    "a.json#0",
                    json!({"type": "anthropic", "secret": "sk-ant-abcdef"}),
                ),
                CandidateSecret::new("a.json#1", json!({"type": "bogus", "secret": "k"})),
            ],
            BehaviorConfig::default(),
        )
    }

    #[test]
    fn test_text_report() {
        let text = ConsoleFormatter::format(&report(), &FormatOptions::default());
        assert!(text.contains("ok a.json#0 (anthropic)"));
        assert!(text.contains("invalid a.json#1"));
        assert!(text.contains("type: expected one of"));
        assert!(text.contains("(tried: base, openai, azure)"));
        assert!(text.contains("1 valid, 1 invalid"));
    }

    #[test]
    fn test_text_report_never_prints_secret_by_default() {
        let options = FormatOptions {
            redact: true,
            show_normalized: true,
        };
        let text = ConsoleFormatter::format(&report(), &options);
        assert!(!text.contains("sk-ant-abcdef"));
        assert!(text.contains("sk-a****"));
    }

    #[test]
    fn test_json_report() {
        let options = FormatOptions {
            redact: false,
            show_normalized: true,
        };
        let json = ConsoleFormatter::format_json(&report(), &options);
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["valid"], 1);
        assert_eq!(value["invalid"], 1);
        assert_eq!(value["results"][0]["normalized"]["secret"], "sk-ant-abcdef");
        assert_eq!(value["results"][1]["details"]["issues"][0]["path"], "type");
        assert_eq!(
            value["results"][1]["details"]["issues"][0]["code"],
            "invalid_enum_value"
        );
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
