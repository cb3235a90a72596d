//! Closed-object field access over untyped JSON
//!
//! Every reader method records problems into a shared issue list and returns
//! `None` instead of failing early, so one pass reports every bad field.

use crate::core::error::{ValidationIssue, ValueKind};
use crate::core::path::FieldPath;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Read-only view over one JSON object level
pub(crate) struct ObjectReader<'a> {
    map: &'a Map<String, Value>,
    path: FieldPath,
}

impl<'a> ObjectReader<'a> {
    /// Returns `None` and records an issue when `value` is not an object
    pub fn new(
        value: &'a Value,
        path: FieldPath,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self { map, path }),
            other => {
                issues.push(ValidationIssue::invalid_type(path, ValueKind::Object, other));
                None
            }
        }
    }

    pub fn field_path(&self, key: &str) -> FieldPath {
        self.path.key(key)
    }

    /// Present value for `key`; JSON `null` counts as present
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key)
    }

    /// Records one issue listing every key outside `allowed`
    pub fn reject_unknown(&self, allowed: &[&str], issues: &mut Vec<ValidationIssue>) {
        let unknown: Vec<String> = self
            .map
            .keys()
            .filter(|k| !allowed.contains(&k.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            issues.push(ValidationIssue::unrecognized_keys(self.path.clone(), unknown));
        }
    }

    pub fn required_string(&self, key: &str, issues: &mut Vec<ValidationIssue>) -> Option<String> {
        match self.get(key) {
            Some(value) => expect_string(value, self.field_path(key), issues).map(str::to_string),
            None => {
                issues.push(ValidationIssue::missing(self.field_path(key), ValueKind::String));
                None
            }
        }
    }

    /// Outer `None` means the field was invalid; inner `None` means absent
    pub fn optional_string(
        &self,
        key: &str,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<Option<String>> {
        match self.get(key) {
            Some(value) => expect_string(value, self.field_path(key), issues)
                .map(|s| Some(s.to_string())),
            None => Some(None),
        }
    }
}

pub(crate) fn expect_string<'a>(
    value: &'a Value,
    path: FieldPath,
    issues: &mut Vec<ValidationIssue>,
) -> Option<&'a str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        other => {
            issues.push(ValidationIssue::invalid_type(path, ValueKind::String, other));
            None
        }
    }
}

/// Parses a string drawn from the closed set `names`
pub(crate) fn expect_literal<T: FromStr>(
    value: &Value,
    path: FieldPath,
    names: &[&'static str],
    issues: &mut Vec<ValidationIssue>,
) -> Option<T> {
    let s = expect_string(value, path.clone(), issues)?;
    if !names.contains(&s) {
        issues.push(ValidationIssue::invalid_enum(path, names, s));
        return None;
    }
    match s.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            issues.push(ValidationIssue::invalid_enum(path, names, s));
            None
        }
    }
}
