//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave.

/// Application behavior configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BehaviorConfig {
    /// Stop validating at the first rejected candidate.
    pub fail_fast: bool,
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig that stops at the first invalid candidate.
    pub fn fail_fast() -> Self {
        Self { fail_fast: true }
    }
}
