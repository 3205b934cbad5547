// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule tables for schema extraction and comparison.
//!
//! [`RuleConfig`] is the serializable form read from a TOML or JSON rules
//! file; every field falls back to the built-in tables. [`Rules`] is the
//! compiled, immutable form handed to the extractor and differ.

use crate::keys::KeyDetector;
use crate::normalize::Normalizer;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

/// Default maximum extraction depth
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Default minimum key count for heuristic collapse
pub const DEFAULT_DYNAMIC_KEY_MIN: usize = 4;

const UUID_PATTERN: &str = r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$";

/// Errors that can occur when loading rule tables
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid regex pattern '{pattern}': {error}")]
    InvalidRegex { pattern: String, error: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Leaf normalization rule: strings matching `pattern` become `placeholder`
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NormalizerRule {
    pub pattern: String,
    pub placeholder: String,
}

/// Serializable rule tables
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Ordered leaf normalizers; first match wins
    #[serde(default = "default_value_normalizers")]
    pub value_normalizers: Vec<NormalizerRule>,

    /// Key shapes that look like data rather than schema (full match)
    #[serde(default = "default_dynamic_key_patterns")]
    pub dynamic_key_patterns: Vec<String>,

    /// Minimum key count before the key-shape heuristic applies
    #[serde(default = "default_dynamic_key_min")]
    pub dynamic_key_min: usize,

    /// Paths whose mappings always collapse (full match)
    #[serde(default = "default_force_dynamic_paths")]
    pub force_dynamic_paths: Vec<String>,

    /// Absolute paths whose removal is not a regression
    #[serde(default = "default_optional_paths")]
    pub optional_paths: Vec<String>,

    /// Maximum extraction depth
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_value_normalizers() -> Vec<NormalizerRule> {
    [
        (UUID_PATTERN, "<uuid>"),
        (r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}", "<timestamp>"),
        (r"^\d{10,13}$", "<unix_ts>"),
        (r"^https?://", "<url>"),
        (r"(?i)^[0-9a-f]{32,64}$", "<hash>"),
    ]
    .into_iter()
    .map(|(pattern, placeholder)| NormalizerRule {
        pattern: pattern.to_string(),
        placeholder: placeholder.to_string(),
    })
    .collect()
}

fn default_dynamic_key_patterns() -> Vec<String> {
    [
        UUID_PATTERN,
        // env:prod, host:web-01
        r"^[a-z0-9]([a-z0-9\-\.]*[a-z0-9])?:[^:]+$",
        r"^\d+$",
        // system.cpu.user
        r"^[a-z][a-z0-9_\-\.]+\.[a-z][a-z0-9_\-\.]+",
        // apm-service, account-config
        r"^[a-z][a-z0-9_]*(-[a-z0-9_]+)+$",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_dynamic_key_min() -> usize {
    DEFAULT_DYNAMIC_KEY_MIN
}

fn default_force_dynamic_paths() -> Vec<String> {
    [
        r".*\.tags",
        r".*\.meta",
        r".*\.attributes",
        r".*\.attributes\.\*",
        r".*\.metrics",
        r".*\.relationships",
        r".*\.usage",
        // keyed by cloud provider name
        r".*\.tags_by_source",
        // two dynamic levels in a row
        r".*\.\*\.\*.*",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_optional_paths() -> Vec<String> {
    vec![
        ".metadata.next_action".to_string(),
        ".metadata.truncated".to_string(),
    ]
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            value_normalizers: default_value_normalizers(),
            dynamic_key_patterns: default_dynamic_key_patterns(),
            dynamic_key_min: default_dynamic_key_min(),
            force_dynamic_paths: default_force_dynamic_paths(),
            optional_paths: default_optional_paths(),
            max_depth: default_max_depth(),
        }
    }
}

impl RuleConfig {
    /// Load rule tables from a TOML or JSON file
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let content = std::fs::read_to_string(path)?;
        let config = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        Ok(config)
    }

    /// Compile into immutable rules, validating every pattern
    pub fn compile(&self) -> Result<Rules, RulesError> {
        if self.max_depth == 0 {
            return Err(RulesError::Validation(
                "max_depth must be positive".to_string(),
            ));
        }
        for rule in &self.value_normalizers {
            if rule.placeholder.is_empty() {
                return Err(RulesError::Validation(format!(
                    "empty placeholder for pattern '{}'",
                    rule.pattern
                )));
            }
        }

        let normalizers = self
            .value_normalizers
            .iter()
            .map(|rule| Ok((compile_search(&rule.pattern)?, rule.placeholder.clone())))
            .collect::<Result<Vec<_>, RulesError>>()?;
        let key_patterns = self
            .dynamic_key_patterns
            .iter()
            .map(|p| compile_full(p))
            .collect::<Result<Vec<_>, _>>()?;
        let forced_paths = self
            .force_dynamic_paths
            .iter()
            .map(|p| compile_full(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Rules {
            normalizer: Normalizer::new(normalizers),
            detector: KeyDetector::new(key_patterns, self.dynamic_key_min, forced_paths),
            optional_paths: self.optional_paths.iter().cloned().collect(),
            max_depth: self.max_depth,
        })
    }
}

fn compile_search(pattern: &str) -> Result<Regex, RulesError> {
    Regex::new(pattern).map_err(|e| invalid(pattern, e))
}

/// Anchor a pattern so it must match the whole input
fn compile_full(pattern: &str) -> Result<Regex, RulesError> {
    // Validate the pattern on its own first so errors name what the user wrote
    Regex::new(pattern).map_err(|e| invalid(pattern, e))?;
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| invalid(pattern, e))
}

fn invalid(pattern: &str, error: regex::Error) -> RulesError {
    RulesError::InvalidRegex {
        pattern: pattern.to_string(),
        error: error.to_string(),
    }
}

/// Compiled rule tables
#[derive(Clone, Debug)]
pub struct Rules {
    normalizer: Normalizer,
    detector: KeyDetector,
    optional_paths: BTreeSet<String>,
    max_depth: usize,
}

impl Rules {
    /// The built-in tables
    pub fn builtin() -> Result<Self, RulesError> {
        RuleConfig::default().compile()
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn detector(&self) -> &KeyDetector {
        &self.detector
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Whether removal of `path` (rendered form) is exempt from regression
    pub fn is_optional(&self, path: &str) -> bool {
        self.optional_paths.contains(path)
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
