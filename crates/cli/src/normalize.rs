// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Leaf string normalization.
//!
//! Rotating identifiers, timestamps and URLs are replaced by a stable
//! placeholder so that content churn never shows up as schema churn.

use crate::schema::tokens;
use regex::Regex;

/// Ordered placeholder rules; the first matching rule wins.
#[derive(Clone, Debug)]
pub struct Normalizer {
    rules: Vec<(Regex, String)>,
}

impl Normalizer {
    pub fn new(rules: Vec<(Regex, String)>) -> Self {
        Self { rules }
    }

    /// Token for a leaf string: a placeholder, or the generic string token.
    pub fn normalize(&self, leaf: &str) -> &str {
        self.rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(leaf))
            .map(|(_, placeholder)| placeholder.as_str())
            .unwrap_or(tokens::STRING)
    }

    /// Whether `token` stands for "some string": any placeholder, or the
    /// generic string token.
    pub fn is_placeholder(&self, token: &str) -> bool {
        token == tokens::STRING || self.rules.iter().any(|(_, p)| p == token)
    }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
