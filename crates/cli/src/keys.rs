// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Detection of mappings keyed by data rather than by schema.

use regex::Regex;

/// Decides whether a mapping's keys are caller-defined and should collapse
/// to a single wildcard key.
#[derive(Clone, Debug)]
pub struct KeyDetector {
    key_patterns: Vec<Regex>,
    min_keys: usize,
    forced_paths: Vec<Regex>,
}

impl KeyDetector {
    /// Patterns are expected to be anchored to the whole input already.
    pub fn new(key_patterns: Vec<Regex>, min_keys: usize, forced_paths: Vec<Regex>) -> Self {
        Self {
            key_patterns,
            min_keys,
            forced_paths,
        }
    }

    /// Whether `path` is on the explicit force-collapse list.
    pub fn path_forces_dynamic(&self, path: &str) -> bool {
        self.forced_paths.iter().any(|p| p.is_match(path))
    }

    /// Whether every key looks like data, and there are enough of them.
    ///
    /// One ordinary key anywhere in the set disables the heuristic.
    pub fn keys_look_dynamic<S: AsRef<str>>(&self, keys: &[S]) -> bool {
        keys.len() >= self.min_keys
            && keys.iter().all(|k| {
                let k = k.as_ref();
                self.key_patterns.iter().any(|p| p.is_match(k))
            })
    }

    pub fn is_dynamic<S: AsRef<str>>(&self, path: &str, keys: &[S]) -> bool {
        self.path_forces_dynamic(path) || self.keys_look_dynamic(keys)
    }
}

#[cfg(test)]
#[path = "keys_tests.rs"]
mod tests;
