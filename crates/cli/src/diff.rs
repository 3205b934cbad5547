// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Schema comparison.
//!
//! Every discrepancy between a baseline and the current schema is either a
//! regression (fails the run) or an addition (folded into the baseline).

use crate::path::SchemaPath;
use crate::rules::Rules;
use crate::schema::SchemaNode;
use std::collections::BTreeSet;

/// Result of comparing two schemas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaDiff {
    pub regressions: Vec<String>,
    pub additions: Vec<String>,
}

impl SchemaDiff {
    /// True when neither side has anything to report.
    pub fn is_empty(&self) -> bool {
        self.regressions.is_empty() && self.additions.is_empty()
    }

    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }

    /// Format the diff as a human-readable report.
    pub fn report(&self) -> String {
        if self.is_empty() {
            return "No differences found.".to_string();
        }

        let mut lines = Vec::new();
        if !self.regressions.is_empty() {
            lines.push(format!("Found {} regressions:", self.regressions.len()));
            lines.extend(self.regressions.iter().map(|r| format!("  - {}", r)));
        }
        if !self.additions.is_empty() {
            lines.push(format!("Found {} additions:", self.additions.len()));
            lines.extend(self.additions.iter().map(|a| format!("  + {}", a)));
        }
        lines.join("\n")
    }
}

/// Compares a baseline schema with a freshly extracted one.
#[derive(Clone, Copy, Debug)]
pub struct Differ<'r> {
    rules: &'r Rules,
}

impl<'r> Differ<'r> {
    pub fn new(rules: &'r Rules) -> Self {
        Self { rules }
    }

    pub fn diff(&self, baseline: &SchemaNode, current: &SchemaNode) -> SchemaDiff {
        let mut out = SchemaDiff::default();
        self.diff_at(baseline, current, &SchemaPath::root(), &mut out);
        tracing::debug!(
            regressions = out.regressions.len(),
            additions = out.additions.len(),
            "diffed schemas"
        );
        out
    }

    fn diff_at(&self, old: &SchemaNode, new: &SchemaNode, path: &SchemaPath, out: &mut SchemaDiff) {
        if old.kind() != new.kind() {
            out.regressions.push(format!(
                "{}: type changed {} → {}",
                path.label(),
                old.kind(),
                new.kind()
            ));
            return;
        }

        if let (Some(old_entries), Some(new_entries)) = (old.entries(), new.entries()) {
            let old_keys: BTreeSet<&str> = old_entries.keys().copied().collect();
            let new_keys: BTreeSet<&str> = new_entries.keys().copied().collect();

            for k in old_keys.difference(&new_keys) {
                let full_path = path.key(k).to_string();
                if self.rules.is_optional(&full_path) {
                    continue;
                }
                out.regressions.push(format!("{}: key removed", full_path));
            }
            for k in new_keys.difference(&old_keys) {
                out.additions.push(format!("{}: key added", path.key(k)));
            }
            for k in old_keys.intersection(&new_keys) {
                self.diff_at(old_entries[k], new_entries[k], &path.key(k), out);
            }
            return;
        }

        match (old, new) {
            (SchemaNode::Seq(old_inner), SchemaNode::Seq(new_inner)) => {
                self.diff_at(old_inner, new_inner, &path.element(), out);
            }
            (SchemaNode::EmptySeq, SchemaNode::EmptySeq) => {}
            (SchemaNode::EmptySeq, SchemaNode::Seq(_)) | (SchemaNode::Seq(_), SchemaNode::EmptySeq) => {
                // Emptiness depends on what the data source returned this time
                out.additions.push(format!(
                    "{}: list emptiness changed '{}' → '{}'",
                    path.label(),
                    old.seq_marker().unwrap_or_default(),
                    new.seq_marker().unwrap_or_default()
                ));
            }
            _ => self.diff_tokens(old, new, path, out),
        }
    }

    fn diff_tokens(&self, old: &SchemaNode, new: &SchemaNode, path: &SchemaPath, out: &mut SchemaDiff) {
        let (Some(old_token), Some(new_token)) = (old.token(), new.token()) else {
            return;
        };
        if old_token == new_token {
            return;
        }

        let normalizer = self.rules.normalizer();
        if normalizer.is_placeholder(old_token) && normalizer.is_placeholder(new_token) {
            out.additions.push(format!(
                "{}: placeholder changed '{}' → '{}'",
                path.label(),
                old_token,
                new_token
            ));
        } else {
            out.regressions.push(format!(
                "{}: value changed '{}' → '{}'",
                path.label(),
                old_token,
                new_token
            ));
        }
    }
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
