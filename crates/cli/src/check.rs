// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One regression check: extract, compare against the stored baseline,
//! and fold additions back in.

use crate::diff::Differ;
use crate::extract::Extractor;
use crate::merge::merge;
use crate::rules::Rules;
use crate::store::{SnapshotKey, SnapshotStore, StoreError};
use crate::truncate::truncate;
use serde_json::Value;
use shapeshot_capture::RecordedOutcome;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("snapshot store: {0}")]
    Store(#[from] StoreError),
}

/// Per-check options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Accept the current schema as the new baseline without comparing
    pub update_snapshots: bool,
    /// Depth to compare at; 0 compares everything
    pub regression_depth: usize,
}

/// Result of checking one identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    pub regressions: Vec<String>,
    pub additions: Vec<String>,
    pub baseline_created: bool,
    pub baseline_updated: bool,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.regressions.is_empty()
    }
}

/// Why captured output was not checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NonZeroExit(i32),
    EmptyOutput,
    NotJson,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NonZeroExit(code) => write!(f, "exited with code {}", code),
            SkipReason::EmptyOutput => write!(f, "no output"),
            SkipReason::NotJson => write!(f, "output is not JSON"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Skipped(SkipReason),
    Checked(CheckOutcome),
}

impl Verdict {
    pub fn is_failure(&self) -> bool {
        matches!(self, Verdict::Checked(outcome) if !outcome.passed())
    }
}

impl From<&Verdict> for RecordedOutcome {
    fn from(verdict: &Verdict) -> Self {
        match verdict {
            Verdict::Skipped(reason) => RecordedOutcome::Skipped {
                reason: reason.to_string(),
            },
            Verdict::Checked(outcome) if outcome.passed() => RecordedOutcome::Passed {
                additions: outcome.additions.clone(),
                baseline_created: outcome.baseline_created,
                baseline_updated: outcome.baseline_updated,
            },
            Verdict::Checked(outcome) => RecordedOutcome::Regressed {
                regressions: outcome.regressions.clone(),
                additions: outcome.additions.clone(),
                baseline_updated: outcome.baseline_updated,
            },
        }
    }
}

/// Runs checks against one snapshot store.
///
/// Each identity must have a single writer: the load, compare and save
/// sequence for a key is not atomic.
#[derive(Debug)]
pub struct Checker<S> {
    rules: Rules,
    store: S,
}

impl<S: SnapshotStore> Checker<S> {
    pub fn new(rules: Rules, store: S) -> Self {
        Self { rules, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check captured process output, skipping anything that is not a
    /// successful JSON response.
    pub fn check_output(
        &self,
        key: &SnapshotKey,
        stdout: &str,
        exit_code: i32,
        options: CheckOptions,
    ) -> Result<Verdict, CheckError> {
        if exit_code != 0 {
            return Ok(Verdict::Skipped(SkipReason::NonZeroExit(exit_code)));
        }
        let stdout = stdout.trim();
        if stdout.is_empty() {
            return Ok(Verdict::Skipped(SkipReason::EmptyOutput));
        }
        let Ok(value) = serde_json::from_str::<Value>(stdout) else {
            return Ok(Verdict::Skipped(SkipReason::NotJson));
        };
        self.check(key, &value, options).map(Verdict::Checked)
    }

    pub fn check(
        &self,
        key: &SnapshotKey,
        value: &Value,
        options: CheckOptions,
    ) -> Result<CheckOutcome, CheckError> {
        let current = Extractor::new(&self.rules).extract(value);

        let baseline = match self.store.load(key) {
            Ok(baseline) => baseline,
            Err(StoreError::Corrupt { path, message }) => {
                tracing::warn!(%key, path = %path.display(), %message, "discarding unreadable baseline");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let Some(baseline) = baseline else {
            self.store.save(key, &current)?;
            tracing::info!(%key, "created baseline");
            return Ok(CheckOutcome {
                baseline_created: true,
                baseline_updated: true,
                ..CheckOutcome::default()
            });
        };

        if options.update_snapshots {
            self.store.save(key, &current)?;
            tracing::info!(%key, "replaced baseline");
            return Ok(CheckOutcome {
                baseline_updated: true,
                ..CheckOutcome::default()
            });
        }

        let differ = Differ::new(&self.rules);
        let diff = if options.regression_depth > 0 {
            differ.diff(
                &truncate(&baseline, options.regression_depth),
                &truncate(&current, options.regression_depth),
            )
        } else {
            differ.diff(&baseline, &current)
        };

        let mut baseline_updated = false;
        if !diff.additions.is_empty() {
            let merged = merge(&baseline, &current);
            if merged != baseline {
                self.store.save(key, &merged)?;
                baseline_updated = true;
                tracing::info!(%key, additions = diff.additions.len(), "merged additions into baseline");
            }
        }

        Ok(CheckOutcome {
            regressions: diff.regressions,
            additions: diff.additions,
            baseline_created: false,
            baseline_updated,
        })
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
