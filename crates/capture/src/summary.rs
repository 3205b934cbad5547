// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Roll-up of a verdict log.

use crate::record::{Identity, RecordedOutcome, RecordedVerdict};
use std::collections::BTreeMap;

/// Counts over the latest verdict of each identity
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub regressed: usize,
    pub skipped: usize,
    /// Identities whose baseline was written for the first time
    pub baselines_created: usize,
    /// Identities whose latest verdict regressed, sorted by label then mode
    pub failures: Vec<Identity>,
}

impl Summary {
    /// Summarize a log that may hold several runs; later lines replace
    /// earlier ones for the same identity.
    pub fn from_verdicts(verdicts: &[RecordedVerdict]) -> Self {
        let mut latest: BTreeMap<(&str, &str), &RecordedVerdict> = BTreeMap::new();
        for v in verdicts {
            latest.insert((v.identity.label.as_str(), v.identity.mode.as_str()), v);
        }

        let mut summary = Summary::default();
        for v in latest.into_values() {
            match &v.outcome {
                RecordedOutcome::Passed {
                    baseline_created, ..
                } => {
                    summary.passed += 1;
                    if *baseline_created {
                        summary.baselines_created += 1;
                    }
                }
                RecordedOutcome::Regressed { .. } => {
                    summary.regressed += 1;
                    summary.failures.push(v.identity.clone());
                }
                RecordedOutcome::Skipped { .. } => summary.skipped += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.passed + self.regressed + self.skipped
    }

    pub fn has_failures(&self) -> bool {
        self.regressed > 0
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
