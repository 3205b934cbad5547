// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recorded verdict data types.

use crate::duration_serde;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// One recorded check
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordedVerdict {
    /// Sequence number
    pub seq: u64,

    /// Wall-clock timestamp
    pub timestamp: SystemTime,

    /// Elapsed time since the log was opened
    #[serde(with = "duration_serde")]
    pub elapsed: Duration,

    /// Which snapshot identity was checked
    pub identity: Identity,

    /// What the engine decided
    pub outcome: RecordedOutcome,
}

/// Snapshot identity: test label plus output mode
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub label: String,
    pub mode: String,
}

impl Identity {
    pub fn new(label: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            mode: mode.into(),
        }
    }
}

/// Verdict for one identity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordedOutcome {
    Passed {
        additions: Vec<String>,
        baseline_created: bool,
        baseline_updated: bool,
    },
    Regressed {
        regressions: Vec<String>,
        additions: Vec<String>,
        baseline_updated: bool,
    },
    Skipped {
        reason: String,
    },
}

impl RecordedOutcome {
    /// Whether this verdict fails the run
    pub fn is_failure(&self) -> bool {
        matches!(self, RecordedOutcome::Regressed { .. })
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
