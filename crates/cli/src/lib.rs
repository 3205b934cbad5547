// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structural schema snapshots for CLI regression testing.
//!
//! A command's JSON output is reduced to its shape (keys, nesting and leaf
//! categories), stored as a baseline per (label, mode), and compared on later
//! runs. Shape changes that break consumers are regressions; new keys and
//! other widening changes are additions that are folded into the baseline.
//!
//! For the rule file format, see the **[Rules Reference](crate::docs::rules)**.
//!
#![doc = include_str!("../docs/USAGE.md")]

/// Documentation modules for docs.rs
pub mod docs {
    /// Rule file reference: normalizers, dynamic keys, optional paths.
    #[doc = include_str!("../docs/RULES.md")]
    pub mod rules {}
}

/// Re-exported verdict log types from the shapeshot-capture crate.
pub mod capture {
    pub use shapeshot_capture::{
        read_log, Identity, LogError, RecordedOutcome, RecordedVerdict, Summary, VerdictLog,
    };
}
pub mod check;
#[doc(hidden)]
pub mod cli;
pub mod diff;
#[doc(hidden)]
pub mod env;
pub mod extract;
pub mod keys;
pub mod merge;
pub mod normalize;
#[doc(hidden)]
pub mod output;
pub mod path;
pub mod rules;
pub mod schema;
pub mod store;
pub mod truncate;

pub use check::{CheckError, CheckOptions, CheckOutcome, Checker, SkipReason, Verdict};
pub use diff::{Differ, SchemaDiff};
pub use extract::Extractor;
pub use merge::merge;
pub use rules::{RuleConfig, Rules, RulesError};
pub use schema::SchemaNode;
pub use store::{FsStore, MemoryStore, SnapshotKey, SnapshotStore, StoreError};
pub use truncate::truncate;
