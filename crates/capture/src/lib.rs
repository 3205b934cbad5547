// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verdict recording for shapeshot regression runs.
//!
//! Every checked identity appends one JSONL line so report tooling can read
//! verdicts back without re-running the schema engine.

mod duration_serde;
mod error;
mod log;
mod record;
mod summary;

pub use error::LogError;
pub use log::{read_log, VerdictLog};
pub use record::{Identity, RecordedOutcome, RecordedVerdict};
pub use summary::Summary;
