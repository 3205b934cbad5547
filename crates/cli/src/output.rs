// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal output: check reports and diagnostics.
//!
//! Diagnostics are colored when stderr is a terminal.

use crate::check::{CheckOutcome, Verdict};
use crate::diff::SchemaDiff;
use crate::store::SnapshotKey;
use shapeshot_capture::Summary;
use std::io::{self, IsTerminal, Write};

/// Print an error message to stderr.
pub fn print_error(msg: impl std::fmt::Display) {
    let is_tty = io::stderr().is_terminal();
    write_error(&mut io::stderr(), msg, is_tty);
}

fn write_error<W: Write>(writer: &mut W, msg: impl std::fmt::Display, is_terminal: bool) {
    if is_terminal {
        let _ = writeln!(writer, "\x1b[31mError: {}\x1b[0m", msg);
    } else {
        let _ = writeln!(writer, "Error: {}", msg);
    }
}

/// Print a warning message to stderr.
pub fn print_warning(msg: impl std::fmt::Display) {
    let is_tty = io::stderr().is_terminal();
    write_warning(&mut io::stderr(), msg, is_tty);
}

fn write_warning<W: Write>(writer: &mut W, msg: impl std::fmt::Display, is_terminal: bool) {
    if is_terminal {
        let _ = writeln!(writer, "\x1b[33mWarning: {}\x1b[0m", msg);
    } else {
        let _ = writeln!(writer, "Warning: {}", msg);
    }
}

/// Write the report for one check.
///
/// ```text
/// ✓ services list [json]: baseline created
/// ✗ services list [json]: 1 regression
///   - .host: value changed 'string' → 'bool'
///   + .region: key added
/// ```
pub fn write_verdict<W: Write>(w: &mut W, key: &SnapshotKey, verdict: &Verdict) -> io::Result<()> {
    match verdict {
        Verdict::Skipped(reason) => writeln!(w, "- {}: skipped ({})", key, reason),
        Verdict::Checked(outcome) => write_outcome(w, key, outcome),
    }
}

fn write_outcome<W: Write>(w: &mut W, key: &SnapshotKey, outcome: &CheckOutcome) -> io::Result<()> {
    if outcome.baseline_created {
        return writeln!(w, "✓ {}: baseline created", key);
    }

    if outcome.passed() {
        let status = if outcome.baseline_updated {
            "baseline updated"
        } else {
            "matches baseline"
        };
        writeln!(w, "✓ {}: {}", key, status)?;
    } else {
        let n = outcome.regressions.len();
        writeln!(w, "✗ {}: {} regression{}", key, n, if n == 1 { "" } else { "s" })?;
    }

    for r in &outcome.regressions {
        writeln!(w, "  - {}", r)?;
    }
    for a in &outcome.additions {
        writeln!(w, "  + {}", a)?;
    }
    Ok(())
}

pub fn write_diff<W: Write>(w: &mut W, diff: &SchemaDiff) -> io::Result<()> {
    writeln!(w, "{}", diff.report())
}

/// Write the roll-up of a verdict log.
///
/// ```text
/// 3 checked: 1 passed, 1 regressed, 1 skipped (1 baseline created)
///   ✗ services list [json]
/// ```
pub fn write_summary<W: Write>(w: &mut W, summary: &Summary) -> io::Result<()> {
    write!(
        w,
        "{} checked: {} passed, {} regressed, {} skipped",
        summary.total(),
        summary.passed,
        summary.regressed,
        summary.skipped
    )?;
    match summary.baselines_created {
        0 => writeln!(w)?,
        1 => writeln!(w, " (1 baseline created)")?,
        n => writeln!(w, " ({} baselines created)", n)?,
    }
    for id in &summary.failures {
        writeln!(w, "  ✗ {} [{}]", id.label, id.mode)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
