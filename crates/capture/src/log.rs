// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only JSONL verdict log.
//!
//! Each `shapeshot check` appends one line; report tooling reads the whole
//! file back with [`read_log`].

use crate::error::LogError;
use crate::record::{Identity, RecordedOutcome, RecordedVerdict};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};

/// Writer for one run's verdicts
#[derive(Debug)]
pub struct VerdictLog {
    path: PathBuf,
    file: File,
    start: Instant,
    next_seq: u64,
}

impl VerdictLog {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: &Path) -> Result<Self, LogError> {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| io_error(path, source))?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
            start: Instant::now(),
            next_seq: 0,
        })
    }

    /// Append one verdict and flush it to disk.
    ///
    /// The sequence number only advances once the line is written.
    pub fn record(
        &mut self,
        identity: Identity,
        outcome: RecordedOutcome,
    ) -> Result<RecordedVerdict, LogError> {
        let verdict = RecordedVerdict {
            seq: self.next_seq,
            timestamp: SystemTime::now(),
            elapsed: self.start.elapsed(),
            identity,
            outcome,
        };

        let mut line = serde_json::to_string(&verdict)?;
        line.push('\n');
        self.file
            .write_all(line.as_bytes())
            .and_then(|()| self.file.flush())
            .map_err(|source| io_error(&self.path, source))?;

        self.next_seq += 1;
        Ok(verdict)
    }
}

/// Read every verdict in a log, oldest first. Blank lines are skipped.
pub fn read_log(path: &Path) -> Result<Vec<RecordedVerdict>, LogError> {
    let content = std::fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| LogError::Parse {
                path: path.to_path_buf(),
                line: i + 1,
                source,
            })
        })
        .collect()
}

fn io_error(path: &Path, source: std::io::Error) -> LogError {
    LogError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
