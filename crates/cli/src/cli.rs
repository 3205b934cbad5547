// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line front-end.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use shapeshot_capture::{read_log, LogError, Summary, VerdictLog};
use thiserror::Error;

use crate::check::{CheckError, CheckOptions, Checker};
use crate::diff::Differ;
use crate::env;
use crate::extract::Extractor;
use crate::output::{write_diff, write_summary, write_verdict};
use crate::path::SchemaPath;
use crate::rules::{RuleConfig, Rules, RulesError};
use crate::schema::SchemaNode;
use crate::store::{FsStore, SnapshotKey, DEFAULT_MODE, DEFAULT_SNAPSHOT_DIR};
use crate::truncate::truncate;

/// Default tracing filter
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Structural schema snapshots for CLI regression testing
#[derive(Parser, Debug)]
#[command(name = "shapeshot", version, about)]
pub struct Cli {
    /// Tracing filter directive
    #[arg(
        long,
        global = true,
        value_name = "FILTER",
        env = env::SHAPESHOT_LOG,
        default_value = DEFAULT_LOG_LEVEL
    )]
    pub log_level: String,

    /// Rule file (TOML, or JSON by extension)
    #[arg(long, global = true, value_name = "FILE", env = env::SHAPESHOT_RULES)]
    pub rules: Option<PathBuf>,

    /// Baseline directory
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        env = env::SHAPESHOT_SNAPSHOT_DIR,
        default_value = DEFAULT_SNAPSHOT_DIR
    )]
    pub snapshot_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check captured output against its baseline
    Check(CheckArgs),
    /// Print the schema of a JSON document
    Schema(SchemaArgs),
    /// Compare two stored baselines
    Diff(DiffArgs),
    /// Summarize a verdict log
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Test label
    #[arg(long)]
    pub label: String,

    /// Output mode the label was captured in
    #[arg(long, default_value = DEFAULT_MODE)]
    pub mode: String,

    /// Captured stdout; `-` or absent reads stdin
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Exit code of the captured command
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub exit_code: i32,

    /// Accept the current schema as the new baseline
    #[arg(long)]
    pub update_snapshots: bool,

    /// Compare only this many levels (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    pub regression_depth: usize,

    /// Append the verdict to this JSONL file
    #[arg(long, value_name = "FILE")]
    pub verdict_log: Option<PathBuf>,

    /// Keep the raw output next to the baseline
    #[arg(long)]
    pub keep_output: bool,
}

impl CheckArgs {
    pub fn key(&self) -> SnapshotKey {
        SnapshotKey::new(self.label.clone(), self.mode.clone())
    }

    pub fn options(&self) -> CheckOptions {
        CheckOptions {
            update_snapshots: self.update_snapshots,
            regression_depth: self.regression_depth,
        }
    }
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// JSON document; `-` or absent reads stdin
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Override the extraction depth
    #[arg(long)]
    pub max_depth: Option<usize>,
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    pub baseline: PathBuf,
    pub current: PathBuf,

    /// Compare only this many levels (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    pub regression_depth: usize,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// JSONL file written by `check --verdict-log`
    pub verdict_log: PathBuf,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error(transparent)]
    Check(#[from] CheckError),

    #[error(transparent)]
    Log(#[from] LogError),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not a valid schema: {message}", path.display())]
    BadSchema { path: PathBuf, message: String },

    #[error("input is not JSON: {0}")]
    NotJson(serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Cli {
    pub fn load_rules(&self) -> Result<Rules, RulesError> {
        match &self.rules {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading rules");
                RuleConfig::load(path)?.compile()
            }
            None => Rules::builtin(),
        }
    }

    /// Run the selected command, writing its report to `out`.
    ///
    /// Returns `Ok(false)` when regressions were found.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<bool, RunError> {
        match &self.command {
            Command::Check(args) => self.run_check(args, out),
            Command::Schema(args) => self.run_schema(args, out),
            Command::Diff(args) => self.run_diff(args, out),
            Command::Summary(args) => run_summary(args, out),
        }
    }

    fn run_check<W: Write>(&self, args: &CheckArgs, out: &mut W) -> Result<bool, RunError> {
        let stdout = read_input(args.input.as_deref())?;
        let key = args.key();
        let checker = Checker::new(self.load_rules()?, FsStore::new(self.snapshot_dir.clone()));

        let verdict = checker.check_output(&key, &stdout, args.exit_code, args.options())?;

        if args.keep_output && !stdout.trim().is_empty() {
            checker
                .store()
                .save_last_output(&key, &stdout)
                .map_err(CheckError::from)?;
        }
        if let Some(path) = &args.verdict_log {
            let mut log = VerdictLog::open(path)?;
            log.record(key.identity(), (&verdict).into())?;
        }

        write_verdict(out, &key, &verdict)?;
        Ok(!verdict.is_failure())
    }

    fn run_schema<W: Write>(&self, args: &SchemaArgs, out: &mut W) -> Result<bool, RunError> {
        let input = read_input(args.input.as_deref())?;
        let value: Value = serde_json::from_str(&input).map_err(RunError::NotJson)?;
        let rules = self.load_rules()?;
        let depth = args.max_depth.unwrap_or_else(|| rules.max_depth());

        let schema = Extractor::new(&rules).extract_at(&value, depth, &SchemaPath::root());
        writeln!(out, "{}", schema)?;
        Ok(true)
    }

    fn run_diff<W: Write>(&self, args: &DiffArgs, out: &mut W) -> Result<bool, RunError> {
        let baseline = read_schema(&args.baseline)?;
        let current = read_schema(&args.current)?;
        let rules = self.load_rules()?;
        let differ = Differ::new(&rules);

        let diff = if args.regression_depth > 0 {
            differ.diff(
                &truncate(&baseline, args.regression_depth),
                &truncate(&current, args.regression_depth),
            )
        } else {
            differ.diff(&baseline, &current)
        };

        write_diff(out, &diff)?;
        Ok(!diff.has_regressions())
    }
}

fn run_summary<W: Write>(args: &SummaryArgs, out: &mut W) -> Result<bool, RunError> {
    let summary = Summary::from_verdicts(&read_log(&args.verdict_log)?);
    write_summary(out, &summary)?;
    Ok(!summary.has_failures())
}

fn read_input(path: Option<&Path>) -> Result<String, RunError> {
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| RunError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn read_schema(path: &Path) -> Result<SchemaNode, RunError> {
    let content = std::fs::read_to_string(path).map_err(|source| RunError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| RunError::BadSchema {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
