// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Baseline persistence, one schema per (label, mode) identity.

use crate::schema::SchemaNode;
use parking_lot::Mutex;
use shapeshot_capture::Identity;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default baseline directory, relative to the working directory.
pub const DEFAULT_SNAPSHOT_DIR: &str = "tests/snapshots";

/// Default output mode.
pub const DEFAULT_MODE: &str = "human";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt baseline {}: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },

    #[error("failed to encode baseline: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Identity of one baseline.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    pub label: String,
    pub mode: String,
}

impl SnapshotKey {
    pub fn new(label: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            mode: mode.into(),
        }
    }

    /// File name without extension: `{safe_label}__{mode}`.
    pub fn file_stem(&self) -> String {
        let label = safe_name(&self.label);
        if self.mode.is_empty() {
            label
        } else {
            format!("{}__{}", label, safe_name(&self.mode))
        }
    }

    /// Identity as recorded in the verdict log.
    pub fn identity(&self) -> Identity {
        Identity::new(self.label.clone(), self.mode.clone())
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.label, self.mode)
    }
}

fn safe_name(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Load/save interface over stored baselines.
pub trait SnapshotStore {
    /// `Ok(None)` when no baseline exists for `key`.
    fn load(&self, key: &SnapshotKey) -> Result<Option<SchemaNode>, StoreError>;

    fn save(&self, key: &SnapshotKey, schema: &SchemaNode) -> Result<(), StoreError>;
}

/// Directory of pretty-printed JSON baselines.
#[derive(Clone, Debug)]
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn snapshot_path(&self, key: &SnapshotKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.file_stem()))
    }

    fn last_output_path(&self, key: &SnapshotKey) -> PathBuf {
        self.dir.join(format!("{}.last", key.file_stem()))
    }

    /// Raw stdout kept from the previous run of `key`, if any.
    pub fn load_last_output(&self, key: &SnapshotKey) -> Result<Option<String>, StoreError> {
        read_optional(&self.last_output_path(key))
    }

    pub fn save_last_output(&self, key: &SnapshotKey, text: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.last_output_path(key), text)?;
        Ok(())
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl SnapshotStore for FsStore {
    fn load(&self, key: &SnapshotKey) -> Result<Option<SchemaNode>, StoreError> {
        let path = self.snapshot_path(key);
        let Some(content) = read_optional(&path)? else {
            return Ok(None);
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                path,
                message: e.to_string(),
            })
    }

    fn save(&self, key: &SnapshotKey, schema: &SchemaNode) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(schema)?;
        std::fs::write(self.snapshot_path(key), content)?;
        Ok(())
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: Mutex<HashMap<SnapshotKey, SchemaNode>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &SnapshotKey) -> Result<Option<SchemaNode>, StoreError> {
        Ok(self.snapshots.lock().get(key).cloned())
    }

    fn save(&self, key: &SnapshotKey, schema: &SchemaNode) -> Result<(), StoreError> {
        self.snapshots.lock().insert(key.clone(), schema.clone());
        Ok(())
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &S {
    fn load(&self, key: &SnapshotKey) -> Result<Option<SchemaNode>, StoreError> {
        (**self).load(key)
    }

    fn save(&self, key: &SnapshotKey, schema: &SchemaNode) -> Result<(), StoreError> {
        (**self).save(key, schema)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
