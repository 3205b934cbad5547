// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Schema paths.
//!
//! A path is kept as a list of segments while the engine recurses and is only
//! rendered to the dotted form (`.metadata.next_action`, `.data[]`, `.tags.*`)
//! when it is matched against a rule or written into a message.

use std::fmt;

/// One step of descent into a schema.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Segment {
    /// Mapping key
    Key(String),
    /// One level of sequence descent
    Element,
    /// One level of collapsed-mapping descent
    Wildcard,
}

/// Immutable path from the root of a value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SchemaPath {
    segments: Vec<Segment>,
}

impl SchemaPath {
    /// The root path (renders as the empty string).
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: &str) -> Self {
        self.child(Segment::Key(key.to_string()))
    }

    pub fn element(&self) -> Self {
        self.child(Segment::Element)
    }

    pub fn wildcard(&self) -> Self {
        self.child(Segment::Wildcard)
    }

    fn child(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Rendered form used in messages; the root renders as `root`.
    pub fn label(&self) -> String {
        if self.is_root() {
            "root".to_string()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Key(k) => write!(f, ".{}", k)?,
                Segment::Element => write!(f, "[]")?,
                Segment::Wildcard => write!(f, ".*")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
