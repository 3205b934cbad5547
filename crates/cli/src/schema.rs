// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Schema nodes: the shape of a structured value with the data removed.
//!
//! A schema is stored as JSON so that baselines diff cleanly in review:
//!
//! | Node | Encoding |
//! |------|----------|
//! | literal mapping | `{"key": child, ...}` |
//! | collapsed mapping | `{"*": child}` |
//! | empty sequence | `["<empty_list>"]` |
//! | populated sequence | `["<list>", element]` |
//! | scalar token | `"string"`, `"<uuid>"`, `"bool"`, ... |
//! | depth exhausted | `"<...>"` |

use crate::path::SchemaPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Token names that appear in schema leaves.
pub mod tokens {
    /// Unmatched string
    pub const STRING: &str = "string";
    pub const BOOL: &str = "bool";
    pub const INT: &str = "int";
    pub const FLOAT: &str = "float";
    pub const NULL: &str = "null";
    /// Depth exhausted
    pub const OPAQUE: &str = "<...>";
    pub const LIST: &str = "<list>";
    pub const EMPTY_LIST: &str = "<empty_list>";
    /// Key of a collapsed mapping
    pub const WILDCARD: &str = "*";
}

/// Structural kind, compared before anything else when diffing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Mapping,
    Sequence,
    Scalar,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Mapping => write!(f, "mapping"),
            Kind::Sequence => write!(f, "sequence"),
            Kind::Scalar => write!(f, "scalar"),
        }
    }
}

/// Shape-only descriptor of a structured value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum SchemaNode {
    /// Mapping with stable keys (possibly empty)
    Map(BTreeMap<String, SchemaNode>),
    /// Mapping whose keys are caller-defined; holds the union of value shapes
    Collapsed(Box<SchemaNode>),
    EmptySeq,
    /// Sequence with the union of every element's shape
    Seq(Box<SchemaNode>),
    Scalar(String),
    /// Depth exhausted
    Opaque,
}

impl SchemaNode {
    pub fn scalar(token: impl Into<String>) -> Self {
        SchemaNode::Scalar(token.into())
    }

    pub fn empty_map() -> Self {
        SchemaNode::Map(BTreeMap::new())
    }

    pub fn kind(&self) -> Kind {
        match self {
            SchemaNode::Map(_) | SchemaNode::Collapsed(_) => Kind::Mapping,
            SchemaNode::EmptySeq | SchemaNode::Seq(_) => Kind::Sequence,
            SchemaNode::Scalar(_) | SchemaNode::Opaque => Kind::Scalar,
        }
    }

    /// Leaf token, for scalar and opaque nodes.
    pub fn token(&self) -> Option<&str> {
        match self {
            SchemaNode::Scalar(t) => Some(t),
            SchemaNode::Opaque => Some(tokens::OPAQUE),
            _ => None,
        }
    }

    /// Sequence marker, for sequence nodes.
    pub fn seq_marker(&self) -> Option<&'static str> {
        match self {
            SchemaNode::EmptySeq => Some(tokens::EMPTY_LIST),
            SchemaNode::Seq(_) => Some(tokens::LIST),
            _ => None,
        }
    }

    /// Key view of a mapping node; a collapsed mapping has the single key `*`.
    pub fn entries(&self) -> Option<BTreeMap<&str, &SchemaNode>> {
        match self {
            SchemaNode::Map(map) => Some(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
            SchemaNode::Collapsed(inner) => {
                Some(BTreeMap::from([(tokens::WILDCARD, inner.as_ref())]))
            }
            _ => None,
        }
    }

    /// Fold another element/value shape into this one.
    ///
    /// Only literal mappings combine: keys missing here are copied over from
    /// `other`. Any other pairing keeps `self` as first seen.
    pub fn absorb(&mut self, other: SchemaNode) {
        if let (SchemaNode::Map(mine), SchemaNode::Map(theirs)) = (&mut *self, other) {
            for (k, v) in theirs {
                mine.entry(k).or_insert(v);
            }
        }
    }

    /// Longest chain of nested containers below this node.
    pub fn depth(&self) -> usize {
        match self {
            SchemaNode::Map(map) => 1 + map.values().map(SchemaNode::depth).max().unwrap_or(0),
            SchemaNode::Collapsed(inner) | SchemaNode::Seq(inner) => 1 + inner.depth(),
            SchemaNode::EmptySeq | SchemaNode::Scalar(_) | SchemaNode::Opaque => 0,
        }
    }
}

impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = Value::from(self.clone());
        match serde_json::to_string_pretty(&value) {
            Ok(s) => write!(f, "{}", s),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// Errors decoding a persisted schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaDecodeError {
    #[error("unexpected {found} at {path}")]
    UnexpectedValue { path: String, found: &'static str },

    #[error("malformed sequence marker at {path}")]
    BadSequence { path: String },
}

impl From<SchemaNode> for Value {
    fn from(node: SchemaNode) -> Self {
        match node {
            SchemaNode::Map(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
            SchemaNode::Collapsed(inner) => {
                let mut obj = serde_json::Map::new();
                obj.insert(tokens::WILDCARD.to_string(), Value::from(*inner));
                Value::Object(obj)
            }
            SchemaNode::EmptySeq => Value::Array(vec![Value::from(tokens::EMPTY_LIST)]),
            SchemaNode::Seq(inner) => {
                Value::Array(vec![Value::from(tokens::LIST), Value::from(*inner)])
            }
            SchemaNode::Scalar(token) => Value::String(token),
            SchemaNode::Opaque => Value::from(tokens::OPAQUE),
        }
    }
}

impl TryFrom<Value> for SchemaNode {
    type Error = SchemaDecodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        decode(value, &SchemaPath::root())
    }
}

fn decode(value: Value, path: &SchemaPath) -> Result<SchemaNode, SchemaDecodeError> {
    match value {
        Value::Object(obj) => {
            if obj.len() == 1 {
                if let Some(inner) = obj.get(tokens::WILDCARD) {
                    let inner = decode(inner.clone(), &path.wildcard())?;
                    return Ok(SchemaNode::Collapsed(Box::new(inner)));
                }
            }
            let mut map = BTreeMap::new();
            for (k, v) in obj {
                let child = decode(v, &path.key(&k))?;
                map.insert(k, child);
            }
            Ok(SchemaNode::Map(map))
        }
        Value::Array(mut items) => {
            let marker = items.first().and_then(Value::as_str).map(str::to_string);
            match (marker.as_deref(), items.len()) {
                (Some(tokens::EMPTY_LIST), 1) => Ok(SchemaNode::EmptySeq),
                (Some(tokens::LIST), 2) => {
                    let element = decode(items.remove(1), &path.element())?;
                    Ok(SchemaNode::Seq(Box::new(element)))
                }
                _ => Err(SchemaDecodeError::BadSequence { path: path.label() }),
            }
        }
        Value::String(s) if s == tokens::OPAQUE => Ok(SchemaNode::Opaque),
        Value::String(s) => Ok(SchemaNode::Scalar(s)),
        Value::Null => Err(unexpected(path, "null")),
        Value::Bool(_) => Err(unexpected(path, "boolean")),
        Value::Number(_) => Err(unexpected(path, "number")),
    }
}

fn unexpected(path: &SchemaPath, found: &'static str) -> SchemaDecodeError {
    SchemaDecodeError::UnexpectedValue {
        path: path.label(),
        found,
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
