// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Schema extraction from structured values.

use crate::path::SchemaPath;
use crate::rules::Rules;
use crate::schema::{tokens, SchemaNode};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Converts structured values into bounded-depth schema trees.
#[derive(Clone, Copy, Debug)]
pub struct Extractor<'r> {
    rules: &'r Rules,
}

impl<'r> Extractor<'r> {
    pub fn new(rules: &'r Rules) -> Self {
        Self { rules }
    }

    /// Extract using the configured maximum depth.
    pub fn extract(&self, value: &Value) -> SchemaNode {
        let schema = self.extract_at(value, self.rules.max_depth(), &SchemaPath::root());
        tracing::debug!(depth = schema.depth(), "extracted schema");
        schema
    }

    /// Extract with an explicit depth budget, starting at `path`.
    pub fn extract_at(&self, value: &Value, max_depth: usize, path: &SchemaPath) -> SchemaNode {
        if max_depth == 0 {
            return SchemaNode::Opaque;
        }

        match value {
            Value::Object(obj) => self.extract_map(obj, max_depth, path),
            Value::Array(items) => {
                let child_path = path.element();
                match self.union(items.iter(), max_depth - 1, &child_path) {
                    Some(element) => SchemaNode::Seq(Box::new(element)),
                    None => SchemaNode::EmptySeq,
                }
            }
            Value::String(s) => SchemaNode::scalar(self.rules.normalizer().normalize(s)),
            Value::Bool(_) => SchemaNode::scalar(tokens::BOOL),
            Value::Number(n) if n.is_f64() => SchemaNode::scalar(tokens::FLOAT),
            Value::Number(_) => SchemaNode::scalar(tokens::INT),
            Value::Null => SchemaNode::scalar(tokens::NULL),
        }
    }

    fn extract_map(&self, obj: &Map<String, Value>, max_depth: usize, path: &SchemaPath) -> SchemaNode {
        if obj.is_empty() {
            return SchemaNode::empty_map();
        }

        let detector = self.rules.detector();
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        let child_path = path.wildcard();
        let rendered_child = child_path.to_string();

        if detector.is_dynamic(&path.to_string(), &keys) {
            // A second dynamic level directly below is not worth modelling
            if detector.path_forces_dynamic(&rendered_child) {
                return SchemaNode::Collapsed(Box::new(SchemaNode::Opaque));
            }
            let merged = self
                .union(obj.values(), max_depth - 1, &child_path)
                .unwrap_or(SchemaNode::Opaque);
            return SchemaNode::Collapsed(Box::new(merged));
        }

        let map: BTreeMap<String, SchemaNode> = obj
            .iter()
            .map(|(k, v)| (k.clone(), self.extract_at(v, max_depth - 1, &path.key(k))))
            .collect();
        SchemaNode::Map(map)
    }

    /// Extract every item and fold the shapes together; `None` when empty.
    fn union<'v>(
        &self,
        items: impl Iterator<Item = &'v Value>,
        max_depth: usize,
        path: &SchemaPath,
    ) -> Option<SchemaNode> {
        items
            .map(|item| self.extract_at(item, max_depth, path))
            .reduce(|mut acc, child| {
                acc.absorb(child);
                acc
            })
    }
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
