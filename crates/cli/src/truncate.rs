// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Depth truncation for regression checks.
//!
//! Deep nesting in responses tends to be volatile. Comparing truncated
//! copies keeps the check focused on the top levels while the stored
//! baseline keeps full depth.

use crate::schema::SchemaNode;

/// Replace everything at or below `depth` container levels with the opaque
/// marker. Sequence markers survive; only their element is descended into.
pub fn truncate(node: &SchemaNode, depth: usize) -> SchemaNode {
    if depth == 0 {
        return SchemaNode::Opaque;
    }
    match node {
        SchemaNode::Map(map) => SchemaNode::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), truncate(v, depth - 1)))
                .collect(),
        ),
        SchemaNode::Collapsed(inner) => SchemaNode::Collapsed(Box::new(truncate(inner, depth - 1))),
        SchemaNode::Seq(inner) => SchemaNode::Seq(Box::new(truncate(inner, depth - 1))),
        SchemaNode::EmptySeq | SchemaNode::Scalar(_) | SchemaNode::Opaque => node.clone(),
    }
}

#[cfg(test)]
#[path = "truncate_tests.rs"]
mod tests;
