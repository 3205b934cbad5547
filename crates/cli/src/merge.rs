// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Baseline merging.
//!
//! Additions found by a check are folded into the stored baseline so that
//! later runs compare against the widest shape seen so far.

use crate::schema::SchemaNode;
use std::collections::BTreeMap;

/// Union of two schemas, preferring `base` wherever the two disagree.
///
/// Keys present in either mapping are kept. An empty sequence is widened
/// to a populated one; any other conflict keeps the base node.
pub fn merge(base: &SchemaNode, update: &SchemaNode) -> SchemaNode {
    match (base, update) {
        (SchemaNode::Map(ours), SchemaNode::Map(theirs)) => SchemaNode::Map(merge_maps(ours, theirs)),
        (SchemaNode::Collapsed(ours), SchemaNode::Collapsed(theirs)) => {
            SchemaNode::Collapsed(Box::new(merge(ours, theirs)))
        }
        (SchemaNode::Seq(ours), SchemaNode::Seq(theirs)) => SchemaNode::Seq(Box::new(merge(ours, theirs))),
        (SchemaNode::EmptySeq, SchemaNode::Seq(_)) => update.clone(),
        _ => match (base.entries(), update.entries()) {
            // One side collapsed, the other literal
            (Some(ours), Some(theirs)) => {
                let mut merged: BTreeMap<String, SchemaNode> = BTreeMap::new();
                for (k, v) in ours {
                    let node = match theirs.get(k) {
                        Some(other) => merge(v, other),
                        None => v.clone(),
                    };
                    merged.insert(k.to_string(), node);
                }
                for (k, v) in theirs {
                    merged.entry(k.to_string()).or_insert_with(|| v.clone());
                }
                SchemaNode::Map(merged)
            }
            _ => base.clone(),
        },
    }
}

fn merge_maps(
    ours: &BTreeMap<String, SchemaNode>,
    theirs: &BTreeMap<String, SchemaNode>,
) -> BTreeMap<String, SchemaNode> {
    let mut merged = ours.clone();
    for (k, v) in theirs {
        let node = match ours.get(k) {
            Some(existing) => merge(existing, v),
            None => v.clone(),
        };
        merged.insert(k.clone(), node);
    }
    merged
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
