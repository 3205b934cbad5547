// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::diff::Differ;
use crate::rules::Rules;
use rstest::rstest;
use serde_json::{json, Value};

fn node(value: Value) -> SchemaNode {
    SchemaNode::try_from(value).unwrap()
}

fn truncated(value: Value, depth: usize) -> Value {
    Value::from(truncate(&node(value), depth))
}

#[test]
fn test_zero_depth_is_opaque() {
    assert_eq!(truncated(json!({"a": "int"}), 0), json!("<...>"));
    assert_eq!(truncated(json!("int"), 0), json!("<...>"));
}

#[test]
fn test_mapping_values_hidden_below_depth() {
    let schema = json!({"a": {"b": {"c": "int"}}, "d": "bool"});
    assert_eq!(truncated(schema.clone(), 1), json!({"a": "<...>", "d": "<...>"}));
    assert_eq!(truncated(schema, 2), json!({"a": {"b": "<...>"}, "d": "bool"}));
}

#[test]
fn test_sequence_marker_survives() {
    let schema = json!({"data": ["<list>", {"id": "int"}]});
    assert_eq!(truncated(schema.clone(), 2), json!({"data": ["<list>", "<...>"]}));
    assert_eq!(
        truncated(schema.clone(), 3),
        json!({"data": ["<list>", {"id": "<...>"}]})
    );
    assert_eq!(truncated(schema, 4), json!({"data": ["<list>", {"id": "int"}]}));
}

#[rstest]
#[case(json!(["<empty_list>"]))]
#[case(json!("<uuid>"))]
#[case(json!("<...>"))]
fn test_leaves_pass_through(#[case] schema: Value) {
    assert_eq!(truncated(schema.clone(), 1), schema);
}

#[test]
fn test_collapsed_mapping_descends() {
    let schema = json!({"tags": {"*": {"v": "int"}}});
    assert_eq!(truncated(schema, 2), json!({"tags": {"*": "<...>"}}));
}

#[test]
fn test_truncation_boundary() {
    let rules = Rules::builtin().unwrap();
    let differ = Differ::new(&rules);
    let baseline = node(json!({"l1": {"l2": {"l3": {"l4": "int"}}}}));
    let current = node(json!({"l1": {"l2": {"l3": {"other": "int"}}}}));

    let hidden = differ.diff(&truncate(&baseline, 2), &truncate(&current, 2));
    assert!(hidden.regressions.is_empty());

    let shown = differ.diff(&truncate(&baseline, 4), &truncate(&current, 4));
    assert_eq!(shown.regressions, vec![".l1.l2.l3.l4: key removed"]);

    let full = differ.diff(&baseline, &current);
    assert_eq!(full.regressions, vec![".l1.l2.l3.l4: key removed"]);
}

#[test]
fn test_kind_change_above_cutoff_still_reported() {
    let rules = Rules::builtin().unwrap();
    let differ = Differ::new(&rules);
    let baseline = node(json!({"a": {"b": "int"}}));
    let current = node(json!({"a": ["<list>", "int"]}));
    let result = differ.diff(&truncate(&baseline, 2), &truncate(&current, 2));
    assert_eq!(result.regressions, vec![".a: type changed mapping → sequence"]);
}
