// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::rules::RuleConfig;
use proptest::prelude::*;
use serde_json::json;

fn extract(value: &Value) -> Value {
    let rules = Rules::builtin().unwrap();
    serde_json::to_value(Extractor::new(&rules).extract(value)).unwrap()
}

#[test]
fn test_scalars() {
    assert_eq!(extract(&json!("svc")), json!("string"));
    assert_eq!(extract(&json!(true)), json!("bool"));
    assert_eq!(extract(&json!(42)), json!("int"));
    assert_eq!(extract(&json!(-7)), json!("int"));
    assert_eq!(extract(&json!(1.5)), json!("float"));
    assert_eq!(extract(&json!(null)), json!("null"));
}

#[test]
fn test_first_run_shape() {
    let value = json!({"id": "3f2504e0-4f89-11d3-9a0c-0305e82c3301", "name": "svc"});
    assert_eq!(extract(&value), json!({"id": "<uuid>", "name": "string"}));
}

#[test]
fn test_empty_containers() {
    assert_eq!(extract(&json!({})), json!({}));
    assert_eq!(extract(&json!({"items": []})), json!({"items": ["<empty_list>"]}));
}

#[test]
fn test_sequence_is_union_of_all_elements() {
    let value = json!({"data": [
        {"id": 1},
        {"id": 2, "owner": "alice"},
        {"id": 3, "tags_count": 4}
    ]});
    assert_eq!(
        extract(&value),
        json!({"data": ["<list>", {"id": "int", "owner": "string", "tags_count": "int"}]})
    );
}

#[test]
fn test_sequence_union_keeps_first_non_mapping_shape() {
    assert_eq!(extract(&json!([1, "two", {"a": 1}])), json!(["<list>", "int"]));
}

#[test]
fn test_three_uuid_keys_stay_literal() {
    let value = json!({
        "3f2504e0-4f89-11d3-9a0c-0305e82c3301": 1,
        "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11": 2,
        "6ba7b810-9dad-11d1-80b4-00c04fd430c8": 3
    });
    let schema = extract(&value);
    assert_eq!(schema.as_object().unwrap().len(), 3);
    assert!(schema.get("*").is_none());
}

#[test]
fn test_four_uuid_keys_collapse() {
    let value = json!({
        "3f2504e0-4f89-11d3-9a0c-0305e82c3301": 1,
        "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11": 2,
        "6ba7b810-9dad-11d1-80b4-00c04fd430c8": 3,
        "6ba7b811-9dad-11d1-80b4-00c04fd430c8": 4
    });
    assert_eq!(extract(&value), json!({"*": "int"}));
}

#[test]
fn test_one_plain_key_prevents_collapse() {
    let value = json!({
        "3f2504e0-4f89-11d3-9a0c-0305e82c3301": 1,
        "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11": 2,
        "6ba7b810-9dad-11d1-80b4-00c04fd430c8": 3,
        "6ba7b811-9dad-11d1-80b4-00c04fd430c8": 4,
        "total": 10
    });
    assert_eq!(extract(&value).as_object().unwrap().len(), 5);
}

#[test]
fn test_forced_path_collapses_any_keys() {
    let value = json!({"tags": {"env": "prod", "team": "core"}});
    assert_eq!(extract(&value), json!({"tags": {"*": "string"}}));
}

#[test]
fn test_collapsed_values_are_unioned() {
    let value = json!({"usage": {
        "2026-01": 5,
        "2026-02": 7
    }, "meta": {
        "page": {"size": 10},
        "cursor": {"size": 10, "next": "abc"}
    }});
    assert_eq!(extract(&value)["usage"], json!({"*": "int"}));
    assert_eq!(
        extract(&value)["meta"],
        json!({"*": {"next": "string", "size": "int"}})
    );
}

#[test]
fn test_collapsed_records_keep_their_keys() {
    let value = json!({"by_id": {
        "1": {"name": "a"},
        "2": {"name": "b"},
        "3": {"name": "c"},
        "4": {"name": "d", "owner": null}
    }});
    assert_eq!(
        extract(&value),
        json!({"by_id": {"*": {"name": "string", "owner": "null"}}})
    );
}

#[test]
fn test_forced_collapse_keeps_record_keys() {
    let value = json!({"incident": {"relationships": {
        "owner": {"data": {"id": 7, "type": "users"}},
        "team": {"data": {"id": 8, "type": "teams"}}
    }}});
    assert_eq!(
        extract(&value),
        json!({"incident": {"relationships": {"*": {"data": {"id": "int", "type": "string"}}}}})
    );
}

#[test]
fn test_two_dynamic_levels_short_circuit() {
    let value = json!({"hosts": {
        "1": {"env:prod": 1, "env:dev": 2, "role:web": 3, "role:db": 4},
        "2": {"env:prod": 1, "env:dev": 2, "role:web": 3, "role:db": 4},
        "3": {"env:prod": 1, "env:dev": 2, "role:web": 3, "role:db": 4},
        "4": {"env:prod": 1, "env:dev": 2, "role:web": 3, "role:db": 4}
    }});
    assert_eq!(extract(&value), json!({"hosts": {"*": {"*": "<...>"}}}));
}

#[test]
fn test_field_removed_under_collapsed_mapping_regresses() {
    let rules = Rules::builtin().unwrap();
    let extractor = Extractor::new(&rules);
    let baseline = extractor.extract(&json!({"meta": {"a": {"name": "x", "size": 1}}}));
    let current = extractor.extract(&json!({"meta": {"a": {"size": 1}}}));
    let diff = crate::diff::Differ::new(&rules).diff(&baseline, &current);
    assert_eq!(diff.regressions, vec![".meta.*.name: key removed"]);
}

#[test]
fn test_attributes_short_circuit() {
    let value = json!({"data": [{"attributes": {"CN": "x", "client_ip": "1.2.3.4"}}]});
    assert_eq!(
        extract(&value),
        json!({"data": ["<list>", {"attributes": {"*": "<...>"}}]})
    );
}

#[test]
fn test_depth_exhaustion() {
    let rules = RuleConfig {
        max_depth: 2,
        ..RuleConfig::default()
    }
    .compile()
    .unwrap();
    let value = json!({"a": {"b": {"c": 1}}, "n": 1});
    let schema = serde_json::to_value(Extractor::new(&rules).extract(&value)).unwrap();
    assert_eq!(schema, json!({"a": {"b": "<...>"}, "n": "int"}));
}

#[test]
fn test_zero_depth_is_opaque() {
    let rules = Rules::builtin().unwrap();
    let schema = Extractor::new(&rules).extract_at(&json!({"a": 1}), 0, &SchemaPath::root());
    assert_eq!(schema, SchemaNode::Opaque);
}

#[test]
fn test_keys_are_sorted() {
    let schema = extract(&json!({"zeta": 1, "alpha": 2, "mid": 3}));
    let keys: Vec<&String> = schema.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
}

#[test]
fn test_input_not_mutated() {
    let value = json!({"data": [{"id": 1}, {"id": 2, "x": true}]});
    let before = value.clone();
    extract(&value);
    assert_eq!(value, before);
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9:.-]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,6}", inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn schema_contains_no_raw_data(value in arb_json()) {
        let schema = Rules::builtin()
            .map(|rules| Extractor::new(&rules).extract(&value))
            .unwrap();
        let encoded = serde_json::to_value(&schema).unwrap();
        // Decoding would fail on any raw number, bool or null leaf
        prop_assert!(SchemaNode::try_from(encoded).is_ok());
    }

    #[test]
    fn extraction_is_deterministic(value in arb_json()) {
        let rules = Rules::builtin().unwrap();
        let extractor = Extractor::new(&rules);
        prop_assert_eq!(extractor.extract(&value), extractor.extract(&value));
    }
}
