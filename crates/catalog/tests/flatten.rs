use catalog::{flatten, FileMap};
use proptest::prelude::*;
use serde_json::{json, Value};

fn as_object(map: &FileMap) -> Value {
    Value::Object(map.iter().map(|(k, v)| (k.clone(), Value::String(v.clone()))).collect())
}

#[test]
fn test_nested_object_becomes_slashed_paths() {
    let flat = flatten(&json!({"a": {"b": 1, "c": 2}}), "");

    let expected: FileMap = [("a/b", "1"), ("a/c", "2")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(flat, expected);
}

#[test]
fn test_array_is_pretty_printed_leaf() {
    let flat = flatten(&json!({"a": [1, 2, 3]}), "");

    assert_eq!(flat.len(), 1);
    assert_eq!(flat["a"], "[\n  1,\n  2,\n  3\n]");
}

#[test]
fn test_null_input_is_empty() {
    assert!(flatten(&Value::Null, "").is_empty());
    assert!(flatten(&Value::Null, "context").is_empty());
}

#[test]
fn test_top_level_scalar_and_array_fallback_keys() {
    assert_eq!(flatten(&json!("text"), "")["value"], "text");
    assert_eq!(flatten(&json!(true), "flag")["flag"], "true");
    assert_eq!(flatten(&json!([]), "")["array"], "[]");
    assert_eq!(flatten(&json!(["x"]), "list")["list"], "[\n  \"x\"\n]");
}

#[test]
fn test_null_member_becomes_literal_null() {
    let flat = flatten(&json!({"rtl": {"top.sv": null}}), "");
    assert_eq!(flat["rtl/top.sv"], "null");
}

#[test]
fn test_prefix_qualifies_every_key() {
    let flat = flatten(&json!({"x": "1", "y": {"z": false}}), "input");

    assert_eq!(flat["input/x"], "1");
    assert_eq!(flat["input/y/z"], "false");
    assert!(flat.keys().all(|k| k.starts_with("input/")));
}

#[test]
fn test_strings_are_not_quoted() {
    let flat = flatten(&json!({"docs/spec.md": "# Spec\nline"}), "");
    assert_eq!(flat["docs/spec.md"], "# Spec\nline");
}

#[test]
fn test_empty_object_member_produces_nothing() {
    let flat = flatten(&json!({"a": {}, "b": "x"}), "");
    assert_eq!(flat.len(), 1);
    assert_eq!(flat["b"], "x");
}

#[test]
fn test_colliding_paths_last_write_wins() {
    // "a/b" as a literal key and as a nested path join to the same string;
    // "a" is walked first, so the literal sibling overwrites it
    let raw: Value = serde_json::from_str(r#"{"a": {"b": "nested"}, "a/b": "literal"}"#).unwrap();
    let flat = flatten(&raw, "");

    assert_eq!(flat.len(), 1);
    assert_eq!(flat["a/b"], "literal");
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z ]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_flatten_is_idempotent(value in arb_json()) {
        let once = flatten(&value, "");
        let twice = flatten(&as_object(&once), "");
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_keys_are_prefixed(value in arb_json()) {
        let flat = flatten(&value, "root");
        for key in flat.keys() {
            prop_assert!(key == "root" || key.starts_with("root/"));
        }
    }
}
