//! Decoder behavior: structure recovery from indentation and punctuation,
//! array body shapes, delimiter handling, and the lenient treatment of
//! malformed lines.

use toon_codec::{decode, toon, Error, Value};

fn json(value: &Value) -> serde_json::Value {
    serde_json::to_value(value).unwrap()
}

#[test]
fn empty_input_is_null() {
    assert_eq!(decode("").unwrap(), Value::Null);
    assert_eq!(decode("   \n  \n").unwrap(), Value::Null);
}

#[test]
fn root_scalars() {
    assert_eq!(decode("hello").unwrap(), Value::from("hello"));
    assert_eq!(decode("42").unwrap(), Value::from(42));
    assert_eq!(decode("2.5").unwrap(), Value::from(2.5));
    assert_eq!(decode("true").unwrap(), Value::Bool(true));
    assert_eq!(decode("null").unwrap(), Value::Null);
    assert_eq!(
        decode("\"quoted: text\"").unwrap(),
        Value::from("quoted: text")
    );
}

#[test]
fn literals_match_case_insensitively() {
    assert_eq!(decode("a: TRUE").unwrap(), toon!({ "a": true }));
    assert_eq!(decode("a: False").unwrap(), toon!({ "a": false }));
    assert_eq!(decode("a: NULL").unwrap(), toon!({ "a": null }));
}

#[test]
fn flat_object() {
    let doc = decode("name: Alice\nage: 30\nactive: true").unwrap();
    assert_eq!(
        json(&doc),
        serde_json::json!({ "name": "Alice", "age": 30, "active": true })
    );
}

#[test]
fn nested_objects() {
    let doc = decode("user:\n  name: Ada\n  address:\n    city: Lisbon").unwrap();
    assert_eq!(
        json(&doc),
        serde_json::json!({ "user": { "name": "Ada", "address": { "city": "Lisbon" } } })
    );
}

#[test]
fn key_only_line_is_empty_object() {
    assert_eq!(json(&decode("config:").unwrap()), serde_json::json!({ "config": {} }));
}

#[test]
fn key_order_is_preserved() {
    let doc = decode("z: 1\na: 2\nm: 3").unwrap();
    let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn duplicate_keys_overwrite() {
    let doc = decode("a: 1\na: 2").unwrap();
    assert_eq!(doc.get("a").and_then(Value::as_i64), Some(2));
    assert_eq!(doc.as_object().unwrap().len(), 1);
}

#[test]
fn quoted_keys() {
    let doc = decode("\"my key\": 1\n\"a: b\": c").unwrap();
    assert_eq!(doc.get("my key").and_then(Value::as_i64), Some(1));
    assert_eq!(doc.get("a: b").and_then(Value::as_str), Some("c"));
}

#[test]
fn value_with_colon_keeps_first_split() {
    let doc = decode("url: http://example.com").unwrap();
    assert_eq!(
        doc.get("url").and_then(Value::as_str),
        Some("http://example.com")
    );
}

#[test]
fn root_inline_array() {
    assert_eq!(decode("[3]: 1,2,3").unwrap(), toon!([1, 2, 3]));
    assert_eq!(decode("[2]: Alice,Bob").unwrap(), toon!(["Alice", "Bob"]));
    assert_eq!(decode("[0]:").unwrap(), toon!([]));
}

#[test]
fn keyed_inline_array() {
    let doc = decode("tags[3]: admin,ops,dev").unwrap();
    assert_eq!(doc.get("tags").unwrap(), &toon!(["admin", "ops", "dev"]));
}

#[test]
fn inline_array_respects_quotes() {
    let doc = decode("vals[2]: \"a,b\",c").unwrap();
    assert_eq!(doc.get("vals").unwrap(), &toon!(["a,b", "c"]));
}

#[test]
fn inline_array_mixed_scalars() {
    assert_eq!(
        decode("[4]: true,null,7,x").unwrap(),
        toon!([true, null, 7, "x"])
    );
}

#[test]
fn length_marker_is_accepted() {
    assert_eq!(decode("[#3]: 1,2,3").unwrap(), toon!([1, 2, 3]));
    let doc = decode("tags[#2]: a,b").unwrap();
    assert_eq!(doc.get("tags").unwrap(), &toon!(["a", "b"]));
}

#[test]
fn declared_length_is_never_validated() {
    // Five declared, two present: the decoder takes what is actually there.
    assert_eq!(decode("[5]: 1,2").unwrap(), toon!([1, 2]));
    let doc = decode("rows[9]{id}:\n  1\n  2").unwrap();
    assert_eq!(
        json(&doc),
        serde_json::json!({ "rows": [{ "id": 1 }, { "id": 2 }] })
    );
}

#[test]
fn tabular_array() {
    let doc = decode("[3]{id,name}:\n  1,John\n  2,Ada\n  3,Bob").unwrap();
    assert_eq!(
        json(&doc),
        serde_json::json!([
            { "id": 1, "name": "John" },
            { "id": 2, "name": "Ada" },
            { "id": 3, "name": "Bob" }
        ])
    );
}

#[test]
fn tabular_short_rows_backfill_null() {
    let doc = decode("rows[2]{a,b}:\n  1,2\n  3").unwrap();
    assert_eq!(
        json(&doc),
        serde_json::json!({ "rows": [{ "a": 1, "b": 2 }, { "a": 3, "b": null }] })
    );
}

#[test]
fn tabular_extra_cells_are_dropped() {
    let doc = decode("rows[1]{a}:\n  1,2,3").unwrap();
    assert_eq!(json(&doc), serde_json::json!({ "rows": [{ "a": 1 }] }));
}

#[test]
fn tabular_field_order_is_header_order() {
    let doc = decode("rows[1]{b,a}:\n  1,2").unwrap();
    let row = &doc.get("rows").unwrap().as_array().unwrap()[0];
    let keys: Vec<_> = row.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["b", "a"]);
}

#[test]
fn tabular_with_pipe_marker() {
    let doc = decode("rows[2|]{id|name}:\n  1|Ada\n  2|Bob").unwrap();
    assert_eq!(
        json(&doc),
        serde_json::json!({ "rows": [{ "id": 1, "name": "Ada" }, { "id": 2, "name": "Bob" }] })
    );
}

#[test]
fn tabular_with_tab_marker_keeps_commas_whole() {
    let doc = decode("rows[1\t]{a\tb}:\n  x,y\tz").unwrap();
    assert_eq!(
        json(&doc),
        serde_json::json!({ "rows": [{ "a": "x,y", "b": "z" }] })
    );
}

#[test]
fn delimiter_sniffed_from_field_list() {
    // No marker, but the field list carries pipes.
    let doc = decode("rows[1]{a|b}:\n  1|2").unwrap();
    assert_eq!(json(&doc), serde_json::json!({ "rows": [{ "a": 1, "b": 2 }] }));
}

#[test]
fn list_of_scalars() {
    let doc = decode("items[3]:\n  - 1\n  - two\n  - true").unwrap();
    assert_eq!(doc.get("items").unwrap(), &toon!([1, "two", true]));
}

#[test]
fn root_list_without_header() {
    assert_eq!(decode("- 1\n- 2").unwrap(), toon!([1, 2]));
}

#[test]
fn list_of_objects_with_sibling_fields() {
    let doc = decode("people[2]:\n  - name: Ada\n    role: admin\n  - name: Bob\n    role: user")
        .unwrap();
    assert_eq!(
        json(&doc),
        serde_json::json!({ "people": [
            { "name": "Ada", "role": "admin" },
            { "name": "Bob", "role": "user" }
        ]})
    );
}

#[test]
fn list_item_first_field_array_stays_a_field() {
    // The first field's value is an inline array on the hyphen line; the
    // key must be "tags", never a synthetic "tags[2]" string key.
    let doc = decode("items[1]:\n  - tags[2]: a,b\n    name: x").unwrap();
    assert_eq!(
        json(&doc),
        serde_json::json!({ "items": [{ "tags": ["a", "b"], "name": "x" }] })
    );
}

#[test]
fn list_item_key_only_first_field_keeps_siblings() {
    let doc = decode("items[1]:\n  - config:\n      a: 1\n    name: x").unwrap();
    assert_eq!(
        json(&doc),
        serde_json::json!({ "items": [{ "config": { "a": 1 }, "name": "x" }] })
    );
}

#[test]
fn list_item_bare_hyphen_is_empty_object() {
    let doc = decode("items[2]:\n  -\n  -").unwrap();
    assert_eq!(json(&doc), serde_json::json!({ "items": [{}, {}] }));
}

#[test]
fn list_item_bare_hyphen_with_deeper_block() {
    let doc = decode("items[1]:\n  -\n    a: 1").unwrap();
    assert_eq!(json(&doc), serde_json::json!({ "items": [{ "a": 1 }] }));
}

#[test]
fn list_item_nested_array_element() {
    let doc = decode("m[2]:\n  - [2]: 1,2\n  - x").unwrap();
    assert_eq!(json(&doc), serde_json::json!({ "m": [[1, 2], "x"] }));
}

#[test]
fn list_item_nested_list_element() {
    let doc = decode("m[1]:\n  - [1]:\n      - a: 1").unwrap();
    assert_eq!(json(&doc), serde_json::json!({ "m": [[{ "a": 1 }]] }));
}

#[test]
fn list_items_heterogeneous() {
    let doc = decode("mixed[3]:\n  - 42\n  - name: Ada\n    role: admin\n  - done").unwrap();
    assert_eq!(
        json(&doc),
        serde_json::json!({ "mixed": [42, { "name": "Ada", "role": "admin" }, "done"] })
    );
}

#[test]
fn four_space_indentation() {
    let doc = decode("user:\n    name: Ada\n    tags[2]: a,b\nnext: 1").unwrap();
    assert_eq!(
        json(&doc),
        serde_json::json!({ "user": { "name": "Ada", "tags": ["a", "b"] }, "next": 1 })
    );
}

#[test]
fn crlf_input() {
    let doc = decode("a: 1\r\nb:\r\n  c: 2\r\n").unwrap();
    assert_eq!(json(&doc), serde_json::json!({ "a": 1, "b": { "c": 2 } }));
}

#[test]
fn unparseable_lines_are_skipped() {
    let doc = decode("a: 1\n???\nb: 2").unwrap();
    assert_eq!(json(&doc), serde_json::json!({ "a": 1, "b": 2 }));
}

#[test]
fn blank_line_terminates_a_block() {
    let doc = decode("a: 1\n\nb: 2").unwrap();
    assert_eq!(json(&doc), serde_json::json!({ "a": 1 }));
}

#[test]
fn quoted_values_unescape() {
    let doc = decode(r#"s: "line\none\ttab \"q\" \\ back""#).unwrap();
    assert_eq!(
        doc.get("s").and_then(Value::as_str),
        Some("line\none\ttab \"q\" \\ back")
    );
}

#[test]
fn unicode_escapes() {
    let doc = decode(r#"s: "snow \u2603""#).unwrap();
    assert_eq!(doc.get("s").and_then(Value::as_str), Some("snow \u{2603}"));
}

#[test]
fn big_integer_literals_survive() {
    let doc = decode("n: 92233720368547758080").unwrap();
    // Past u64 range the JSON rendering falls back to a string of digits.
    assert_eq!(
        json(&doc),
        serde_json::json!({ "n": "92233720368547758080" })
    );
}

#[test]
fn recursion_limit_is_enforced() {
    let mut doc = String::new();
    for depth in 0..200 {
        doc.push_str(&" ".repeat(depth * 2));
        doc.push_str("a:\n");
    }
    match decode(&doc) {
        Err(Error::RecursionLimit { limit }) => assert_eq!(limit, 128),
        other => panic!("expected recursion limit error, got {:?}", other),
    }
}

#[test]
fn moderately_deep_nesting_is_fine() {
    let mut doc = String::new();
    for depth in 0..50 {
        doc.push_str(&" ".repeat(depth * 2));
        doc.push_str("a:\n");
    }
    doc.push_str(&" ".repeat(50 * 2));
    doc.push_str("leaf: 1");
    let mut value = &decode(&doc).unwrap();
    for _ in 0..50 {
        value = value.get("a").unwrap();
    }
    assert_eq!(value.get("leaf").and_then(Value::as_i64), Some(1));
}
