//! Property-based tests: round-trip guarantees across generated value
//! trees and typed data, up to the documented number normalization
//! (whole-number floats come back as integers, non-finite floats as
//! null).

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use toon_codec::{decode, encode, from_str, to_string, Number, Value};

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        // Printable strings biased toward the characters the quoting rules
        // care about.
        "[a-zA-Z0-9 ,:|._\\-]{0,12}",
        // Arbitrary unicode, kept short.
        any::<String>().prop_map(|s| s.chars().take(8).collect()),
    ]
}

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_][a-z0-9_]{0,7}",
        "[0-9 ,:\"\\[\\]{}|#-]{0,6}",
    ]
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        // Finite floats inside the exact-integer zone of f64, so that
        // whole-number normalization stays within i64.
        (-1.0e15..1.0e15f64).prop_map(Value::from),
        arb_string().prop_map(Value::from),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(4, 24, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// The value the codec is allowed to return: float formatting folds
/// whole-number floats into integers and non-finite floats into null.
fn normalize(value: &Value) -> Value {
    match value {
        Value::Number(Number::Float(f)) => {
            if !f.is_finite() {
                Value::Null
            } else if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                Value::from(*f as i64)
            } else {
                value.clone()
            }
        }
        Value::Array(arr) => Value::Array(arr.iter().map(normalize).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), normalize(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// An empty object at the root has no rendering of its own: it encodes to
/// the empty document, which decodes to null. Every round-trip property
/// exempts exactly that value.
fn empty_root_object(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.is_empty())
}

proptest! {
    #[test]
    fn prop_value_roundtrip(value in arb_value()) {
        prop_assume!(!empty_root_object(&value));
        let text = encode(&value).unwrap();
        let back = decode(&text).unwrap();
        prop_assert_eq!(back, normalize(&value), "text was:\n{}", text);
    }

    #[test]
    fn prop_encoded_text_is_stable(value in arb_value()) {
        prop_assume!(!empty_root_object(&value));
        let text = encode(&value).unwrap();
        let again = encode(&decode(&text).unwrap()).unwrap();
        prop_assert_eq!(text, again);
    }

    #[test]
    fn prop_scalar_strings(s in arb_string()) {
        let value = Value::from(s.as_str());
        let back = decode(&encode(&value).unwrap()).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        let back = decode(&encode(&Value::from(n)).unwrap()).unwrap();
        prop_assert_eq!(back, Value::from(n));
    }

    #[test]
    fn prop_typed_vec(v in prop::collection::vec(any::<i32>(), 0..20)) {
        let text = to_string(&v).unwrap();
        let back: Vec<i32> = from_str(&text).unwrap();
        prop_assert_eq!(back, v);
    }

    #[test]
    // 1.. because an empty map encodes to the empty document, which reads
    // back as null rather than an empty map.
    fn prop_typed_map(m in prop::collection::hash_map("[a-z]{1,6}", any::<i64>(), 1..8)) {
        let text = to_string(&m).unwrap();
        let back: HashMap<String, i64> = from_str(&text).unwrap();
        prop_assert_eq!(back, m);
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct Record {
    id: u32,
    name: String,
    score: i64,
    active: bool,
    nickname: Option<String>,
}

proptest! {
    #[test]
    fn prop_typed_struct(
        id in any::<u32>(),
        name in arb_string(),
        score in any::<i64>(),
        active in any::<bool>(),
        nickname in proptest::option::of("[a-z ]{1,8}"),
    ) {
        let record = Record { id, name, score, active, nickname };
        let text = to_string(&record).unwrap();
        let back: Record = from_str(&text).unwrap();
        prop_assert_eq!(back, record);
    }

    #[test]
    fn prop_typed_rows(rows in prop::collection::vec((any::<u32>(), "[a-z]{1,8}"), 1..10)) {
        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Row { id: u32, name: String }

        let rows: Vec<Row> = rows.into_iter().map(|(id, name)| Row { id, name }).collect();
        let text = to_string(&rows).unwrap();
        let back: Vec<Row> = from_str(&text).unwrap();
        prop_assert_eq!(back, rows);
    }
}
