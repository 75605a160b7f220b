use crate::{EncodableValue, SequenceKind};

use std::collections::BTreeMap;

use serde_json::json;

/// **VALUE**: Verifies serde output maps onto the value tree without loss of shape.
///
/// **WHY THIS MATTERS**: `EncodableValue::serialized` is how plain serde structs enter
/// the encoder; a wrong mapping (e.g. numbers becoming floats) changes the wire format.
#[test]
fn given_json_value_when_converted_then_shapes_are_preserved() {
    let value = EncodableValue::from(json!({"id": 5, "big": u64::MAX, "ratio": 0.5, "tags": ["a"], "none": null}));

    let EncodableValue::Mapping(entries) = value else {
        panic!("object should become a mapping");
    };
    let by_key: BTreeMap<String, EncodableValue> = entries
        .into_iter()
        .map(|(k, v)| match k {
            EncodableValue::Str(k) => (k, v),
            other => panic!("unexpected key {other:?}"),
        })
        .collect();

    assert!(matches!(by_key["id"], EncodableValue::Int(5)));
    assert!(matches!(by_key["big"], EncodableValue::UInt(u64::MAX)));
    assert!(matches!(by_key["ratio"], EncodableValue::Float(_)));
    assert!(matches!(by_key["tags"], EncodableValue::Sequence(SequenceKind::List, ref items) if items.len() == 1));
    assert!(by_key["none"].is_null());
}

#[test]
fn given_option_when_converted_then_none_is_null() {
    assert!(EncodableValue::from(None::<i32>).is_null());
    assert!(matches!(EncodableValue::from(Some(3)), EncodableValue::Int(3)));
}

#[test]
fn given_generator_when_built_then_items_are_drained_in_order() {
    let value = EncodableValue::generator((1..=3).map(|i| i * 10));

    let EncodableValue::Sequence(SequenceKind::Generator, items) = value else {
        panic!("expected generator");
    };
    let ints: Vec<i64> = items
        .iter()
        .map(|item| match item {
            EncodableValue::Int(i) => *i,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(ints, vec![10, 20, 30]);
}
