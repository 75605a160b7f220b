// Unit tests for output rendering and pair grouping

use crate::commands::{Output, pairs_to_value};

use typed_client::{Decoded, EncodableValue, EncoderOptions, encode_url};

use std::path::PathBuf;

use serde_json::json;

#[test]
fn given_repeated_keys_when_grouped_then_values_kept_in_order() {
    let value = pairs_to_value(vec![
        ("tag".to_string(), "a".to_string()),
        ("page".to_string(), "1".to_string()),
        ("tag".to_string(), "b".to_string()),
    ]);

    let pairs = encode_url(&value, &EncoderOptions::for_url())
        .unwrap()
        .into_pairs()
        .unwrap();

    assert_eq!(
        pairs,
        vec![
            ("page".to_string(), "1".to_string()),
            ("tag".to_string(), "a".to_string()),
            ("tag".to_string(), "b".to_string()),
        ]
    );
}

#[test]
fn given_no_pairs_when_grouped_then_empty_mapping() {
    let value = pairs_to_value(Vec::new());

    assert!(matches!(value, EncodableValue::Mapping(ref entries) if entries.is_empty()));
}

/// **VALUE**: JSON output is pretty-printed and empty bodies print nothing.
#[test]
fn given_decoded_values_when_rendered_then_printable() {
    let json = Output::from(Decoded::Json(json!({"a": 1})));
    let file = Output::from(Decoded::<serde_json::Value>::File(PathBuf::from("out.bin")));
    let empty = Output::from(Decoded::<serde_json::Value>::None);

    assert_eq!(json.to_string(), "{\n  \"a\": 1\n}");
    assert_eq!(file.to_string(), "out.bin");
    assert_eq!(empty.to_string(), "");
}
