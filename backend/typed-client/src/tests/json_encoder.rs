// Unit tests for the JSON encoder
// Tests dispatch order, option handling, and the built-in type table

use crate::encoders::{EncoderOptions, SECRET_MASK, encode_json, to_json_string};
use crate::error::EncodingError;

use models::{
    CustomEncoders, DynamicModel, EncodableValue, EnumMember, Model, ModelField, ObjectLike,
    Record, SequenceKind, TypeKey,
};

use std::collections::VecDeque;
use std::str::FromStr;

use chrono::{NaiveDate, TimeDelta};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Account {
    id: i64,
    #[serde(rename = "displayName")]
    display_name: String,
    email: Option<String>,
}

impl Model for Account {
    fn type_name(&self) -> &str {
        "Account"
    }

    fn fields(&self) -> Vec<ModelField> {
        vec![
            ModelField::new("id", self.id),
            ModelField::new("display_name", self.display_name.clone()).with_alias("displayName"),
            ModelField::new("email", self.email.clone()),
        ]
    }
}

fn json(value: impl Into<EncodableValue>) -> Value {
    encode_json(&value.into(), &EncoderOptions::default()).expect("value should encode")
}

// ============================================
// DECIMALS
// ============================================

/// **VALUE**: Verifies decimals become integers exactly when they have no fractional digits.
///
/// **WHY THIS MATTERS**: Servers distinguish `10` from `10.0`; a decimal stored as
/// `1.0` must stay a float even though its value is integral.
///
/// **BUG THIS CATCHES**: Would catch a rule based on the numeric value
/// (`fract() == 0`) instead of the stored scale.
#[test]
fn given_decimals_when_encoded_then_integer_iff_scale_is_zero() {
    let ten = json(Decimal::from_str("10").unwrap());
    let one_point_zero = json(Decimal::from_str("1.0").unwrap());
    let one_point_one_zero = json(Decimal::from_str("1.10").unwrap());

    assert!(ten.is_i64(), "10 should be an integer, got {ten}");
    assert_eq!(ten, json!(10));
    assert!(one_point_zero.is_f64(), "1.0 should stay a float");
    assert_eq!(one_point_zero.as_f64(), Some(1.0));
    assert_eq!(one_point_one_zero.as_f64(), Some(1.1));
}

/// **VALUE**: Whole decimals too large for a 64-bit integer are rejected.
///
/// **BUG THIS CATCHES**: Would catch `100000000000000000000` silently becoming
/// `1e+20`, which drops digits and changes the JSON type.
#[test]
fn given_whole_decimal_beyond_64_bits_when_encoded_then_precision_error() {
    let huge = Decimal::from_str("100000000000000000000").unwrap();
    let largest_unsigned = Decimal::from(u64::MAX);

    let result = encode_json(&EncodableValue::from(huge), &EncoderOptions::default());

    assert!(matches!(result, Err(EncodingError::PrecisionLoss { .. })));
    assert_eq!(json(largest_unsigned), json!(u64::MAX));
}

// ============================================
// MODELS
// ============================================

/// **VALUE**: Encoding a model and validating the JSON back gives the same model.
///
/// **BUG THIS CATCHES**: Would catch aliases being dropped (the schema expects
/// `displayName`) or `None` fields going missing.
#[test]
fn given_model_when_encoded_then_round_trips_through_schema() {
    let account = Account {
        id: 7,
        display_name: "Ada".to_string(),
        email: None,
    };

    let encoded = json(EncodableValue::model(account.clone()));
    let decoded: Account = serde_json::from_value(encoded.clone()).unwrap();

    assert_eq!(encoded, json!({"id": 7, "displayName": "Ada", "email": null}));
    assert_eq!(decoded, account);
}

#[test]
fn given_root_model_when_encoded_then_unwraps_root_value() {
    let tags = DynamicModel::root("Tags", vec!["a", "b"]);

    assert_eq!(json(EncodableValue::model(tags)), json!(["a", "b"]));
}

/// **VALUE**: Verifies caller overrides beat encoders the model declares for the same type.
#[test]
fn given_model_and_caller_encoders_when_encoded_then_caller_wins() {
    // GIVEN: A model with its own int and float encoders, and a caller override for ints
    let model = DynamicModel::new("Counter")
        .with_field(ModelField::new("count", 3))
        .with_field(ModelField::new("ratio", 0.5))
        .with_encoders(
            CustomEncoders::new()
                .with(TypeKey::Int, |_| json!("model-int"))
                .with(TypeKey::Float, |_| json!("model-float")),
        );
    let options = EncoderOptions::new()
        .with_custom_encoders(CustomEncoders::new().with(TypeKey::Int, |_| json!("caller-int")));

    // WHEN: Encoding the model
    let encoded = encode_json(&EncodableValue::model(model), &options).unwrap();

    // THEN: Caller wins on ints, the model's float encoder still applies
    assert_eq!(encoded, json!({"count": "caller-int", "ratio": "model-float"}));
}

// ============================================
// MAPPINGS
// ============================================

/// **VALUE**: Exclude removes keys and include limits them; exclude wins on overlap.
///
/// **BUG THIS CATCHES**: Would catch include/exclude leaking into nested mappings,
/// which would strip fields the caller never named.
#[test]
fn given_include_and_exclude_when_encoding_mapping_then_only_allowed_keys_remain() {
    let value = EncodableValue::mapping([
        ("a", EncodableValue::from(1)),
        ("b", EncodableValue::mapping([("a", 2), ("c", 3)])),
        ("c", EncodableValue::from(4)),
    ]);
    let options = EncoderOptions::new()
        .with_include(["a", "b"])
        .with_exclude(["a"]);

    let encoded = encode_json(&value, &options).unwrap();

    assert_eq!(encoded, json!({"b": {"a": 2, "c": 3}}));
}

/// **VALUE**: Enum keys are filtered by the value they are written under.
///
/// **BUG THIS CATCHES**: Would catch filters matching the member name while the
/// output key is the member value, so `exclude={"red"}` left `"red"` in place.
#[test]
fn given_enum_keys_when_filtered_then_matched_by_written_value() {
    let red = EnumMember::new("Color", "Red", "red");
    let blue = EnumMember::new("Color", "Blue", "blue");
    let value = EncodableValue::mapping([(red, 1), (blue, 2)]);

    let excluded = encode_json(&value, &EncoderOptions::new().with_exclude(["red"])).unwrap();
    let by_name = encode_json(&value, &EncoderOptions::new().with_exclude(["Red"])).unwrap();

    assert_eq!(excluded, json!({"blue": 2}));
    assert_eq!(by_name, json!({"red": 1, "blue": 2}));
}

#[test]
fn given_reserved_keys_when_encoded_then_dropped_unless_kept() {
    let value = EncodableValue::mapping([("_sa_instance_state", 1), ("name", 2)]);

    let filtered = encode_json(&value, &EncoderOptions::default()).unwrap();
    let kept = encode_json(&value, &EncoderOptions::new().with_reserved_keys(true)).unwrap();

    assert_eq!(filtered, json!({"name": 2}));
    assert_eq!(kept, json!({"_sa_instance_state": 1, "name": 2}));
}

#[test]
fn given_exclude_none_when_encoded_then_null_values_dropped() {
    let value = EncodableValue::mapping([
        ("a", EncodableValue::Null),
        ("b", EncodableValue::from("")),
    ]);

    let encoded = encode_json(&value, &EncoderOptions::new().with_exclude_none(true)).unwrap();

    assert_eq!(encoded, json!({"b": ""}));
}

/// **VALUE**: Scalar keys are rendered as strings; container keys are rejected.
#[test]
fn given_non_string_keys_when_encoded_then_rendered_or_rejected() {
    let scalars = EncodableValue::mapping([
        (EncodableValue::from(1), "one"),
        (EncodableValue::Null, "nothing"),
        (EncodableValue::from(true), "yes"),
    ]);
    let container = EncodableValue::mapping([(EncodableValue::tuple([1, 2]), "pair")]);

    assert_eq!(
        json(scalars),
        json!({"1": "one", "null": "nothing", "true": "yes"})
    );
    assert!(matches!(
        encode_json(&container, &EncoderOptions::default()),
        Err(EncodingError::UnsupportedKey { .. })
    ));
}

// ============================================
// BUILT-IN TYPES
// ============================================

#[test]
fn given_domain_scalars_when_encoded_then_use_builtin_forms() {
    let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let datetime = date.and_hms_opt(13, 5, 9).unwrap();
    let uuid = uuid::Uuid::nil();

    assert_eq!(json(date), json!("2024-02-29"));
    assert_eq!(json(datetime), json!("2024-02-29T13:05:09"));
    assert_eq!(json(datetime.and_utc()), json!("2024-02-29T13:05:09+00:00"));
    assert_eq!(json(TimeDelta::milliseconds(1500)), json!(1.5));
    assert_eq!(json(uuid), json!("00000000-0000-0000-0000-000000000000"));
    assert_eq!(json(regex::Regex::new(r"^\d+$").unwrap()), json!(r"^\d+$"));
    assert_eq!(json(std::path::PathBuf::from("a/b.txt")), json!("a/b.txt"));
}

#[test]
fn given_secrets_when_encoded_then_masked() {
    assert_eq!(json(SecretString::from("hunter2".to_string())), json!(SECRET_MASK));
    assert_eq!(json(SecretString::from(String::new())), json!(""));
    assert_eq!(json(EncodableValue::secret_bytes(vec![1, 2])), json!(SECRET_MASK));
}

#[test]
fn given_bytes_when_encoded_then_utf8_text_or_error() {
    assert_eq!(json(EncodableValue::bytes("héllo")), json!("héllo"));

    let invalid = encode_json(&EncodableValue::bytes(vec![0xff, 0xfe]), &EncoderOptions::default());
    assert!(matches!(invalid, Err(EncodingError::InvalidText { .. })));
}

#[test]
fn given_collections_when_encoded_then_become_lists_in_order() {
    let deque: VecDeque<i32> = VecDeque::from([3, 1, 2]);

    assert_eq!(json(deque), json!([3, 1, 2]));
    assert_eq!(json(EncodableValue::frozen_set(["x"])), json!(["x"]));
    assert_eq!(json(EncodableValue::generator((0..3).map(|i| i * 2))), json!([0, 2, 4]));
    assert_eq!(
        json(EncodableValue::sequence(SequenceKind::Tuple, [1, 2])),
        json!([1, 2])
    );
}

#[test]
fn given_enum_and_record_when_encoded_then_use_value_and_fields() {
    let status = EnumMember::new("Status", "Active", "active");
    let record = Record::builder("Point")
        .with_field("x", 1)
        .with_field("y", status.clone())
        .build()
        .unwrap();

    assert_eq!(json(status), json!("active"));
    assert_eq!(json(record), json!({"x": 1, "y": "active"}));
}

/// **VALUE**: An override for a parent type applies to subtypes.
///
/// **BUG THIS CATCHES**: Would catch exact-type-only lookup, which would let
/// offset-aware datetimes bypass an override registered for dates.
#[test]
fn given_override_for_parent_type_when_encoding_subtype_then_override_applies() {
    let options = EncoderOptions::new()
        .with_custom_encoders(CustomEncoders::new().with(TypeKey::Date, |_| json!("a date")));
    let datetime = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let encoded = encode_json(&EncodableValue::from(datetime), &options).unwrap();

    assert_eq!(encoded, json!("a date"));
}

#[test]
fn given_non_finite_float_when_encoded_then_returns_error() {
    let result = encode_json(&EncodableValue::Float(f64::NAN), &EncoderOptions::default());

    assert!(matches!(result, Err(EncodingError::NonFiniteFloat { .. })));
}

// ============================================
// OBJECT FALLBACK
// ============================================

#[derive(Debug)]
struct Settings;

impl ObjectLike for Settings {
    fn type_name(&self) -> &str {
        "Settings"
    }

    fn to_attributes(&self) -> Result<Vec<(String, EncodableValue)>, String> {
        Ok(vec![("theme".to_string(), EncodableValue::from("dark"))])
    }
}

#[derive(Debug)]
struct Opaque;

impl ObjectLike for Opaque {
    fn type_name(&self) -> &str {
        "Opaque"
    }
}

/// **VALUE**: Unknown objects fall back to attributes; with neither view both causes surface.
#[test]
fn given_objects_when_encoded_then_fall_back_or_report_both_failures() {
    assert_eq!(json(EncodableValue::object(Settings)), json!({"theme": "dark"}));

    let err = encode_json(&EncodableValue::object(Opaque), &EncoderOptions::default())
        .expect_err("opaque object should not encode");
    match err {
        EncodingError::Unconvertible {
            type_name, errors, ..
        } => {
            assert_eq!(type_name, "Opaque");
            assert_eq!(errors.len(), 2);
        }
        other => panic!("expected Unconvertible, got {other:?}"),
    }
}

#[test]
fn given_mapping_when_serialized_then_keeps_insertion_order() {
    let value = EncodableValue::mapping([("z", 1), ("a", 2)]);

    assert_eq!(to_json_string(&value).unwrap(), r#"{"z":1,"a":2}"#);
}
