use crate::{CustomEncoders, EncodableValue, EnumMember, TypeKey};

use std::net::Ipv4Addr;

use serde_json::json;

/// **VALUE**: Verifies subtype relations walk from most to least specific.
///
/// **WHY THIS MATTERS**: Custom encoders registered for a general type (any enum, any IP
/// address) must still apply to specific values; otherwise overrides silently miss.
#[test]
fn given_specific_keys_when_lineage_walked_then_reaches_general_keys() {
    let lineage: Vec<_> = TypeKey::DateTimeTz.lineage().collect();
    assert_eq!(
        lineage,
        vec![TypeKey::DateTimeTz, TypeKey::DateTime, TypeKey::Date]
    );

    let lineage: Vec<_> = TypeKey::enum_named("Color").lineage().collect();
    assert_eq!(lineage, vec![TypeKey::enum_named("Color"), TypeKey::AnyEnum]);

    assert_eq!(TypeKey::Bool.parent(), Some(TypeKey::Int));
    assert_eq!(TypeKey::Tuple.parent(), None);
}

/// **VALUE**: Exact registrations must beat inherited ones.
///
/// **BUG THIS CATCHES**: Would catch a resolver that returns the first registered
/// ancestor instead of walking from the value's own key.
#[test]
fn given_exact_and_parent_encoders_when_resolved_then_exact_wins() {
    // GIVEN: Encoders for Int and Bool
    let encoders = CustomEncoders::new()
        .with(TypeKey::Int, |_| json!("int"))
        .with(TypeKey::Bool, |_| json!("bool"));

    // WHEN: Resolving for a bool and an unsigned int
    let for_bool = encoders.resolve(&EncodableValue::Bool(true)).map(|f| f(&EncodableValue::Null));
    let for_uint = encoders.resolve(&EncodableValue::UInt(7)).map(|f| f(&EncodableValue::Null));

    // THEN: Bool gets its own encoder, UInt inherits Int's
    assert_eq!(for_bool, Some(json!("bool")));
    assert_eq!(for_uint, Some(json!("int")));
    assert!(encoders.resolve(&EncodableValue::Str(String::new())).is_none());
}

#[test]
fn given_values_when_type_key_taken_then_reflects_runtime_type() {
    assert_eq!(EncodableValue::from(Ipv4Addr::LOCALHOST).type_key(), TypeKey::Ipv4Addr);
    assert_eq!(
        EncodableValue::from(EnumMember::new("Status", "Active", 1)).type_key(),
        TypeKey::enum_named("Status")
    );
    assert_eq!(EncodableValue::from(vec![1, 2]).type_key(), TypeKey::List);
    assert_eq!(EncodableValue::tuple([1, 2]).type_key(), TypeKey::Tuple);
}

#[test]
fn given_two_encoder_tables_when_merged_then_overrides_win() {
    let model_side = CustomEncoders::new()
        .with(TypeKey::Str, |_| json!("model"))
        .with(TypeKey::Int, |_| json!("model-int"));
    let caller_side = CustomEncoders::new().with(TypeKey::Str, |_| json!("caller"));

    let merged = model_side.merged_with(&caller_side);

    let probe = |value: EncodableValue| merged.resolve(&value).map(|f| f(&value));
    assert_eq!(probe(EncodableValue::from("x")), Some(json!("caller")));
    assert_eq!(probe(EncodableValue::from(1)), Some(json!("model-int")));
    assert_eq!(merged.len(), 2);
}
