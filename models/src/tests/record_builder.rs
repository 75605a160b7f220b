use crate::{EncodableValue, Record};

/// **VALUE**: Verifies the builder keeps field order and values.
#[test]
fn given_fields_when_built_then_record_keeps_declaration_order() {
    // GIVEN / WHEN: A record with two fields
    let record = Record::builder("Point")
        .with_field("x", 1)
        .with_field("y", 2.5)
        .build()
        .expect("record should build");

    // THEN: Order and lookup are preserved
    let names: Vec<_> = record.fields().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["x", "y"]);
    assert!(matches!(record.get("y"), Some(EncodableValue::Float(v)) if (*v - 2.5).abs() < f64::EPSILON));
    assert_eq!(record.type_name(), "Point");
}

/// **VALUE**: Duplicate field names are rejected instead of silently shadowing.
///
/// **BUG THIS CATCHES**: A record with two `id` fields would encode to a mapping where
/// the second value overwrites the first, hiding a caller bug.
#[test]
fn given_duplicate_field_when_built_then_returns_validation_error() {
    let result = Record::builder("Point")
        .with_field("x", 1)
        .with_field("x", 2)
        .build();

    let err = result.expect_err("duplicate should fail");
    assert!(err.to_string().contains("duplicate field 'x'"));
}

#[test]
fn given_blank_type_name_when_built_then_returns_validation_error() {
    assert!(Record::builder("  ").build().is_err());
}
