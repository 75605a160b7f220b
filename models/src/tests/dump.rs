// Unit tests for dumping models to field mappings

use crate::{DumpOptions, DynamicModel, EncodableValue, FieldFilter, ModelField, dump_model};

fn user() -> DynamicModel {
    DynamicModel::new("User")
        .with_field(ModelField::new("user_id", 7).with_alias("userId"))
        .with_field(ModelField::new("name", "ada"))
        .with_field(ModelField::new("nickname", EncodableValue::Null))
        .with_field(ModelField::new("role", "member").unset())
}

fn keys(pairs: &[(String, EncodableValue)]) -> Vec<&str> {
    pairs.iter().map(|(k, _)| k.as_str()).collect()
}

/// **VALUE**: Verifies the default dump uses aliases and keeps every field.
#[test]
fn given_default_options_when_dumped_then_uses_aliases_in_field_order() {
    let pairs = dump_model(&user(), &DumpOptions::default());

    assert_eq!(keys(&pairs), vec!["userId", "name", "nickname", "role"]);
}

/// **VALUE**: Each exclusion flag removes exactly the fields it names.
///
/// **BUG THIS CATCHES**: Would catch flags wired to the wrong field attribute
/// (e.g. exclude_unset checking `is_default`).
#[test]
fn given_exclusion_flags_when_dumped_then_matching_fields_removed() {
    let no_unset = DumpOptions {
        exclude_unset: true,
        ..DumpOptions::default()
    };
    let no_none = DumpOptions {
        exclude_none: true,
        by_alias: false,
        ..DumpOptions::default()
    };

    assert_eq!(
        keys(&dump_model(&user(), &no_unset)),
        vec!["userId", "name", "nickname"]
    );
    assert_eq!(
        keys(&dump_model(&user(), &no_none)),
        vec!["user_id", "name", "role"]
    );
}

/// **VALUE**: Exclude wins over include when both name the same field.
#[test]
fn given_include_and_exclude_overlap_when_dumped_then_exclude_wins() {
    let options = DumpOptions {
        filter: FieldFilter::new()
            .include(["user_id", "name"])
            .exclude(["name"]),
        ..DumpOptions::default()
    };

    let pairs = dump_model(&user(), &options);

    assert_eq!(keys(&pairs), vec!["userId"], "Filter matches names, emits aliases");
}

#[test]
fn given_serializable_struct_when_wrapped_then_fields_follow_serde_output() {
    #[derive(serde::Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    let model = DynamicModel::from_serialize("Point", &Point { x: 1, y: 2 }).unwrap();
    let pairs = dump_model(&model, &DumpOptions::default());

    let mut names = keys(&pairs);
    names.sort_unstable();
    assert_eq!(names, vec!["x", "y"]);
    assert!(DynamicModel::from_serialize("Scalar", &5).is_err());
}
