// Unit tests for call-local merging of defaults and overrides

use crate::client::files::file_name_from_path;
use crate::client::merge::{apply_cookies, header_map, merge_headers, merge_pairs, url_pairs};
use crate::error::ClientError;

use models::EncodableValue;

use std::collections::BTreeMap;

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};

fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// **VALUE**: A per-call header replaces every default value of that header.
///
/// **BUG THIS CATCHES**: Would catch `HeaderMap::append` semantics leaking into
/// overrides, which sends both the default and the override to the server.
#[test]
fn given_default_and_override_headers_when_merged_then_override_replaces() {
    // GIVEN: Defaults with two accept values and a user agent
    let mut defaults = HeaderMap::new();
    defaults.append("accept", HeaderValue::from_static("text/html"));
    defaults.append("accept", HeaderValue::from_static("text/plain"));
    defaults.insert("x-client", HeaderValue::from_static("cli"));
    let overrides = header_map(pairs(&[("accept", "application/json")])).unwrap();

    // WHEN: Merging
    let merged = merge_headers(&defaults, overrides);

    // THEN: Accept is replaced, other defaults survive, defaults are untouched
    let accept: Vec<_> = merged.get_all("accept").iter().collect();
    assert_eq!(accept, vec!["application/json"]);
    assert_eq!(merged.get("x-client").unwrap(), "cli");
    assert_eq!(defaults.get_all("accept").iter().count(), 2);
}

#[test]
fn given_default_and_override_params_when_merged_then_override_keys_replace_all_defaults() {
    let defaults = pairs(&[("tag", "a"), ("tag", "b"), ("page", "1")]);

    let merged = merge_pairs(&defaults, pairs(&[("tag", "c")]));

    assert_eq!(merged, pairs(&[("page", "1"), ("tag", "c")]));
}

#[test]
fn given_cookies_when_applied_then_single_cookie_header_joined() {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_static("explicit=1"));

    apply_cookies(&mut headers, &pairs(&[("session", "abc"), ("theme", "dark")])).unwrap();

    assert_eq!(
        headers.get(COOKIE).unwrap(),
        "explicit=1; session=abc; theme=dark"
    );
    assert_eq!(headers.get_all(COOKIE).iter().count(), 1);
}

/// **VALUE**: A cookie value carrying `;` is rejected instead of splitting into
/// extra cookies.
///
/// **WHY THIS MATTERS**: Cookie values often come from user input; `abc; admin=1`
/// would otherwise reach the server as two cookies, one the caller never set.
#[test]
fn given_cookie_value_with_separator_when_applied_then_configuration_error() {
    // GIVEN: A cookie mapping whose value embeds a second cookie
    let cookies = url_pairs(&EncodableValue::from(BTreeMap::from([(
        "session",
        "abc; admin=1",
    )])))
    .unwrap();
    let mut headers = HeaderMap::new();

    // WHEN: Folding it into the Cookie header
    let result = apply_cookies(&mut headers, &cookies);

    // THEN: Rejected, and no header was written
    assert!(matches!(result, Err(ClientError::Configuration { .. })));
    assert!(headers.get(COOKIE).is_none());
}

#[test]
fn given_invalid_cookie_names_and_values_when_applied_then_rejected() {
    let rejected = [
        ("", "x"),
        ("bad name", "x"),
        ("a=b", "x"),
        ("ok", "two words"),
        ("ok", "a,b"),
        ("ok", "back\\slash"),
        ("ok", "\"inner\"quote\""),
    ];
    for (name, value) in rejected {
        let result = apply_cookies(&mut HeaderMap::new(), &pairs(&[(name, value)]));
        assert!(result.is_err(), "expected {name:?}={value:?} to be rejected");
    }

    let mut headers = HeaderMap::new();
    apply_cookies(&mut headers, &pairs(&[("token", "\"quoted-ok\""), ("empty", "")])).unwrap();
    assert_eq!(headers.get(COOKIE).unwrap(), "token=\"quoted-ok\"; empty=");
}

#[test]
fn given_mapping_with_list_when_url_paired_then_key_repeats() {
    let params = BTreeMap::from([
        ("ids", EncodableValue::from(vec![1, 2])),
        ("q", EncodableValue::from("rust")),
    ]);

    let encoded = url_pairs(&EncodableValue::from(params)).unwrap();

    assert_eq!(encoded, pairs(&[("ids", "1"), ("ids", "2"), ("q", "rust")]));
}

#[test]
fn given_invalid_header_name_when_mapped_then_returns_configuration_error() {
    let result = header_map(pairs(&[("bad header", "x")]));

    assert!(matches!(result, Err(ClientError::Configuration { .. })));
}

#[test]
fn given_request_paths_when_file_name_derived_then_uses_last_segment() {
    assert_eq!(
        file_name_from_path("files/report.pdf?download=1").unwrap(),
        std::path::PathBuf::from("report.pdf")
    );
    assert_eq!(
        file_name_from_path("archive.zip").unwrap(),
        std::path::PathBuf::from("archive.zip")
    );
    assert!(file_name_from_path("files/").is_err());
}
