// Request building and success decoding against a local mock server

use crate::helpers::{builder_for, client_for, header_values, only_request};

use typed_client::{ClientError, Decoded, EncodableValue, RequestData, RequestOptions, ResponseClass};

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    id: u32,
    name: String,
}

#[tokio::test]
async fn given_json_endpoint_when_get_without_schema_then_returns_json() {
    // GIVEN: An endpoint answering with a JSON list
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "a"}])))
        .mount(&server)
        .await;

    // WHEN: Calling it with default options
    let decoded = client_for(&server)
        .get("items", RequestOptions::new())
        .await
        .unwrap();

    // THEN: The body comes back as plain JSON
    assert_eq!(decoded.into_json(), Some(json!([{"id": 1, "name": "a"}])));
}

/// **VALUE**: Setting a schema is enough to get typed values back.
///
/// **BUG THIS CATCHES**: Would catch the schema being ignored when the client
/// default decoder is plain JSON.
#[tokio::test]
async fn given_schema_when_get_then_returns_validated_model() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "name": "seven"})))
        .mount(&server)
        .await;

    let decoded = client_for(&server)
        .get("items/7", RequestOptions::new().with_schema::<Item>())
        .await
        .unwrap();

    assert_eq!(
        decoded.into_model(),
        Some(Item {
            id: 7,
            name: "seven".to_string()
        })
    );
}

#[tokio::test]
async fn given_body_not_matching_schema_when_get_then_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "not-a-number"})))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .get("items/1", RequestOptions::new().with_schema::<Item>())
        .await;

    assert!(matches!(result, Err(ClientError::Validation { .. })));
}

#[tokio::test]
async fn given_text_and_none_classes_when_get_then_decoded_accordingly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let text = client
        .get(
            "health",
            RequestOptions::new().with_response_class(ResponseClass::PlainText),
        )
        .await
        .unwrap();
    let nothing = client
        .get(
            "health",
            RequestOptions::new().with_response_class(ResponseClass::None),
        )
        .await
        .unwrap();

    assert_eq!(text.into_text().as_deref(), Some("ok"));
    assert!(nothing.is_none());
}

#[tokio::test]
async fn given_client_default_class_when_call_has_none_then_default_applies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain"))
        .mount(&server)
        .await;
    let client = builder_for(&server)
        .response_class(ResponseClass::PlainText)
        .build()
        .unwrap();

    let decoded = client.get("anything", RequestOptions::new()).await.unwrap();

    assert!(matches!(decoded, Decoded::Text(ref text) if text == "plain"));
}

/// **VALUE**: A per-call header replaces the default of the same name.
///
/// **WHY THIS MATTERS**: Appending would send both values and most servers
/// pick the first one, so the override would silently lose.
#[tokio::test]
async fn given_default_and_call_headers_when_sent_then_call_header_replaces_default() {
    // GIVEN: A client with two default headers
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    let client = builder_for(&server)
        .headers(BTreeMap::from([("x-client", "default"), ("x-env", "prod")]))
        .build()
        .unwrap();

    // WHEN: One of them is overridden for a single call
    client
        .get(
            "ping",
            RequestOptions::new()
                .with_headers(BTreeMap::from([("x-env", "test")]))
                .with_response_class(ResponseClass::None),
        )
        .await
        .unwrap();

    // THEN: The other default survives and the override is the only value
    let request = only_request(&server).await;
    assert_eq!(header_values(&request, "x-client"), vec!["default"]);
    assert_eq!(header_values(&request, "x-env"), vec!["test"]);
}

#[tokio::test]
async fn given_default_and_call_cookies_when_sent_then_single_cookie_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    let client = builder_for(&server)
        .cookies(BTreeMap::from([("session", "abc")]))
        .build()
        .unwrap();

    client
        .get(
            "me",
            RequestOptions::new()
                .with_cookies(BTreeMap::from([("theme", "dark")]))
                .with_response_class(ResponseClass::None),
        )
        .await
        .unwrap();

    let request = only_request(&server).await;
    let cookies = header_values(&request, "cookie");
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].contains("session=abc"));
    assert!(cookies[0].contains("theme=dark"));
    assert!(cookies[0].contains("; "));
}

#[tokio::test]
async fn given_typed_params_when_sent_then_rendered_in_query() {
    // GIVEN: A default param and call params of several types
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("lang", "en"))
        .and(query_param("page", "2"))
        .and(query_param("exact", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let client = builder_for(&server)
        .params(BTreeMap::from([("lang", "en")]))
        .build()
        .unwrap();

    // WHEN: Calling with an int, a bool and a list
    let params = BTreeMap::from([
        ("page", EncodableValue::from(2)),
        ("exact", EncodableValue::from(true)),
        ("tags", EncodableValue::from(vec!["a", "b"])),
    ]);
    client
        .get("search", RequestOptions::new().with_params(params))
        .await
        .unwrap();

    // THEN: Lists repeat the key
    let request = only_request(&server).await;
    let tags: Vec<String> = request
        .url
        .query_pairs()
        .filter(|(key, _)| key == "tags")
        .map(|(_, value)| value.into_owned())
        .collect();
    assert_eq!(tags, vec!["a", "b"]);
}

#[tokio::test]
async fn given_bearer_token_when_sent_then_authorization_header_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;
    let client = builder_for(&server).bearer_token("tok-123").build().unwrap();

    let decoded = client.get("secure", RequestOptions::new()).await.unwrap();

    assert_eq!(decoded.into_json(), Some(json!({"ok": true})));
}

#[tokio::test]
async fn given_body_with_rich_values_when_posted_then_json_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/events"))
        .and(body_json(json!({"name": "launch", "on": "2024-01-02", "tags": ["x"]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .mount(&server)
        .await;

    let body = BTreeMap::from([
        ("name", EncodableValue::from("launch")),
        (
            "on",
            EncodableValue::from(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
        ),
        ("tags", EncodableValue::from(vec!["x"])),
    ]);
    let decoded = client_for(&server)
        .post("events", RequestOptions::new().with_body(body))
        .await
        .unwrap();

    assert_eq!(decoded.into_json(), Some(json!({"id": 1})));
}

#[tokio::test]
async fn given_form_data_when_posted_then_urlencoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("a=1&b=two+words"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let data = RequestData::Form(vec![
        ("a".to_string(), "1".to_string()),
        ("b".to_string(), "two words".to_string()),
    ]);
    let result = client_for(&server)
        .post(
            "form",
            RequestOptions::new()
                .with_data(data)
                .with_response_class(ResponseClass::None),
        )
        .await;

    assert!(result.unwrap().is_none());
}

/// **VALUE**: Verifies body and data together are rejected before anything is sent.
///
/// **BUG THIS CATCHES**: Would catch one of the two silently winning and the
/// server receiving a payload the caller did not expect.
#[tokio::test]
async fn given_body_and_data_when_posted_then_configuration_error_and_nothing_sent() {
    let server = MockServer::start().await;

    let result = client_for(&server)
        .post(
            "events",
            RequestOptions::new()
                .with_body(json!({"a": 1}))
                .with_data(RequestData::Text("raw".to_string())),
        )
        .await;

    assert!(matches!(result, Err(ClientError::Configuration { .. })));
    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

/// **VALUE**: Clones of one client can run calls concurrently with different
/// per-call headers.
///
/// **BUG THIS CATCHES**: Would catch per-call overrides leaking into the
/// shared defaults, which would make one task see the other's header.
#[tokio::test]
async fn given_concurrent_calls_when_headers_differ_then_each_sees_its_own() {
    let server = MockServer::start().await;
    for call in ["1", "2"] {
        Mock::given(method("GET"))
            .and(path("/who"))
            .and(header("x-call", call))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"call": call})))
            .mount(&server)
            .await;
    }
    let client = client_for(&server);
    let other = client.clone();

    let (first, second) = tokio::join!(
        client.get(
            "who",
            RequestOptions::new().with_headers(BTreeMap::from([("x-call", "1")]))
        ),
        other.get(
            "who",
            RequestOptions::new().with_headers(BTreeMap::from([("x-call", "2")]))
        ),
    );

    assert_eq!(first.unwrap().into_json(), Some(json!({"call": "1"})));
    assert_eq!(second.unwrap().into_json(), Some(json!({"call": "2"})));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn given_absolute_url_when_client_has_no_base_then_used_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/items/3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    let client = typed_client::Client::builder().build().unwrap();

    let decoded = client
        .delete(
            &format!("{}/items/3", server.uri()),
            RequestOptions::new().with_response_class(ResponseClass::None),
        )
        .await
        .unwrap();

    assert!(decoded.is_none());
}

#[tokio::test]
async fn given_relative_path_when_client_has_no_base_then_url_error() {
    let client = typed_client::Client::builder().build().unwrap();

    let result = client.get("items", RequestOptions::new()).await;

    assert!(matches!(result, Err(ClientError::UrlParse { .. })));
}
