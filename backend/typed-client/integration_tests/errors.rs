// Non-2xx responses and transport failures

use crate::helpers::{builder_for, client_for};

use typed_client::{ClientError, ErrorModels, ErrorPayload, ParseError, RequestOptions, StatusKind};

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct ApiError {
    detail: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct FieldErrors {
    fields: Vec<String>,
}

async fn server_answering(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

/// **VALUE**: Verifies a 404 with no registered model becomes a typed `NotFound`
/// carrying the decoded body.
///
/// **WHY THIS MATTERS**: Callers branch on the status kind; a generic error would
/// force them to parse status codes out of strings.
///
/// **BUG THIS CATCHES**: Would catch:
/// - 4xx responses being decoded as if they succeeded
/// - The status taxonomy lookup returning the wrong kind
/// - The error body being dropped
#[tokio::test]
async fn given_404_without_error_model_when_called_then_not_found_with_json_payload() {
    // GIVEN: A server answering 404 with a JSON body
    let server =
        server_answering(ResponseTemplate::new(404).set_body_json(json!({"detail": "missing"})))
            .await;

    // WHEN: Calling it
    let result = client_for(&server).get("items/9", RequestOptions::new()).await;

    // THEN: A typed HTTP error with the raw JSON payload
    let error = match result {
        Err(ClientError::Http(error)) => error,
        other => panic!("expected HTTP error, got {other:?}"),
    };
    assert!(error.is_kind(StatusKind::NotFound));
    assert_eq!(error.status_code(), 404);
    assert_eq!(error.response.as_json(), Some(&json!({"detail": "missing"})));
}

#[tokio::test]
async fn given_client_error_model_when_status_matches_then_payload_is_typed() {
    let server =
        server_answering(ResponseTemplate::new(409).set_body_json(json!({"detail": "taken"})))
            .await;
    let client = builder_for(&server)
        .error_models(ErrorModels::new().with::<ApiError>(409))
        .build()
        .unwrap();

    let error = client
        .get("users/1", RequestOptions::new())
        .await
        .unwrap_err();

    let http = error.as_http().expect("should be an HTTP error");
    assert!(http.is_kind(StatusKind::Conflict));
    assert_eq!(
        http.response.downcast_ref::<ApiError>(),
        Some(&ApiError {
            detail: "taken".to_string()
        })
    );
}

/// **VALUE**: A per-call model for a status wins over the client's.
#[tokio::test]
async fn given_call_error_model_when_client_has_one_for_same_status_then_call_wins() {
    let server = server_answering(
        ResponseTemplate::new(422).set_body_json(json!({"fields": ["name", "email"]})),
    )
    .await;
    let client = builder_for(&server)
        .error_models(ErrorModels::new().with::<ApiError>(422))
        .build()
        .unwrap();

    let error = client
        .get(
            "users",
            RequestOptions::new().with_error_model::<FieldErrors>(422),
        )
        .await
        .unwrap_err();

    let payload = &error.as_http().expect("HTTP error").response;
    assert!(payload.downcast_ref::<ApiError>().is_none());
    assert_eq!(
        payload.downcast_ref::<FieldErrors>().map(|e| e.fields.len()),
        Some(2)
    );
}

#[tokio::test]
async fn given_error_model_when_body_does_not_fit_then_validation_error() {
    let server =
        server_answering(ResponseTemplate::new(400).set_body_json(json!({"unexpected": 1})))
            .await;

    let result = client_for(&server)
        .get("x", RequestOptions::new().with_error_model::<ApiError>(400))
        .await;

    assert!(matches!(result, Err(ClientError::Validation { .. })));
}

/// **VALUE**: A non-JSON error body surfaces as a parse error that keeps the text.
///
/// **BUG THIS CATCHES**: Would catch HTML error pages from proxies being lost,
/// leaving the caller with nothing to diagnose.
#[tokio::test]
async fn given_500_with_text_body_when_called_then_parse_error_keeps_raw_text() {
    let server =
        server_answering(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .await;

    let result = client_for(&server).get("boom", RequestOptions::new()).await;

    match result {
        Err(ClientError::Parse(error @ ParseError::InvalidJson { .. })) => {
            assert_eq!(error.raw_response(), "Internal Server Error");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_empty_error_body_when_called_then_payload_is_null() {
    let server = server_answering(ResponseTemplate::new(503)).await;

    let error = client_for(&server)
        .get("down", RequestOptions::new())
        .await
        .unwrap_err();

    let http = error.as_http().expect("HTTP error");
    assert!(http.is_kind(StatusKind::ServiceUnavailable));
    assert!(matches!(&http.response, ErrorPayload::Json(Value::Null)));
}

#[tokio::test]
async fn given_unmapped_status_when_called_then_kind_is_none() {
    let server =
        server_answering(ResponseTemplate::new(599).set_body_json(json!({"detail": "?"}))).await;

    let error = client_for(&server)
        .get("odd", RequestOptions::new())
        .await
        .unwrap_err();

    let http = error.as_http().expect("HTTP error");
    assert_eq!(http.status_code(), 599);
    assert!(http.kind.is_none());
}

#[tokio::test]
async fn given_slow_server_when_call_timeout_is_short_then_transport_timeout() {
    let server = server_answering(
        ResponseTemplate::new(200)
            .set_body_json(json!({}))
            .set_delay(Duration::from_millis(500)),
    )
    .await;

    let result = client_for(&server)
        .get(
            "slow",
            RequestOptions::new().with_timeout(Duration::from_millis(50)),
        )
        .await;

    assert!(matches!(
        result,
        Err(ClientError::Transport {
            is_timeout: true,
            ..
        })
    ));
}
