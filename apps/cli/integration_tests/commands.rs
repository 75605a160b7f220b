use typed_http::cli::Command;
use typed_http::commands::{Output, execute};
use typed_http::error::CliError;

use typed_client::{Client, ClientConfig};

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Commands executed against a local mock server, with a client built the
// same way the binary builds it (from a ClientConfig)
// ============================================================================

fn client_for(server: &MockServer) -> Client {
    let config = ClientConfig {
        base_url: Some(format!("{}/", server.uri())),
        ..ClientConfig::default()
    };
    config.into_builder().unwrap().build().unwrap()
}

/// **VALUE**: Tests the `get` command end to end, including repeated query keys.
///
/// **BUG THIS CATCHES**: Would catch `-q` pairs being collapsed so only the last
/// value for a key reaches the server.
#[tokio::test]
async fn given_get_command_when_executed_then_prints_json() {
    // GIVEN: A server expecting a query and a header
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "2"))
        .and(header("x-trace", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2])))
        .mount(&server)
        .await;

    // WHEN: Executing get
    let output = execute(
        &client_for(&server),
        Command::Get {
            path: "items".to_string(),
            query: vec![
                ("page".to_string(), "2".to_string()),
                ("tag".to_string(), "a".to_string()),
                ("tag".to_string(), "b".to_string()),
            ],
            headers: vec![("x-trace".to_string(), "t1".to_string())],
            text: false,
        },
    )
    .await
    .unwrap();

    // THEN: The JSON comes back and both tags were sent
    assert_eq!(output, Output::Json(json!([1, 2])));
    let requests = server.received_requests().await.unwrap();
    let tags = requests[0]
        .url
        .query_pairs()
        .filter(|(key, _)| key == "tag")
        .count();
    assert_eq!(tags, 2);
}

#[tokio::test]
async fn given_not_found_when_get_executed_then_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "nope"})))
        .mount(&server)
        .await;

    let result = execute(
        &client_for(&server),
        Command::Get {
            path: "missing".to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            text: true,
        },
    )
    .await;

    match result {
        Err(CliError::Http(http)) => {
            assert_eq!(http.status_code(), 404);
            assert_eq!(http.response.to_string(), r#"{"detail":"nope"}"#);
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_download_command_when_executed_then_prints_written_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/data.bin"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![1u8, 2, 3], "application/octet-stream"))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("data.bin");

    let output = execute(
        &client_for(&server),
        Command::Download {
            path: "files/data.bin".to_string(),
            output: Some(target.clone()),
        },
    )
    .await
    .unwrap();

    assert_eq!(output, Output::File(target.clone()));
    assert_eq!(std::fs::read(&target).unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn given_upload_command_with_stream_when_executed_then_raw_body_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("note.txt");
    std::fs::write(&file, "streamed").unwrap();

    let output = execute(
        &client_for(&server),
        Command::Upload {
            path: "ingest".to_string(),
            file,
            field: "file".to_string(),
            stream: true,
        },
    )
    .await
    .unwrap();

    assert_eq!(output, Output::Json(json!({"ok": true})));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].body, b"streamed".to_vec());
}

#[tokio::test]
async fn given_upload_of_directory_when_executed_then_cli_error_and_nothing_sent() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let result = execute(
        &client_for(&server),
        Command::Upload {
            path: "upload".to_string(),
            file: dir.path().to_path_buf(),
            field: "file".to_string(),
            stream: false,
        },
    )
    .await;

    assert!(matches!(result, Err(CliError::Cli { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}
