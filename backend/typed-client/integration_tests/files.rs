// Uploads, streamed bodies and downloads

use crate::helpers::{client_for, header_values, only_request};

use typed_client::{ClientError, DEFAULT_FORM_KEY, Decoded, RequestOptions};

use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_bytes, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize)]
struct Stored {
    size: u64,
}

/// **VALUE**: Verifies a binary download is written to the requested file.
///
/// **BUG THIS CATCHES**: Would catch chunks being dropped or reordered while
/// re-chunking the body stream.
#[tokio::test]
async fn given_binary_body_when_downloaded_then_written_to_file_path() {
    // GIVEN: A binary file larger than the chunk size
    let contents: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/report.bin"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(contents.clone(), "application/octet-stream"),
        )
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("copy.bin");

    // WHEN: Downloading with a small chunk size
    let decoded = client_for(&server)
        .download_file(
            "files/report.bin",
            Some(target.as_path()),
            RequestOptions::new().with_chunk_size(1024),
        )
        .await
        .unwrap();

    // THEN: The file holds exactly the body
    assert_eq!(decoded.into_path().as_deref(), Some(target.as_path()));
    assert_eq!(std::fs::read(&target).unwrap(), contents);
}

#[tokio::test]
async fn given_options_file_path_when_downloaded_then_used_as_target() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"abc".to_vec(), "text/csv"))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("export.csv");

    let decoded = client_for(&server)
        .download_file("export", None, RequestOptions::new().with_file_path(&target))
        .await
        .unwrap();

    assert!(matches!(decoded, Decoded::File(ref written) if *written == target));
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "abc");
}

#[tokio::test]
async fn given_json_body_when_downloaded_then_decoded_instead_of_written() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"size": 42})))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("never.json");

    let decoded = client_for(&server)
        .download_file(
            "files/meta",
            Some(target.as_path()),
            RequestOptions::new().with_schema::<Stored>(),
        )
        .await
        .unwrap();

    assert_eq!(decoded.into_model().map(|stored| stored.size), Some(42));
    assert!(!target.exists());
}

#[tokio::test]
async fn given_path_without_file_name_when_downloaded_then_configuration_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"x".to_vec(), "text/plain"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .download_file("files/", None, RequestOptions::new())
        .await;

    assert!(matches!(result, Err(ClientError::Configuration { .. })));
}

#[tokio::test]
async fn given_missing_download_when_downloaded_then_http_error_and_no_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "gone"})))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("missing.bin");

    let result = client_for(&server)
        .download_file("files/missing.bin", Some(target.as_path()), RequestOptions::new())
        .await;

    assert!(matches!(result, Err(ClientError::Http(_))));
    assert!(!target.exists());
}

/// **VALUE**: Verifies uploads arrive as multipart with the file name and field name.
///
/// **WHY THIS MATTERS**: Upload endpoints look the file up by field name and
/// often keep the original file name.
#[tokio::test]
async fn given_file_when_uploaded_then_multipart_carries_name_and_contents() {
    // GIVEN: A file on disk
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, "hello upload").unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"size": 12})))
        .mount(&server)
        .await;

    // WHEN: Uploading it under the default field
    let decoded = client_for(&server)
        .upload_file(
            "upload",
            &file,
            DEFAULT_FORM_KEY,
            RequestOptions::new().with_schema::<Stored>(),
        )
        .await
        .unwrap();

    // THEN: The multipart body names the field and the file
    assert_eq!(decoded.into_model().map(|stored| stored.size), Some(12));
    let request = only_request(&server).await;
    let content_type = header_values(&request, "content-type");
    assert!(content_type[0].starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains(r#"name="file""#));
    assert!(body.contains(r#"filename="notes.txt""#));
    assert!(body.contains("hello upload"));
}

#[tokio::test]
async fn given_missing_file_when_uploaded_then_io_error_names_path() {
    let server = MockServer::start().await;
    let missing = std::path::Path::new("/definitely/not/here.txt");

    let result = client_for(&server)
        .upload_file("upload", missing, "doc", RequestOptions::new())
        .await;

    match result {
        Err(ClientError::Io { path, .. }) => assert_eq!(path.as_deref(), Some(missing)),
        other => panic!("expected IO error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_file_when_streamed_then_body_is_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("payload.bin");
    let contents = b"0123456789abcdefghij".to_vec();
    std::fs::write(&file, &contents).unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest"))
        .and(body_bytes(contents))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"size": 20})))
        .mount(&server)
        .await;

    let decoded = client_for(&server)
        .stream_file("ingest", &file, RequestOptions::new().with_chunk_size(4))
        .await
        .unwrap();

    assert_eq!(decoded.into_json(), Some(json!({"size": 20})));
}

#[tokio::test]
async fn given_client_chunk_size_when_downloading_without_override_then_file_complete() {
    let contents: Vec<u8> = (0..=255u8).cycle().take(1_000).collect();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(contents.clone(), "application/octet-stream"),
        )
        .mount(&server)
        .await;
    let client = crate::helpers::builder_for(&server)
        .chunk_size(7)
        .build()
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("odd.bin");

    let decoded = client
        .download_file("odd.bin", Some(target.as_path()), RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(client.chunk_size(), 7);
    assert_eq!(decoded.into_path().as_deref(), Some(target.as_path()));
    assert_eq!(std::fs::read(&target).unwrap(), contents);
}
