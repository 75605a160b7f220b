// Unit tests for argument parsing

use crate::cli::{Cli, Command, parse_key_value};

use clap::Parser;

#[test]
fn given_value_with_equals_when_parsed_then_split_on_first() {
    assert_eq!(
        parse_key_value("filter=a=b"),
        Ok(("filter".to_string(), "a=b".to_string()))
    );
    assert_eq!(
        parse_key_value("empty="),
        Ok(("empty".to_string(), String::new()))
    );
}

#[test]
fn given_missing_key_when_parsed_then_rejected() {
    assert!(parse_key_value("novalue").is_err());
    assert!(parse_key_value("=value").is_err());
}

#[test]
fn given_get_with_repeated_flags_when_parsed_then_all_collected() {
    let cli = Cli::try_parse_from([
        "typed-http",
        "--config-dir",
        "/tmp/conf",
        "get",
        "items",
        "-q",
        "tag=a",
        "-q",
        "tag=b",
        "-H",
        "x-trace=1",
        "--text",
    ])
    .unwrap();

    assert_eq!(cli.config_dir.as_deref(), Some(std::path::Path::new("/tmp/conf")));
    match cli.command {
        Command::Get {
            path,
            query,
            headers,
            text,
        } => {
            assert_eq!(path, "items");
            assert_eq!(query.len(), 2);
            assert_eq!(headers, vec![("x-trace".to_string(), "1".to_string())]);
            assert!(text);
        }
        other => panic!("expected get, got {other:?}"),
    }
}

#[test]
fn given_upload_without_field_when_parsed_then_default_form_key() {
    let cli = Cli::try_parse_from(["typed-http", "upload", "files", "report.pdf"]).unwrap();

    match cli.command {
        Command::Upload { field, stream, .. } => {
            assert_eq!(field, typed_client::DEFAULT_FORM_KEY);
            assert!(!stream);
        }
        other => panic!("expected upload, got {other:?}"),
    }
}
