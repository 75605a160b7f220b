//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Typed HTTP client front end
#[derive(Debug, Parser)]
#[command(name = "typed-http", version)]
#[command(about = "Call HTTP APIs with the defaults from client.toml")]
pub struct Cli {
    /// Directory holding client.toml (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Directory for typed-http.log (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// GET a path and print the decoded body
    Get {
        /// Path relative to the configured base URL, or an absolute URL
        path: String,

        /// Query parameter, repeatable
        #[arg(short = 'q', long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,

        /// Request header, repeatable
        #[arg(short = 'H', long = "header", value_parser = parse_key_value)]
        headers: Vec<(String, String)>,

        /// Print the body as text instead of decoding JSON
        #[arg(long)]
        text: bool,
    },
    /// Download a path to a file
    Download {
        path: String,

        /// Output file (defaults to the last path segment)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Upload a file
    Upload {
        path: String,

        file: PathBuf,

        /// Multipart field name
        #[arg(long, default_value = typed_client::DEFAULT_FORM_KEY)]
        field: String,

        /// Send the file as the raw request body instead of a multipart form
        #[arg(long)]
        stream: bool,
    },
}

/// Parse `key=value`. The value may itself contain `=`.
pub fn parse_key_value(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{input}'")),
    }
}
