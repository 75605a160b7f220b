use typed_http::cli::Cli;
use typed_http::commands::execute;
use typed_http::error::CliError;
use typed_http::logger::{default_log_dir, initialize as LoggerInitialize};

use typed_client::ClientConfig;

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_dir = cli.log_dir.clone().unwrap_or_else(default_log_dir);
    if let Err(e) = LoggerInitialize(&log_dir) {
        eprintln!("{e}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Http(http)) => {
            error!("Request failed with HTTP {}", http.status_code());
            eprintln!("HTTP {}: {}", http.status, http.response);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config_dir {
        Some(dir) => ClientConfig::load(dir)?,
        None => ClientConfig::load_default()?,
    };
    let client = config.into_builder()?.build()?;
    info!("typed-http {} starting", env!("CARGO_PKG_VERSION"));

    let output = execute(&client, cli.command).await?;
    let rendered = output.to_string();
    if !rendered.is_empty() {
        println!("{rendered}");
    }

    client.close();
    Ok(())
}
