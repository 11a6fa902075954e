//! RelayChat TUI entry point.

use std::path::PathBuf;

use clap::Parser;
use relaychat_tui::{endpoint, event_loop, logging};

/// RelayChat terminal client
#[derive(Parser, Debug)]
#[command(name = "relaychat-tui")]
#[command(about = "Terminal client for RelayChat direct messaging")]
#[command(version)]
struct Args {
    /// Relay server URL (http, https, ws or wss)
    #[arg(short, long, default_value = "http://localhost:8080")]
    server: String,

    /// Log in as this user on startup
    #[arg(short, long)]
    username: Option<String>,

    /// Write logs to this file
    ///
    /// The terminal owns stdout, so logging is off unless a file is given.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        logging::init(path, &args.log_level)?;
    }

    let endpoint = endpoint::websocket_endpoint(&args.server)?;
    tracing::info!(%endpoint, "starting");

    Ok(event_loop::run(endpoint, args.username).await?)
}
