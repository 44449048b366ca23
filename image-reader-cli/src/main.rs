//! `mcp-image-reader`: image understanding tools served over MCP stdio.

use clap::{ArgAction, Parser};
use image_reader::{ImageReader, ImageReaderServer, VisionConfig};
use rmcp::ServiceExt;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILTER: &str = "image_reader=info,mcp_image_reader=info";

const ENV_HELP: &str = "\
Environment:
  OPENAI_API_KEY             API key, required by every tool except help
  OPENAI_BASE_URL            OpenAI-compatible endpoint [default: https://api.openai.com/v1]
  OPENAI_MODEL               Vision model [default: gpt-4o-mini]
  IMAGE_READER_TIMEOUT_SECS  Per-request timeout in seconds [default: none]
  RUST_LOG                   Log filter; logs go to stderr

Variables from a .env file in the working directory are loaded first.
With no flags the server speaks MCP on stdin/stdout until the client disconnects.";

/// MCP server exposing image description, OCR and receipt extraction tools
#[derive(Parser, Debug, Clone, Copy)]
#[command(name = "mcp-image-reader")]
#[command(version, about, long_about = None)]
#[command(disable_version_flag = true, after_help = ENV_HELP)]
pub struct Args {
    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // stdout carries the protocol.
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _args = Args::parse();

    let dotenv = dotenvy::dotenv();
    init_tracing();
    if let Err(err) = dotenv
        && !err.not_found()
    {
        warn!(error = %err, "Failed to load .env file");
    }

    let config = VisionConfig::from_env()?;
    if !config.has_api_key() {
        warn!("OPENAI_API_KEY is not set; only the help tool will succeed");
    }
    info!(
        model = config.model(),
        base_url = config.base_url(),
        timeout = ?config.timeout(),
        "Starting mcp-image-reader"
    );

    let server = ImageReaderServer::new(ImageReader::new(config)?);
    let service = server.serve(rmcp::transport::stdio()).await?;
    let reason = service.waiting().await?;

    info!(?reason, "Client disconnected");
    Ok(())
}
