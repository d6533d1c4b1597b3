//! Stripstore coder service binary.
//!
//! Hosts a codec behind the framed-TCP coder protocol. Flags override
//! environment variables, which fall back to loopback defaults.

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use stripstore_codec::{BypassCodec, Codec};
use stripstore_coder::{serve, CoderConfig, CoderServer, ENV_CODEC};
use tracing_subscriber::EnvFilter;

/// Stripstore encoder/decoder service.
#[derive(Parser)]
#[command(name = "stripstore-coder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Listen address (host:port); overrides STRIPSTORE_CODER_LISTEN
    #[arg(long)]
    listen: Option<SocketAddr>,

    /// Hosted codec; overrides STRIPSTORE_CODER_CODEC
    #[arg(long)]
    codec: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn hosted_codec(name: &str) -> Result<Arc<dyn Codec>, String> {
    match name {
        "bypass" => Ok(Arc::new(BypassCodec::new())),
        other => Err(format!(
            "unsupported codec {other:?} (supported: bypass)"
        )),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = CoderConfig::from_env()?;
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }

    let codec_name = cli
        .codec
        .or_else(|| std::env::var(ENV_CODEC).ok())
        .unwrap_or_else(|| "bypass".to_string());
    let codec = hosted_codec(&codec_name)?;

    let server = Arc::new(CoderServer::new(codec));
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    serve(server, listener).await?;

    Ok(())
}
