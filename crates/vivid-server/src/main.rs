use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vivid_core::io::FfmpegAdapter;
use vivid_core::pipeline::config::VividConfig;
use vivid_server::{run_server, AppState};

#[derive(Parser)]
#[command(name = "vivid-server", about = "HTTP video enhancement service")]
#[command(version)]
struct Args {
    /// Address to listen on (overrides the config file)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Service config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = VividConfig::load_or_default(args.config.as_deref())?;
    let addr = match args.bind {
        Some(addr) => addr,
        None => config
            .server
            .bind
            .parse()
            .with_context(|| format!("Invalid bind address {}", config.server.bind))?,
    };

    let adapter = Arc::new(FfmpegAdapter::new(config.encoder.clone()));
    let state = AppState::new(config, adapter);

    run_server(addr, state, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down");
        }
    })
    .await
}
