mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vivid", about = "Video frame enhancement tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enhance every frame of a video, keeping its audio
    #[cfg(feature = "ffmpeg")]
    Enhance(commands::enhance::EnhanceArgs),
    /// Enhance a single still image
    Still(commands::still::StillArgs),
    /// Show video container metadata
    #[cfg(feature = "ffmpeg")]
    Info(commands::info::InfoArgs),
    /// Print or save the default service config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        #[cfg(feature = "ffmpeg")]
        Commands::Enhance(args) => commands::enhance::run(args),
        Commands::Still(args) => commands::still::run(args),
        #[cfg(feature = "ffmpeg")]
        Commands::Info(args) => commands::info::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
