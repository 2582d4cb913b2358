use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vivid_core::io::{derive_output_path, FfmpegAdapter};
use vivid_core::pipeline::config::VividConfig;
use vivid_core::pipeline::enhance_video;

use super::params::{ModeArg, ParamArgs};
use crate::progress::BarReporter;
use crate::summary::print_enhance_summary;

#[derive(Args)]
pub struct EnhanceArgs {
    /// Input video file
    pub file: PathBuf,

    #[command(flatten)]
    pub params: ParamArgs,

    /// Service config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Frame scheduling, overriding the config file
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Output file path (default: <stem>_enhanced.<ext> next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &EnhanceArgs) -> Result<()> {
    let mut config = VividConfig::load_or_default(args.config.as_deref())?;
    if let Some(mode) = args.mode {
        config.execution.mode = mode.into();
    }

    let params = args.params.to_params();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| derive_output_path(&args.file, &config.output));

    print_enhance_summary(&args.file, &output, &params, &config);

    let adapter = FfmpegAdapter::new(config.encoder.clone());
    let reporter = BarReporter::default();
    let written = enhance_video(
        &args.file,
        &output,
        &params,
        &adapter,
        config.execution.mode,
        &reporter,
    )
    .with_context(|| format!("Failed to enhance {}", args.file.display()))?;

    println!("Saved to {}", written.display());
    Ok(())
}
