use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vivid_core::enhance::enhance_frame;
use vivid_core::io::image_io::{load_color_image, save_color_image};

use super::params::ParamArgs;
use crate::summary::print_still_summary;

#[derive(Args)]
pub struct StillArgs {
    /// Input image file (PNG, JPEG, TIFF, ...)
    pub file: PathBuf,

    #[command(flatten)]
    pub params: ParamArgs,

    /// Output file path (.tif/.tiff writes 16-bit, anything else 8-bit)
    #[arg(short, long, default_value = "enhanced.png")]
    pub output: PathBuf,
}

pub fn run(args: &StillArgs) -> Result<()> {
    let params = args.params.to_params();
    print_still_summary(&args.file, &args.output, &params);

    let frame = load_color_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let enhanced = enhance_frame(&frame, &params)?;
    save_color_image(&enhanced, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    println!("Saved to {}", args.output.display());
    Ok(())
}
