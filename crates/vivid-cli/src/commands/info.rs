use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use vivid_core::io::{FfmpegAdapter, VideoAdapter};

use crate::summary::print_video_info;

#[derive(Args)]
pub struct InfoArgs {
    /// Input video file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let info = FfmpegAdapter::default().probe(&args.file)?;
    print_video_info(&info);
    Ok(())
}
