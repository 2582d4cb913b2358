use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Result;
use crate::frame::VideoStream;
use crate::io::{derive_output_path, ensure_distinct, ensure_readable, VideoAdapter};

use super::config::{
    EnhancementParams, EnhancementRequest, EnhancementResult, ExecutionMode, VividConfig,
};
use super::frames::enhance_frames;
use super::types::{NoOpReporter, PipelineStage, ProgressReporter};

/// Run one enhancement request end to end with a progress reporter.
///
/// Parameters and the input path are checked before anything is decoded, so
/// a rejected request never creates an output file.
pub fn run_enhancement_reported(
    request: &EnhancementRequest,
    adapter: &dyn VideoAdapter,
    config: &VividConfig,
    reporter: &dyn ProgressReporter,
) -> Result<EnhancementResult> {
    let output = derive_output_path(&request.video_path, &config.output);
    let written = enhance_video(
        &request.video_path,
        &output,
        &request.params,
        adapter,
        config.execution.mode,
        reporter,
    )?;
    Ok(EnhancementResult {
        output_video_path: written,
    })
}

/// Enhance `input` into an explicitly chosen `output` path.
///
/// `output` must not resolve to `input`; the source file is never written.
pub fn enhance_video(
    input: &Path,
    output: &Path,
    params: &EnhancementParams,
    adapter: &dyn VideoAdapter,
    mode: ExecutionMode,
    reporter: &dyn ProgressReporter,
) -> Result<PathBuf> {
    params.validate()?;
    ensure_readable(input)?;
    ensure_distinct(input, output)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        %params,
        "Starting enhancement"
    );

    reporter.begin_stage(PipelineStage::Demuxing, None);
    let stream = adapter.demux(input)?;
    reporter.finish_stage();
    info!(
        frames = stream.frame_count(),
        frame_rate = %stream.frame_rate,
        has_audio = stream.audio.is_some(),
        "Decoded input"
    );
    let VideoStream {
        frames,
        frame_rate,
        audio,
    } = stream;
    if params.is_identity() {
        warn!("All parameters are at their defaults; output will match the input frames");
    }

    let enhanced_frames = enhance_frames(&frames, params, mode, reporter)?;
    drop(frames);
    let enhanced = VideoStream {
        frames: enhanced_frames,
        frame_rate,
        audio,
    };

    reporter.begin_stage(PipelineStage::Remuxing, None);
    let written = adapter.remux(&enhanced, output)?;
    reporter.finish_stage();

    info!(output = %written.display(), "Enhancement complete");
    Ok(written)
}

/// Run one enhancement request end to end.
pub fn run_enhancement(
    request: &EnhancementRequest,
    adapter: &dyn VideoAdapter,
    config: &VividConfig,
) -> Result<EnhancementResult> {
    run_enhancement_reported(request, adapter, config, &NoOpReporter)
}
