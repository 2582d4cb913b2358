use std::sync::atomic::{AtomicUsize, Ordering};

use image::RgbImage;
use rayon::prelude::*;
use tracing::debug;

use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::enhance::enhance_rgb;
use crate::error::Result;

use super::config::{EnhancementParams, ExecutionMode};
use super::types::{PipelineStage, ProgressReporter};

fn use_parallel(mode: ExecutionMode, frame_count: usize) -> bool {
    match mode {
        ExecutionMode::Sequential => false,
        ExecutionMode::Parallel => true,
        ExecutionMode::Auto => frame_count >= PARALLEL_FRAME_THRESHOLD,
    }
}

/// Enhance every frame of a sequence, preserving count and order.
///
/// Fails on the first malformed frame; no partial result is returned.
pub fn enhance_frames(
    frames: &[RgbImage],
    params: &EnhancementParams,
    mode: ExecutionMode,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<RgbImage>> {
    params.validate()?;

    let total = frames.len();
    let parallel = use_parallel(mode, total);
    debug!(frames = total, parallel, "Enhancing frame sequence");

    reporter.begin_stage(PipelineStage::Enhancing, Some(total));
    let done = AtomicUsize::new(0);
    let enhance_one = |frame: &RgbImage| {
        let out = enhance_rgb(frame, params);
        reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
        out
    };

    let enhanced = if parallel {
        frames.par_iter().map(enhance_one).collect::<Result<Vec<_>>>()
    } else {
        frames.iter().map(enhance_one).collect::<Result<Vec<_>>>()
    }?;
    reporter.finish_stage();

    Ok(enhanced)
}
