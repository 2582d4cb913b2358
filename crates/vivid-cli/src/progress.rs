use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use vivid_core::pipeline::{PipelineStage, ProgressReporter};

/// Drives one indicatif bar per pipeline stage.
///
/// Stages with a known item count get a bar; the others get a spinner.
#[derive(Default)]
pub struct BarReporter {
    current: Mutex<Option<ProgressBar>>,
}

fn stage_bar(stage: PipelineStage, total_items: Option<usize>) -> ProgressBar {
    let pb = match total_items {
        Some(total) => {
            let pb = ProgressBar::new(total as u64);
            if let Ok(style) = ProgressStyle::default_bar().template("{msg} [{bar:40}] {pos}/{len}")
            {
                pb.set_style(style.progress_chars("=> "));
            }
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        }
    };
    pb.set_message(stage.to_string());
    pb
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.take() {
                previous.finish_and_clear();
            }
            *current = Some(stage_bar(stage, total_items));
        }
    }

    fn advance(&self, items_done: usize) {
        if let Ok(current) = self.current.lock() {
            if let Some(pb) = current.as_ref() {
                if items_done as u64 > pb.position() {
                    pb.set_position(items_done as u64);
                }
            }
        }
    }

    fn finish_stage(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(pb) = current.take() {
                pb.finish();
            }
        }
    }
}
