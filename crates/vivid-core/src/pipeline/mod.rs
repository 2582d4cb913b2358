pub mod config;
mod frames;
mod orchestrator;
mod types;

pub use frames::enhance_frames;
pub use orchestrator::{enhance_video, run_enhancement, run_enhancement_reported};
pub use types::{NoOpReporter, PipelineStage, ProgressReporter};
