pub mod adapter;
#[cfg(feature = "ffmpeg")]
pub mod ffmpeg;
pub mod image_io;
pub mod output_path;

pub use adapter::{ensure_distinct, ensure_readable, VideoAdapter};
#[cfg(feature = "ffmpeg")]
pub use ffmpeg::FfmpegAdapter;
pub use output_path::derive_output_path;
