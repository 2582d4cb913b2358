pub mod config;
#[cfg(feature = "ffmpeg")]
pub mod enhance;
#[cfg(feature = "ffmpeg")]
pub mod info;
pub mod params;
pub mod still;
