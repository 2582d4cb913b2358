use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BIND_ADDR, DEFAULT_CRF, DEFAULT_ENCODER_THREADS, DEFAULT_OUTPUT_EXTENSION,
    DEFAULT_OUTPUT_SUFFIX, DEFAULT_PRESET, DEFAULT_VIDEO_CODEC,
};
use crate::error::{Result, VividError};

fn default_one() -> f32 {
    1.0
}

fn default_zero() -> f32 {
    0.0
}

/// The five per-frame adjustment factors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnhancementParams {
    /// Edge emphasis (1.0 = no change, >1.0 = sharper).
    #[serde(default = "default_one")]
    pub sharpness: f32,
    /// Contrast around mid-gray (1.0 = no change, 0.0 = flat gray).
    #[serde(default = "default_one")]
    pub contrast: f32,
    /// Additive offset in 8-bit units (0.0 = no change).
    #[serde(default = "default_zero")]
    pub brightness: f32,
    /// HSV saturation factor (1.0 = no change).
    #[serde(default = "default_one")]
    pub saturation: f32,
    /// Chroma factor around luma (1.0 = no change).
    #[serde(default = "default_one")]
    pub color_boost: f32,
}

impl Default for EnhancementParams {
    fn default() -> Self {
        Self {
            sharpness: 1.0,
            contrast: 1.0,
            brightness: 0.0,
            saturation: 1.0,
            color_boost: 1.0,
        }
    }
}

impl EnhancementParams {
    /// Reject NaN and infinite factors.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("sharpness", self.sharpness),
            ("contrast", self.contrast),
            ("brightness", self.brightness),
            ("saturation", self.saturation),
            ("color_boost", self.color_boost),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(VividError::NonFiniteParameter { name, value });
            }
        }
        Ok(())
    }

    /// Whether every factor sits at its no-op value.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

impl std::fmt::Display for EnhancementParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "sharpness={}, contrast={}, brightness={}, saturation={}, color_boost={}",
            self.sharpness, self.contrast, self.brightness, self.saturation, self.color_boost
        )
    }
}

/// Body of an enhancement request: a video path plus the five factors at
/// the same level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnhancementRequest {
    pub video_path: PathBuf,
    #[serde(flatten)]
    pub params: EnhancementParams,
}

impl EnhancementRequest {
    pub fn new(video_path: impl Into<PathBuf>, params: EnhancementParams) -> Self {
        Self {
            video_path: video_path.into(),
            params,
        }
    }
}

/// Response of a successful enhancement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnhancementResult {
    pub output_video_path: PathBuf,
}

/// How the frame sequence is scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Parallel once the sequence reaches `PARALLEL_FRAME_THRESHOLD` frames.
    #[default]
    Auto,
    Sequential,
    Parallel,
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "Auto"),
            Self::Sequential => write!(f, "Sequential"),
            Self::Parallel => write!(f, "Parallel"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Inserted between the input file stem and its extension.
    pub suffix: String,
    /// Used when the input path has no extension.
    pub default_extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            default_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// FFmpeg encoder name, e.g. "libx264".
    pub codec: String,
    /// Constant rate factor (lower = higher quality).
    pub crf: u8,
    pub preset: String,
    pub threads: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            codec: DEFAULT_VIDEO_CODEC.to_string(),
            crf: DEFAULT_CRF,
            preset: DEFAULT_PRESET.to_string(),
            threads: DEFAULT_ENCODER_THREADS,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    pub mode: ExecutionMode,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

/// Service configuration, loaded once and passed explicitly to each request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VividConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub encoder: EncoderConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl VividConfig {
    /// Read and parse a TOML config file. Missing sections and keys keep
    /// their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let invalid = |reason: String| VividError::Config {
            path: path.to_path_buf(),
            reason,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        toml::from_str(&contents).map_err(|e| invalid(e.to_string()))
    }

    /// [`VividConfig::load`] when a path is given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
