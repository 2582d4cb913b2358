use clap::{Args, ValueEnum};
use vivid_core::pipeline::config::{EnhancementParams, ExecutionMode};

/// The five adjustment factors, shared by every command that enhances.
#[derive(Args, Clone, Debug)]
pub struct ParamArgs {
    /// Edge emphasis (1.0 = unchanged)
    #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
    pub sharpness: f32,

    /// Contrast around mid-gray (1.0 = unchanged)
    #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
    pub contrast: f32,

    /// Additive offset in 8-bit units (0 = unchanged)
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    pub brightness: f32,

    /// HSV saturation factor (1.0 = unchanged)
    #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
    pub saturation: f32,

    /// Chroma factor around luma (1.0 = unchanged)
    #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
    pub color_boost: f32,
}

impl ParamArgs {
    pub fn to_params(&self) -> EnhancementParams {
        EnhancementParams {
            sharpness: self.sharpness,
            contrast: self.contrast,
            brightness: self.brightness,
            saturation: self.saturation,
            color_boost: self.color_boost,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg {
    Auto,
    Sequential,
    Parallel,
}

impl From<ModeArg> for ExecutionMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Auto => ExecutionMode::Auto,
            ModeArg::Sequential => ExecutionMode::Sequential,
            ModeArg::Parallel => ExecutionMode::Parallel,
        }
    }
}

