use std::path::PathBuf;

use image::RgbImage;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// A single channel plane of an image.
/// Pixel values are f32, nominally in [0.0, 1.0].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
}

impl Frame {
    pub fn new(data: Array2<f32>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Color image composed of separate channel frames.
#[derive(Clone, Debug)]
pub struct ColorFrame {
    pub red: Frame,
    pub green: Frame,
    pub blue: Frame,
}

impl ColorFrame {
    pub fn width(&self) -> usize {
        self.red.width()
    }

    pub fn height(&self) -> usize {
        self.red.height()
    }

    /// All three planes share one non-empty shape.
    pub fn is_well_formed(&self) -> bool {
        let dim = self.red.data.dim();
        dim.0 > 0 && dim.1 > 0 && self.green.data.dim() == dim && self.blue.data.dim() == dim
    }
}

/// Video frame rate as an exact rational (frames per second = num / den).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRate {
    pub num: i32,
    pub den: i32,
}

impl FrameRate {
    pub fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    pub fn is_valid(&self) -> bool {
        self.num > 0 && self.den > 0
    }

    pub fn as_f64(&self) -> f64 {
        if self.den == 0 {
            0.0
        } else {
            self.num as f64 / self.den as f64
        }
    }
}

impl std::fmt::Display for FrameRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.den == 1 {
            write!(f, "{} fps", self.num)
        } else {
            write!(f, "{:.3} fps ({}/{})", self.as_f64(), self.num, self.den)
        }
    }
}

/// One compressed packet of a passthrough stream.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedPacket {
    pub data: Vec<u8>,
    pub pts: Option<i64>,
    pub dts: Option<i64>,
    pub duration: i64,
    pub is_key: bool,
}

/// Codec parameters needed to re-attach an audio stream without decoding it.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioCodecInfo {
    pub codec_name: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub bit_rate: i64,
    pub frame_size: u32,
    /// Stream time base as (numerator, denominator).
    pub time_base: (i32, i32),
    pub extradata: Vec<u8>,
}

/// An encoded audio track carried through the pipeline untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioTrack {
    pub codec: AudioCodecInfo,
    pub packets: Vec<EncodedPacket>,
}

/// Decoded video: ordered frames, their rate, and the passthrough audio.
#[derive(Clone, Debug)]
pub struct VideoStream {
    pub frames: Vec<RgbImage>,
    pub frame_rate: FrameRate,
    pub audio: Option<AudioTrack>,
}

impl VideoStream {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame dimensions (width, height), taken from the first frame.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.frames.first().map(|f| f.dimensions())
    }
}

/// Metadata about a video file, read without decoding frames.
#[derive(Clone, Debug, Serialize)]
pub struct VideoInfo {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub frame_rate: FrameRate,
    /// Container-reported frame count, or an estimate from duration.
    pub frame_count: u64,
    pub duration_secs: f64,
    pub video_codec: String,
    pub audio_codec: Option<String>,
}
