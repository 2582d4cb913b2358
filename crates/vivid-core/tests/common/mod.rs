#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use image::{Rgb, RgbImage};
use ndarray::Array2;

use vivid_core::error::{Result, VividError};
use vivid_core::frame::{
    AudioCodecInfo, AudioTrack, ColorFrame, EncodedPacket, Frame, FrameRate, VideoInfo,
    VideoStream,
};
use vivid_core::io::VideoAdapter;
use vivid_core::pipeline::{PipelineStage, ProgressReporter};

/// Uniform 8-bit RGB frame.
pub fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

/// Frame with a distinct value at every pixel.
pub fn gradient_frame(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 37 + y * 11) % 256) as u8,
            ((x * 5 + y * 53) % 256) as u8,
            ((x * 23 + y * 29 + 90) % 256) as u8,
        ])
    })
}

/// Normalized ColorFrame with uniform per-channel values.
pub fn uniform_color(h: usize, w: usize, r: f32, g: f32, b: f32) -> ColorFrame {
    ColorFrame {
        red: Frame::new(Array2::from_elem((h, w), r)),
        green: Frame::new(Array2::from_elem((h, w), g)),
        blue: Frame::new(Array2::from_elem((h, w), b)),
    }
}

/// A short AAC-like track of opaque packets.
pub fn sample_audio() -> AudioTrack {
    let packets = (0..5)
        .map(|i| EncodedPacket {
            data: vec![i as u8; 16 + i],
            pts: Some(i as i64 * 1024),
            dts: Some(i as i64 * 1024),
            duration: 1024,
            is_key: true,
        })
        .collect();
    AudioTrack {
        codec: AudioCodecInfo {
            codec_name: "aac".to_string(),
            sample_rate: 48_000,
            channels: 2,
            bit_rate: 128_000,
            frame_size: 1024,
            time_base: (1, 48_000),
            extradata: vec![0x11, 0x90],
        },
        packets,
    }
}

/// Video stream of `count` frames, each a different solid color.
pub fn sample_stream(count: usize, frame_rate: FrameRate, audio: Option<AudioTrack>) -> VideoStream {
    let frames = (0..count)
        .map(|i| solid_frame(8, 6, [(i * 20) as u8, 100, (250 - i * 20) as u8]))
        .collect();
    VideoStream {
        frames,
        frame_rate,
        audio,
    }
}

/// Adapter that hands out a fixed stream and captures what gets remuxed.
pub struct InMemoryAdapter {
    pub stream: VideoStream,
    pub fail_remux: bool,
    pub demux_calls: AtomicUsize,
    pub remuxed: Mutex<Option<VideoStream>>,
}

impl InMemoryAdapter {
    pub fn new(stream: VideoStream) -> Self {
        Self {
            stream,
            fail_remux: false,
            demux_calls: AtomicUsize::new(0),
            remuxed: Mutex::new(None),
        }
    }

    pub fn failing_remux(stream: VideoStream) -> Self {
        Self {
            fail_remux: true,
            ..Self::new(stream)
        }
    }

    pub fn demux_count(&self) -> usize {
        self.demux_calls.load(Ordering::SeqCst)
    }

    pub fn take_remuxed(&self) -> Option<VideoStream> {
        self.remuxed.lock().unwrap().take()
    }
}

impl VideoAdapter for InMemoryAdapter {
    fn demux(&self, _path: &Path) -> Result<VideoStream> {
        self.demux_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.stream.clone())
    }

    fn remux(&self, stream: &VideoStream, output_path: &Path) -> Result<PathBuf> {
        if self.fail_remux {
            return Err(VividError::OutputWrite {
                path: output_path.to_path_buf(),
                reason: "destination is read-only".to_string(),
            });
        }
        std::fs::write(output_path, b"in-memory container")?;
        *self.remuxed.lock().unwrap() = Some(stream.clone());
        Ok(output_path.to_path_buf())
    }

    fn probe(&self, path: &Path) -> Result<VideoInfo> {
        let (width, height) = self.stream.dimensions().unwrap_or((0, 0));
        Ok(VideoInfo {
            path: path.to_path_buf(),
            width,
            height,
            frame_rate: self.stream.frame_rate,
            frame_count: self.stream.frame_count() as u64,
            duration_secs: self.stream.frame_count() as f64 / self.stream.frame_rate.as_f64(),
            video_codec: "rawvideo".to_string(),
            audio_codec: self.stream.audio.as_ref().map(|a| a.codec.codec_name.clone()),
        })
    }
}

/// Records every reporter callback in order.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Mutex<Vec<String>>,
    pub max_done: AtomicUsize,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        self.events
            .lock()
            .unwrap()
            .push(format!("begin {stage:?} {total_items:?}"));
    }

    fn advance(&self, items_done: usize) {
        self.max_done.fetch_max(items_done, Ordering::SeqCst);
    }

    fn finish_stage(&self) {
        self.events.lock().unwrap().push("finish".to_string());
    }
}

/// Write a placeholder file standing in for an input video.
pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"not really a video").unwrap();
    path
}
