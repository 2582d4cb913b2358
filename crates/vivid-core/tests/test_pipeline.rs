mod common;

use std::sync::atomic::Ordering;

use vivid_core::enhance::enhance_rgb;
use vivid_core::error::{ErrorKind, VividError};
use vivid_core::frame::FrameRate;
use vivid_core::pipeline::config::{
    EnhancementParams, EnhancementRequest, ExecutionMode, VividConfig,
};
use vivid_core::pipeline::{
    enhance_frames, enhance_video, run_enhancement, run_enhancement_reported, NoOpReporter,
};

use common::{sample_audio, sample_stream, touch, InMemoryAdapter, RecordingReporter};

fn tuned() -> EnhancementParams {
    EnhancementParams {
        sharpness: 1.5,
        contrast: 1.2,
        brightness: 10.0,
        saturation: 1.3,
        color_boost: 1.1,
    }
}

// ---------------------------------------------------------------------------
// enhance_frames
// ---------------------------------------------------------------------------

#[test]
fn test_enhance_frames_preserves_count_and_order() {
    let stream = sample_stream(10, FrameRate::new(24, 1), None);
    let out = enhance_frames(&stream.frames, &tuned(), ExecutionMode::Auto, &NoOpReporter).unwrap();

    assert_eq!(out.len(), stream.frames.len());
    for (input, output) in stream.frames.iter().zip(out.iter()) {
        assert_eq!(*output, enhance_rgb(input, &tuned()).unwrap());
    }
}

#[test]
fn test_execution_modes_agree() {
    let stream = sample_stream(7, FrameRate::new(30, 1), None);
    let seq = enhance_frames(
        &stream.frames,
        &tuned(),
        ExecutionMode::Sequential,
        &NoOpReporter,
    )
    .unwrap();
    let par = enhance_frames(
        &stream.frames,
        &tuned(),
        ExecutionMode::Parallel,
        &NoOpReporter,
    )
    .unwrap();
    assert_eq!(seq, par);
}

#[test]
fn test_enhance_frames_empty_sequence() {
    let out = enhance_frames(&[], &tuned(), ExecutionMode::Auto, &NoOpReporter).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_enhance_frames_fails_on_malformed_frame() {
    let mut stream = sample_stream(5, FrameRate::new(24, 1), None);
    stream.frames[3] = image::RgbImage::new(0, 0);
    for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
        let err = enhance_frames(&stream.frames, &tuned(), mode, &NoOpReporter).unwrap_err();
        assert!(matches!(err, VividError::MalformedFrame(_)));
    }
}

#[test]
fn test_enhance_frames_reports_progress() {
    let stream = sample_stream(6, FrameRate::new(24, 1), None);
    let reporter = RecordingReporter::default();
    enhance_frames(&stream.frames, &tuned(), ExecutionMode::Parallel, &reporter).unwrap();

    assert_eq!(reporter.max_done.load(Ordering::SeqCst), 6);
    let events = reporter.events.lock().unwrap();
    assert_eq!(events.as_slice(), ["begin Enhancing Some(6)", "finish"]);
}

// ---------------------------------------------------------------------------
// run_enhancement
// ---------------------------------------------------------------------------

#[test]
fn test_run_enhancement_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = touch(dir.path(), "holiday.mp4");
    let audio = sample_audio();
    let adapter = InMemoryAdapter::new(sample_stream(10, FrameRate::new(24, 1), Some(audio.clone())));

    let request = EnhancementRequest::new(&input, tuned());
    let result = run_enhancement(&request, &adapter, &VividConfig::default()).unwrap();

    assert_eq!(result.output_video_path, dir.path().join("holiday_enhanced.mp4"));
    assert_ne!(result.output_video_path, input);
    assert!(result.output_video_path.exists());

    let remuxed = adapter.take_remuxed().expect("stream was remuxed");
    assert_eq!(remuxed.frame_count(), 10);
    assert_eq!(remuxed.frame_rate, FrameRate::new(24, 1));
    assert_eq!(remuxed.audio, Some(audio));
    assert_eq!(remuxed.dimensions(), Some((8, 6)));
    for (input, output) in adapter.stream.frames.iter().zip(remuxed.frames.iter()) {
        assert_eq!(*output, enhance_rgb(input, &tuned()).unwrap());
    }
}

#[test]
fn test_run_enhancement_without_audio() {
    let dir = tempfile::tempdir().unwrap();
    let input = touch(dir.path(), "silent.mkv");
    let adapter = InMemoryAdapter::new(sample_stream(3, FrameRate::new(30000, 1001), None));

    let request = EnhancementRequest::new(&input, tuned());
    let result = run_enhancement(&request, &adapter, &VividConfig::default()).unwrap();

    assert_eq!(result.output_video_path, dir.path().join("silent_enhanced.mkv"));
    let remuxed = adapter.take_remuxed().unwrap();
    assert!(remuxed.audio.is_none());
    assert_eq!(remuxed.frame_rate, FrameRate::new(30000, 1001));
}

#[test]
fn test_run_enhancement_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("nope.mp4");
    let adapter = InMemoryAdapter::new(sample_stream(2, FrameRate::new(24, 1), None));

    let request = EnhancementRequest::new(&input, tuned());
    let err = run_enhancement(&request, &adapter, &VividConfig::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InputNotFound);
    assert_eq!(adapter.demux_count(), 0);
    assert!(!dir.path().join("nope_enhanced.mp4").exists());
}

#[test]
fn test_run_enhancement_directory_is_not_input() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = InMemoryAdapter::new(sample_stream(2, FrameRate::new(24, 1), None));

    let request = EnhancementRequest::new(dir.path(), tuned());
    let err = run_enhancement(&request, &adapter, &VividConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputNotFound);
}

#[test]
fn test_run_enhancement_rejects_nan_before_decoding() {
    let dir = tempfile::tempdir().unwrap();
    let input = touch(dir.path(), "clip.mp4");
    let adapter = InMemoryAdapter::new(sample_stream(2, FrameRate::new(24, 1), None));

    let request = EnhancementRequest::new(
        &input,
        EnhancementParams {
            saturation: f32::NAN,
            ..tuned()
        },
    );
    let err = run_enhancement(&request, &adapter, &VividConfig::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ProcessingError);
    assert_eq!(adapter.demux_count(), 0);
    assert!(adapter.take_remuxed().is_none());
}

#[test]
fn test_run_enhancement_malformed_frame_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = touch(dir.path(), "broken.mp4");
    let mut stream = sample_stream(4, FrameRate::new(24, 1), None);
    stream.frames[1] = image::RgbImage::new(0, 0);
    let adapter = InMemoryAdapter::new(stream);

    let request = EnhancementRequest::new(&input, tuned());
    let err = run_enhancement(&request, &adapter, &VividConfig::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ProcessingError);
    assert!(adapter.take_remuxed().is_none());
    assert!(!dir.path().join("broken_enhanced.mp4").exists());
}

#[test]
fn test_run_enhancement_remux_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = touch(dir.path(), "clip.mp4");
    let adapter = InMemoryAdapter::failing_remux(sample_stream(2, FrameRate::new(24, 1), None));

    let request = EnhancementRequest::new(&input, tuned());
    let err = run_enhancement(&request, &adapter, &VividConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutputWriteError);
}

#[test]
fn test_run_enhancement_custom_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let input = touch(dir.path(), "clip.mov");
    let adapter = InMemoryAdapter::new(sample_stream(2, FrameRate::new(24, 1), None));

    let mut config = VividConfig::default();
    config.output.suffix = ".vivid".to_string();
    let request = EnhancementRequest::new(&input, tuned());
    let result = run_enhancement(&request, &adapter, &config).unwrap();
    assert_eq!(result.output_video_path, dir.path().join("clip.vivid.mov"));
}

#[test]
fn test_run_enhancement_reports_stages_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = touch(dir.path(), "clip.mp4");
    let adapter = InMemoryAdapter::new(sample_stream(5, FrameRate::new(24, 1), None));
    let reporter = RecordingReporter::default();

    let request = EnhancementRequest::new(&input, tuned());
    run_enhancement_reported(&request, &adapter, &VividConfig::default(), &reporter).unwrap();

    let events = reporter.events.lock().unwrap();
    assert_eq!(
        events.as_slice(),
        [
            "begin Demuxing None",
            "finish",
            "begin Enhancing Some(5)",
            "finish",
            "begin Remuxing None",
            "finish",
        ]
    );
}

#[test]
fn test_enhance_video_explicit_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = touch(dir.path(), "clip.mp4");
    let output = dir.path().join("elsewhere.mp4");
    let adapter = InMemoryAdapter::new(sample_stream(3, FrameRate::new(25, 1), None));

    let written = enhance_video(
        &input,
        &output,
        &tuned(),
        &adapter,
        ExecutionMode::Sequential,
        &NoOpReporter,
    )
    .unwrap();

    assert_eq!(written, output);
    assert!(output.exists());
    assert_eq!(adapter.take_remuxed().unwrap().frame_count(), 3);
}

#[test]
fn test_empty_suffix_would_overwrite_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = touch(dir.path(), "clip.mp4");
    let adapter = InMemoryAdapter::new(sample_stream(2, FrameRate::new(24, 1), None));

    let mut config = VividConfig::default();
    config.output.suffix = String::new();
    let request = EnhancementRequest::new(&input, tuned());
    let err = run_enhancement(&request, &adapter, &config).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OutputWriteError);
    assert_eq!(adapter.demux_count(), 0);
    assert!(adapter.take_remuxed().is_none());
    assert_eq!(std::fs::read(&input).unwrap(), b"not really a video");
}

#[test]
fn test_enhance_video_refuses_input_as_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = touch(dir.path(), "clip.mp4");
    let adapter = InMemoryAdapter::new(sample_stream(2, FrameRate::new(24, 1), None));
    let same = dir.path().join(".").join("clip.mp4");

    let err = enhance_video(
        &input,
        &same,
        &tuned(),
        &adapter,
        ExecutionMode::Sequential,
        &NoOpReporter,
    )
    .unwrap_err();

    assert!(matches!(err, VividError::OutputWrite { .. }));
    assert_eq!(adapter.demux_count(), 0);
    assert_eq!(std::fs::read(&input).unwrap(), b"not really a video");
}
