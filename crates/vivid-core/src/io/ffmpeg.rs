//! FFmpeg-backed video adapter.
//!
//! Video is fully decoded to RGB24 frames; audio is carried as encoded
//! packets and stream-copied into the output without being decoded.

use std::ffi::CString;
use std::path::{Path, PathBuf};
use std::sync::Once;

use ffmpeg_next as ffmpeg;
use ffmpeg::format::Pixel;
use ffmpeg::software::scaling;
use ffmpeg::util::frame::video::Video as FfmpegFrame;
use ffmpeg::{codec, ffi, format, media, Dictionary, Packet, Rational, Rescale};
use image::RgbImage;
use tracing::{debug, info, warn};

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{Result, VividError};
use crate::frame::{AudioCodecInfo, AudioTrack, EncodedPacket, FrameRate, VideoInfo, VideoStream};
use crate::pipeline::config::EncoderConfig;

use super::adapter::{ensure_readable, VideoAdapter};

static FFMPEG_INIT: Once = Once::new();

/// Initialize FFmpeg once per process and silence its warning chatter.
fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg::init() {
            init_result = Err(VividError::UnsupportedFormat(format!(
                "FFmpeg initialization failed: {e}"
            )));
            return;
        }

        // SAFETY: av_log_set_level only touches FFmpeg's global log level.
        unsafe {
            ffi::av_log_set_level(ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

fn unsupported(path: &Path, what: &str, e: impl std::fmt::Display) -> VividError {
    VividError::UnsupportedFormat(format!("{}: {what}: {e}", path.display()))
}

/// Demuxes/decodes with FFmpeg and re-encodes with the configured encoder.
#[derive(Clone, Debug, Default)]
pub struct FfmpegAdapter {
    encoder: EncoderConfig,
}

impl FfmpegAdapter {
    pub fn new(encoder: EncoderConfig) -> Self {
        Self { encoder }
    }
}

impl VideoAdapter for FfmpegAdapter {
    fn demux(&self, path: &Path) -> Result<VideoStream> {
        ensure_readable(path)?;
        init_ffmpeg()?;

        let mut ictx = format::input(&path).map_err(|e| unsupported(path, "open", e))?;

        let (video_index, frame_rate, video_tb, mut video_start, mut decoder) = {
            let video = ictx
                .streams()
                .best(media::Type::Video)
                .ok_or_else(|| unsupported(path, "open", "no video stream"))?;
            let frame_rate = stream_frame_rate(&video)
                .ok_or_else(|| unsupported(path, "frame rate", "not reported by container"))?;
            let decoder = codec::context::Context::from_parameters(video.parameters())
                .and_then(|ctx| ctx.decoder().video())
                .map_err(|e| unsupported(path, "video decoder", e))?;
            let start = Some(video.start_time()).filter(|&t| t != ffi::AV_NOPTS_VALUE);
            (video.index(), frame_rate, video.time_base(), start, decoder)
        };

        let audio = ictx
            .streams()
            .best(media::Type::Audio)
            .map(|stream| (stream.index(), stream.time_base(), audio_codec_info(&stream)));

        let (width, height) = (decoder.width(), decoder.height());
        if width == 0 || height == 0 {
            return Err(unsupported(
                path,
                "video decoder",
                format!("invalid dimensions {width}x{height}"),
            ));
        }

        let mut scaler = scaling::Context::get(
            decoder.format(),
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            scaling::Flags::BILINEAR,
        )
        .map_err(|e| unsupported(path, "scaler", e))?;

        info!(
            path = %path.display(),
            width,
            height,
            %frame_rate,
            has_audio = audio.is_some(),
            "Demuxing video"
        );

        let mut frames = Vec::new();
        let mut audio_packets = Vec::new();

        for (stream, packet) in ictx.packets() {
            if stream.index() == video_index {
                if video_start.is_none() {
                    video_start = packet.pts().or(packet.dts());
                }
                decoder
                    .send_packet(&packet)
                    .map_err(|e| unsupported(path, "decode", e))?;
                drain_decoder(&mut decoder, &mut scaler, &mut frames)
                    .map_err(|e| unsupported(path, "decode", e))?;
            } else if audio.as_ref().is_some_and(|(idx, ..)| *idx == stream.index()) {
                audio_packets.push(to_encoded_packet(&packet));
            }
        }

        decoder
            .send_eof()
            .map_err(|e| unsupported(path, "decode", e))?;
        drain_decoder(&mut decoder, &mut scaler, &mut frames)
            .map_err(|e| unsupported(path, "decode", e))?;

        if frames.is_empty() {
            return Err(unsupported(path, "decode", "no frames decoded"));
        }

        // Output video starts at zero, so audio is moved by the same amount.
        let audio = audio.map(|(_, audio_tb, codec)| {
            let offset = video_start.map_or(0, |start| start.rescale(video_tb, audio_tb));
            shift_timestamps(&mut audio_packets, offset);
            AudioTrack {
                codec,
                packets: audio_packets,
            }
        });

        debug!(
            frames = frames.len(),
            audio_packets = audio.as_ref().map_or(0, |a| a.packets.len()),
            video_start = video_start.unwrap_or(0),
            "Demux complete"
        );

        Ok(VideoStream {
            frames,
            frame_rate,
            audio,
        })
    }

    fn remux(&self, stream: &VideoStream, output_path: &Path) -> Result<PathBuf> {
        init_ffmpeg()?;

        let dir = output_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let suffix = output_path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        // Encode next to the destination, then rename into place.
        let tmp = tempfile::Builder::new()
            .prefix(".vivid-")
            .suffix(&suffix)
            .tempfile_in(dir)
            .map_err(|e| VividError::output_write(output_path, e))?
            .into_temp_path();

        self.write_container(stream, &tmp).map_err(|e| match e {
            VividError::OutputWrite { reason, .. } => {
                VividError::output_write(output_path, reason)
            }
            other => other,
        })?;

        tmp.persist(output_path)
            .map_err(|e| VividError::output_write(output_path, e.error))?;

        info!(
            path = %output_path.display(),
            frames = stream.frame_count(),
            "Wrote enhanced video"
        );
        Ok(output_path.to_path_buf())
    }

    fn probe(&self, path: &Path) -> Result<VideoInfo> {
        ensure_readable(path)?;
        init_ffmpeg()?;

        let ictx = format::input(&path).map_err(|e| unsupported(path, "open", e))?;
        let video = ictx
            .streams()
            .best(media::Type::Video)
            .ok_or_else(|| unsupported(path, "open", "no video stream"))?;

        let decoder = codec::context::Context::from_parameters(video.parameters())
            .and_then(|ctx| ctx.decoder().video())
            .map_err(|e| unsupported(path, "video decoder", e))?;

        let frame_rate = stream_frame_rate(&video).unwrap_or(FrameRate::new(0, 1));

        let duration_secs = if video.duration() > 0 {
            let tb = video.time_base();
            video.duration() as f64 * f64::from(tb.numerator()) / f64::from(tb.denominator())
        } else if ictx.duration() > 0 {
            ictx.duration() as f64 / f64::from(ffi::AV_TIME_BASE)
        } else {
            0.0
        };

        let frame_count = if video.frames() > 0 {
            video.frames() as u64
        } else {
            (duration_secs * frame_rate.as_f64()).round() as u64
        };

        let audio_codec = ictx
            .streams()
            .best(media::Type::Audio)
            .map(|s| s.parameters().id().name().to_string());

        Ok(VideoInfo {
            path: path.to_path_buf(),
            width: decoder.width(),
            height: decoder.height(),
            frame_rate,
            frame_count,
            duration_secs,
            video_codec: video.parameters().id().name().to_string(),
            audio_codec,
        })
    }
}

impl FfmpegAdapter {
    /// Encode all frames and copy the audio track into a new container at `path`.
    fn write_container(&self, stream: &VideoStream, path: &Path) -> Result<()> {
        let write_err = |e: &dyn std::fmt::Display| VividError::output_write(path, e);

        let (width, height) = stream
            .dimensions()
            .ok_or_else(|| VividError::MalformedFrame("no frames to encode".to_string()))?;
        if width % 2 != 0 || height % 2 != 0 {
            return Err(VividError::UnsupportedFormat(format!(
                "yuv420p output requires even dimensions, got {width}x{height}"
            )));
        }
        if !stream.frame_rate.is_valid() {
            return Err(VividError::UnsupportedFormat(format!(
                "invalid frame rate {}/{}",
                stream.frame_rate.num, stream.frame_rate.den
            )));
        }

        let mut octx = format::output(&path)
            .map_err(|e| VividError::UnsupportedFormat(format!("output container: {e}")))?;
        let global_header = octx
            .format()
            .flags()
            .contains(format::Flags::GLOBAL_HEADER);

        let codec = find_video_encoder(&self.encoder.codec)?;
        let encoder_tb = Rational::new(stream.frame_rate.den, stream.frame_rate.num);

        let mut encoder = codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()
            .map_err(|e| write_err(&e))?;
        encoder.set_width(width);
        encoder.set_height(height);
        encoder.set_format(Pixel::YUV420P);
        encoder.set_time_base(encoder_tb);
        encoder.set_frame_rate(Some(Rational::new(
            stream.frame_rate.num,
            stream.frame_rate.den,
        )));
        if global_header {
            encoder.set_flags(codec::Flags::GLOBAL_HEADER);
        }

        let mut opts = Dictionary::new();
        if matches!(codec.id(), codec::Id::H264 | codec::Id::HEVC) {
            opts.set("crf", &self.encoder.crf.to_string());
            opts.set("preset", &self.encoder.preset);
        }
        opts.set("threads", &self.encoder.threads.to_string());

        let mut encoder = encoder.open_with(opts).map_err(|e| {
            VividError::UnsupportedFormat(format!("open encoder {}: {e}", codec.name()))
        })?;

        let video_index = {
            let mut ost = octx.add_stream(codec).map_err(|e| write_err(&e))?;
            ost.set_parameters(&encoder);
            ost.set_time_base(encoder_tb);
            ost.index()
        };

        let audio_out = match &stream.audio {
            Some(track) => {
                let params = audio_parameters(&track.codec)?;
                let mut ost = octx
                    .add_stream(ffmpeg::encoder::find(codec::Id::None))
                    .map_err(|e| write_err(&e))?;
                ost.set_parameters(params);
                // SAFETY: clearing the tag lets the muxer pick one valid for its container.
                unsafe {
                    (*ost.parameters().as_mut_ptr()).codec_tag = 0;
                }
                let (num, den) = track.codec.time_base;
                ost.set_time_base(Rational::new(num, den));
                Some((ost.index(), track))
            }
            None => None,
        };

        octx.write_header().map_err(|e| write_err(&e))?;

        let stream_tb = |index: usize| {
            octx.stream(index)
                .map(|s| s.time_base())
                .unwrap_or(encoder_tb)
        };
        let video_tb = stream_tb(video_index);

        debug!(
            codec = codec.name(),
            width,
            height,
            frames = stream.frame_count(),
            "Encoding video"
        );

        let mut queue: Vec<(f64, Packet)> = Vec::new();
        let mut scaler = scaling::Context::get(
            Pixel::RGB24,
            width,
            height,
            Pixel::YUV420P,
            width,
            height,
            scaling::Flags::BILINEAR,
        )
        .map_err(|e| write_err(&e))?;

        for (i, img) in stream.frames.iter().enumerate() {
            if img.dimensions() != (width, height) {
                return Err(VividError::MalformedFrame(format!(
                    "frame {i} is {}x{}, expected {width}x{height}",
                    img.width(),
                    img.height()
                )));
            }
            let mut rgb = FfmpegFrame::new(Pixel::RGB24, width, height);
            copy_into_frame(img, &mut rgb);

            let mut yuv = FfmpegFrame::empty();
            scaler.run(&rgb, &mut yuv).map_err(|e| write_err(&e))?;
            yuv.set_pts(Some(i as i64));

            encoder.send_frame(&yuv).map_err(|e| write_err(&e))?;
            drain_encoder(&mut encoder, video_index, encoder_tb, video_tb, &mut queue);
        }
        encoder.send_eof().map_err(|e| write_err(&e))?;
        drain_encoder(&mut encoder, video_index, encoder_tb, video_tb, &mut queue);

        if let Some((audio_index, track)) = audio_out {
            let (num, den) = track.codec.time_base;
            let source_tb = Rational::new(num, den);
            let out_tb = stream_tb(audio_index);
            for p in &track.packets {
                let mut packet = Packet::copy(&p.data);
                packet.set_pts(p.pts);
                packet.set_dts(p.dts);
                packet.set_duration(p.duration);
                if p.is_key {
                    packet.set_flags(codec::packet::Flags::KEY);
                }
                packet.set_stream(audio_index);
                packet.rescale_ts(source_tb, out_tb);
                queue.push((packet_seconds(&packet, out_tb), packet));
            }
        }

        queue.sort_by(|a, b| a.0.total_cmp(&b.0));
        for (_, packet) in queue {
            packet
                .write_interleaved(&mut octx)
                .map_err(|e| write_err(&e))?;
        }

        octx.write_trailer().map_err(|e| write_err(&e))?;
        Ok(())
    }
}

/// Resolve the configured encoder, falling back to any H.264 encoder, then MPEG-4.
fn find_video_encoder(name: &str) -> Result<codec::Codec> {
    if let Some(codec) = ffmpeg::encoder::find_by_name(name) {
        return Ok(codec);
    }
    warn!(requested = name, "Encoder not available, falling back");
    ffmpeg::encoder::find(codec::Id::H264)
        .or_else(|| ffmpeg::encoder::find(codec::Id::MPEG4))
        .ok_or_else(|| {
            VividError::UnsupportedFormat(format!("no usable video encoder ({name})"))
        })
}

fn stream_frame_rate(stream: &format::stream::Stream) -> Option<FrameRate> {
    [stream.avg_frame_rate(), stream.rate()]
        .into_iter()
        .map(|r| FrameRate::new(r.numerator(), r.denominator()))
        .find(FrameRate::is_valid)
}

fn audio_codec_info(stream: &format::stream::Stream) -> AudioCodecInfo {
    let params = stream.parameters();
    let tb = stream.time_base();

    // SAFETY: `params` wraps the stream's live codec parameters; fields are
    // read only and extradata is copied out within its reported length.
    let (sample_rate, channels, bit_rate, frame_size, extradata) = unsafe {
        let p = params.as_ptr();
        let extradata = if (*p).extradata.is_null() || (*p).extradata_size <= 0 {
            Vec::new()
        } else {
            std::slice::from_raw_parts((*p).extradata, (*p).extradata_size as usize).to_vec()
        };
        (
            (*p).sample_rate.max(0) as u32,
            (*p).ch_layout.nb_channels.max(0) as u16,
            (*p).bit_rate,
            (*p).frame_size.max(0) as u32,
            extradata,
        )
    };

    AudioCodecInfo {
        codec_name: params.id().name().to_string(),
        sample_rate,
        channels,
        bit_rate,
        frame_size,
        time_base: (tb.numerator(), tb.denominator()),
        extradata,
    }
}

/// Rebuild codec parameters for a stream-copied audio track.
fn audio_parameters(info: &AudioCodecInfo) -> Result<codec::Parameters> {
    let name = CString::new(info.codec_name.as_str())
        .map_err(|_| VividError::UnsupportedFormat(format!("audio codec {:?}", info.codec_name)))?;
    let mut params = codec::Parameters::new();

    // SAFETY: `params` owns a freshly allocated AVCodecParameters; extradata is
    // allocated with av_mallocz so FFmpeg frees it with the parameters.
    unsafe {
        let descriptor = ffi::avcodec_descriptor_get_by_name(name.as_ptr());
        if descriptor.is_null() {
            return Err(VividError::UnsupportedFormat(format!(
                "unknown audio codec {}",
                info.codec_name
            )));
        }

        let p = params.as_mut_ptr();
        (*p).codec_type = ffi::AVMediaType::AVMEDIA_TYPE_AUDIO;
        (*p).codec_id = (*descriptor).id;
        (*p).sample_rate = info.sample_rate as i32;
        (*p).bit_rate = info.bit_rate;
        (*p).frame_size = info.frame_size as i32;
        ffi::av_channel_layout_default(&mut (*p).ch_layout, i32::from(info.channels));

        if !info.extradata.is_empty() {
            let len = info.extradata.len();
            let buf =
                ffi::av_mallocz(len + ffi::AV_INPUT_BUFFER_PADDING_SIZE as usize) as *mut u8;
            if !buf.is_null() {
                std::ptr::copy_nonoverlapping(info.extradata.as_ptr(), buf, len);
                (*p).extradata = buf;
                (*p).extradata_size = len as i32;
            }
        }
    }

    Ok(params)
}

fn to_encoded_packet(packet: &Packet) -> EncodedPacket {
    EncodedPacket {
        data: packet.data().map(<[u8]>::to_vec).unwrap_or_default(),
        pts: packet.pts(),
        dts: packet.dts(),
        duration: packet.duration(),
        is_key: packet.is_key(),
    }
}

/// Move every packet timestamp `offset` units earlier.
fn shift_timestamps(packets: &mut [EncodedPacket], offset: i64) {
    if offset == 0 {
        return;
    }
    for p in packets {
        p.pts = p.pts.map(|t| t - offset);
        p.dts = p.dts.map(|t| t - offset);
    }
}

/// Pull every ready frame out of the decoder as packed RGB24.
fn drain_decoder(
    decoder: &mut ffmpeg::decoder::Video,
    scaler: &mut scaling::Context,
    frames: &mut Vec<RgbImage>,
) -> std::result::Result<(), ffmpeg::Error> {
    let mut decoded = FfmpegFrame::empty();
    while decoder.receive_frame(&mut decoded).is_ok() {
        let mut rgb = FfmpegFrame::empty();
        scaler.run(&decoded, &mut rgb)?;
        frames.push(copy_from_frame(&rgb));
    }
    Ok(())
}

/// Pull every ready packet out of the encoder, stamped for the output stream.
fn drain_encoder(
    encoder: &mut ffmpeg::encoder::video::Encoder,
    stream_index: usize,
    encoder_tb: Rational,
    stream_tb: Rational,
    queue: &mut Vec<(f64, Packet)>,
) {
    loop {
        let mut packet = Packet::empty();
        if encoder.receive_packet(&mut packet).is_err() {
            break;
        }
        packet.set_stream(stream_index);
        packet.rescale_ts(encoder_tb, stream_tb);
        queue.push((packet_seconds(&packet, stream_tb), packet));
    }
}

fn packet_seconds(packet: &Packet, tb: Rational) -> f64 {
    let ts = packet.dts().or(packet.pts()).unwrap_or(0);
    ts as f64 * f64::from(tb.numerator()) / f64::from(tb.denominator())
}

/// Copy a packed RGB24 frame into an image, dropping row padding.
fn copy_from_frame(frame: &FfmpegFrame) -> RgbImage {
    let (width, height) = (frame.width(), frame.height());
    let row_bytes = width as usize * COLOR_CHANNEL_COUNT;
    let stride = frame.stride(0);
    let data = frame.data(0);

    let mut img = RgbImage::new(width, height);
    for (y, dst) in img.chunks_exact_mut(row_bytes).enumerate() {
        let start = y * stride;
        dst.copy_from_slice(&data[start..start + row_bytes]);
    }
    img
}

/// Copy an image into a pre-allocated packed RGB24 frame, honoring stride.
fn copy_into_frame(img: &RgbImage, frame: &mut FfmpegFrame) {
    let row_bytes = img.width() as usize * COLOR_CHANNEL_COUNT;
    let stride = frame.stride(0);
    let data = frame.data_mut(0);

    for (y, src) in img.as_raw().chunks_exact(row_bytes).enumerate() {
        let start = y * stride;
        data[start..start + row_bytes].copy_from_slice(src);
    }
}
