//! Decode-fallback strategy for arbitrary video containers.
//!
//! Container metadata for frame count and frame rate is not reliable —
//! streams routinely declare a zero duration or a frame count of one while
//! holding hundreds of frames. This strategy prefers container-level
//! duration metadata when present and nonzero, and otherwise decodes frames
//! (optionally up to a bound) and extrapolates total duration from the last
//! presentation timestamp under a constant-spacing assumption.
//!
//! Every failure here is non-fatal: a container that cannot be opened or
//! holds no decodable video stream reports zero frames and zero duration
//! rather than erroring, since the facade always has a sane default for
//! this strategy.

use std::io::Write;

use ffmpeg_next::codec::context::Context as CodecContext;
use ffmpeg_next::format::context::Input;
use ffmpeg_next::frame::Video as VideoFrame;
use ffmpeg_next::media::Type;
use tempfile::NamedTempFile;

use crate::algebra::round_half_up;
use crate::error::ProbeError;
use crate::source::MediaSource;

/// Frames decoded when estimating fps cheaply.
pub(crate) const DEFAULT_FPS_PROBE_FRAMES: u64 = 10;

/// Frames decoded when only the animated/static predicate is needed.
pub(crate) const ANIMATION_CHECK_FRAMES: u64 = 2;

/// Count frames and derive a total duration in milliseconds.
///
/// `frames_to_iterate` bounds the decode; `frames_only` short-circuits on
/// the stream's own frame-count metadata when it is reliable (`> 1`).
/// Returns `(0, 0.0)` when the container cannot be opened or has no video
/// stream.
pub(crate) fn frames_duration(
    source: &MediaSource,
    frames_to_iterate: Option<u64>,
    frames_only: bool,
) -> (u64, f64) {
    match frames_duration_inner(source, frames_to_iterate, frames_only) {
        Ok(result) => result,
        Err(error) => {
            log::debug!("decode fallback degraded to empty result: {error}");
            (0, 0.0)
        }
    }
}

/// Stream dimensions as reported by the decoder, `(0, 0)` if undetermined.
pub(crate) fn resolution(source: &MediaSource) -> (u32, u32) {
    let probe = || -> Result<(u32, u32), ProbeError> {
        let (input, _spill) = open_input(source)?;
        let stream = input
            .streams()
            .best(Type::Video)
            .ok_or_else(|| ProbeError::Ffmpeg("no video stream".to_string()))?;
        let decoder = CodecContext::from_parameters(stream.parameters())?
            .decoder()
            .video()?;
        Ok((decoder.width(), decoder.height()))
    };
    probe().unwrap_or_else(|error| {
        log::debug!("resolution probe degraded: {error}");
        (0, 0)
    })
}

/// Best-video-stream codec name, lowercase. Empty if undetermined.
pub(crate) fn codec_name(source: &MediaSource) -> String {
    let probe = || -> Result<String, ProbeError> {
        let (input, _spill) = open_input(source)?;
        let stream = input
            .streams()
            .best(Type::Video)
            .ok_or_else(|| ProbeError::Ffmpeg("no video stream".to_string()))?;
        let decoder = CodecContext::from_parameters(stream.parameters())?
            .decoder()
            .video()?;
        Ok(decoder
            .codec()
            .map(|codec| codec.name().to_lowercase())
            .unwrap_or_default())
    };
    probe().unwrap_or_else(|error| {
        log::debug!("codec probe degraded: {error}");
        String::new()
    })
}

fn frames_duration_inner(
    source: &MediaSource,
    frames_to_iterate: Option<u64>,
    frames_only: bool,
) -> Result<(u64, f64), ProbeError> {
    let (mut input, _spill) = open_input(source)?;

    let (stream_index, time_base, metadata_frames) = {
        let stream = input
            .streams()
            .best(Type::Video)
            .ok_or_else(|| ProbeError::Ffmpeg("no video stream".to_string()))?;
        (
            stream.index(),
            stream.time_base(),
            stream.frames().max(0) as u64,
        )
    };

    // Container duration arrives in microseconds.
    let duration_microseconds = input.duration();
    let metadata_duration_ms = if duration_microseconds > 0 {
        round_half_up(duration_microseconds as f64 / 1000.0) as f64
    } else {
        0.0
    };

    if frames_only && metadata_frames > 1 {
        return Ok((metadata_frames, metadata_duration_ms));
    }

    let mut decoder = {
        let stream = input
            .streams()
            .best(Type::Video)
            .ok_or_else(|| ProbeError::Ffmpeg("no video stream".to_string()))?;
        CodecContext::from_parameters(stream.parameters())?
            .decoder()
            .video()?
    };

    let mut decoded_frame = VideoFrame::empty();
    let mut frame_count: u64 = 0;
    let mut last_pts: Option<i64> = None;
    let mut reached_bound = false;

    'demux: for (stream, packet) in input.packets() {
        if stream.index() != stream_index {
            continue;
        }
        if decoder.send_packet(&packet).is_err() {
            // A single corrupt packet should not abort the count.
            continue;
        }
        while decoder.receive_frame(&mut decoded_frame).is_ok() {
            frame_count += 1;
            if let Some(pts) = decoded_frame.pts() {
                last_pts = Some(pts);
            }
            if Some(frame_count) == frames_to_iterate {
                reached_bound = true;
                break 'demux;
            }
        }
    }

    // Flush the decoder unless the bound cut iteration short.
    if !reached_bound && decoder.send_eof().is_ok() {
        while decoder.receive_frame(&mut decoded_frame).is_ok() {
            frame_count += 1;
            if let Some(pts) = decoded_frame.pts() {
                last_pts = Some(pts);
            }
        }
    }

    if frame_count == 0 {
        return Ok((0, 0.0));
    }
    if frame_count <= 1 || metadata_duration_ms != 0.0 {
        return Ok((frame_count, metadata_duration_ms));
    }

    // No trustworthy metadata: extrapolate from the last presentation
    // timestamp instead.
    let Some(last_pts) = last_pts else {
        return Ok((frame_count, 0.0));
    };
    let time_base_ms =
        time_base.numerator() as f64 / time_base.denominator().max(1) as f64 * 1000.0;
    let duration_ms = extrapolated_duration_ms(frame_count, last_pts as f64 * time_base_ms);

    Ok((frame_count, duration_ms))
}

/// Total duration implied by the last frame's presentation time under a
/// constant-spacing assumption: `n` frames with the last displayed at `t` ms
/// are spaced `t / (n - 1)` ms apart, and the total spans `n` such gaps.
fn extrapolated_duration_ms(frame_count: u64, last_pts_ms: f64) -> f64 {
    if frame_count <= 1 {
        return 0.0;
    }
    let ms_per_frame = last_pts_ms / (frame_count - 1) as f64;
    (round_half_up(frame_count as f64 * ms_per_frame) as f64).max(0.0)
}

/// Open the source as an FFmpeg input context.
///
/// Buffer-based sources are spilled to a named temporary file whose guard is
/// returned alongside the context; the file is removed when the guard drops
/// at the end of the query.
fn open_input(source: &MediaSource) -> Result<(Input, Option<NamedTempFile>), ProbeError> {
    ffmpeg_next::init()?;

    match source.as_path() {
        Some(path) => {
            let input = ffmpeg_next::format::input(&path).map_err(|error| {
                ProbeError::FileOpen {
                    path: path.to_path_buf(),
                    reason: error.to_string(),
                }
            })?;
            Ok((input, None))
        }
        None => {
            let mut spill = NamedTempFile::new()?;
            spill.write_all(&source.read()?)?;
            spill.flush()?;
            let input = ffmpeg_next::format::input(&spill.path())?;
            Ok((input, Some(spill)))
        }
    }
}
