//! Generic animated-raster strategy.
//!
//! Multi-frame raster formats (GIF, APNG, and animated WebP when routed
//! here by an explicit override) expose per-frame delays through the
//! [`image`] crate's [`AnimationDecoder`] machinery. This strategy
//! enumerates frames, accumulates their durations, and hands the distinct
//! nonzero values to the rational duration algebra.
//!
//! Decode failures degrade to the static-image record — a raster file that
//! cannot be enumerated is indistinguishable, timing-wise, from a single
//! still frame. Only failing to *read* the source at all is an error.

use std::io::Cursor;

use image::codecs::gif::GifDecoder;
use image::codecs::png::PngDecoder;
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, Frames, ImageDecoder, ImageFormat, ImageReader};

use crate::algebra::apparent_fps;
use crate::error::ProbeError;
use crate::record::TimingRecord;
use crate::source::MediaSource;

/// Per-frame delay assumed when the decoder reports none.
const DEFAULT_FRAME_DELAY_MS: f64 = 1000.0;

/// Codec identity and geometry as reported by the image decoding library.
#[derive(Debug, Clone)]
pub(crate) struct RasterIdentity {
    /// Lowercase codec name. PNG/APNG ambiguity is resolved through the
    /// decoder's own animation flag, never the file extension.
    pub codec: String,
    /// Pixel dimensions.
    pub width: u32,
    pub height: u32,
}

/// Extract normalized timing by enumerating frames.
///
/// Zero- or single-frame media yields the static-image record regardless of
/// any delay metadata present. Frames with no delay attribute count for
/// [`DEFAULT_FRAME_DELAY_MS`] each.
pub(crate) fn timing(source: &MediaSource) -> Result<TimingRecord, ProbeError> {
    let data = source.read()?;
    Ok(timing_from_bytes(&data))
}

/// Frame count fast path: enumerates frames without running the duration
/// algebra. Many callers only need the animated/non-animated predicate.
///
/// The decoding library exposes no frame-count metadata for these formats
/// (GIF has none to read, and the APNG control chunk is not surfaced), so
/// iterating the frames is the cheapest count available; only the
/// per-frame delay bookkeeping is skipped here.
pub(crate) fn frame_count(source: &MediaSource) -> Result<u64, ProbeError> {
    let data = source.read()?;
    let count = match animation_frames(&data) {
        Some(frames) => frames.take_while(|frame| frame.is_ok()).count() as u64,
        None => 0,
    };
    Ok(count.max(1))
}

/// Identify the codec and dimensions via the image library.
///
/// Returns `None` when the library does not recognize the bytes at all, so
/// the caller can fall through to the video-container path.
pub(crate) fn identify(source: &MediaSource) -> Result<Option<RasterIdentity>, ProbeError> {
    let data = source.read()?;

    let Ok(format) = image::guess_format(&data) else {
        return Ok(None);
    };

    let identity = match format {
        ImageFormat::Png => {
            let Ok(decoder) = PngDecoder::new(Cursor::new(data.as_ref())) else {
                return Ok(None);
            };
            let (width, height) = decoder.dimensions();
            // Animated and static PNG share a signature; the decoder's own
            // animation flag is the only reliable discriminator.
            let animated = decoder.is_apng().unwrap_or(false);
            RasterIdentity {
                codec: if animated { "apng".into() } else { "png".into() },
                width,
                height,
            }
        }
        other => {
            let Ok((width, height)) = ImageReader::with_format(
                Cursor::new(data.as_ref()),
                other,
            )
            .into_dimensions() else {
                return Ok(None);
            };
            RasterIdentity {
                codec: format_name(other).to_string(),
                width,
                height,
            }
        }
    };

    Ok(Some(identity))
}

/// Dimensions as reported by the image library, `(0, 0)` if undetermined.
pub(crate) fn dimensions(source: &MediaSource) -> Result<(u32, u32), ProbeError> {
    let data = source.read()?;
    Ok(ImageReader::new(Cursor::new(data.as_ref()))
        .with_guessed_format()
        .ok()
        .and_then(|reader| reader.into_dimensions().ok())
        .unwrap_or((0, 0)))
}

fn timing_from_bytes(data: &[u8]) -> TimingRecord {
    let Some(frames) = animation_frames(data) else {
        return TimingRecord::static_image();
    };

    let mut frame_count: u64 = 0;
    let mut total_ms: f64 = 0.0;
    let mut distinct: Vec<f64> = Vec::new();

    for frame in frames {
        let Ok(frame) = frame else {
            log::debug!("frame enumeration stopped early after {frame_count} frame(s)");
            break;
        };
        // An absent delay attribute decodes as zero; the display convention
        // for such frames is one second.
        let duration_ms = match frame.delay().numer_denom_ms() {
            (_, 0) | (0, _) => DEFAULT_FRAME_DELAY_MS,
            (numerator, denominator) => numerator as f64 / denominator as f64,
        };
        if !distinct.contains(&duration_ms) {
            distinct.push(duration_ms);
        }
        total_ms += duration_ms;
        frame_count += 1;
    }

    if frame_count <= 1 {
        return TimingRecord::static_image();
    }

    TimingRecord {
        fps: apparent_fps(&distinct, total_ms, frame_count),
        frames: frame_count,
        duration_ms: total_ms,
    }
}

/// Build a frame iterator for the formats that support animation.
///
/// Returns `None` for static formats, unrecognized bytes, and files whose
/// animation machinery refuses to initialize.
fn animation_frames(data: &[u8]) -> Option<Frames<'_>> {
    let format = image::guess_format(data).ok()?;
    match format {
        ImageFormat::Gif => {
            let decoder = GifDecoder::new(Cursor::new(data)).ok()?;
            Some(decoder.into_frames())
        }
        ImageFormat::Png => {
            let decoder = PngDecoder::new(Cursor::new(data)).ok()?;
            if !decoder.is_apng().ok()? {
                return None;
            }
            Some(decoder.apng().ok()?.into_frames())
        }
        ImageFormat::WebP => {
            let decoder = WebPDecoder::new(Cursor::new(data)).ok()?;
            if !decoder.has_animation() {
                return None;
            }
            Some(decoder.into_frames())
        }
        _ => None,
    }
}

fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Gif => "gif",
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::WebP => "webp",
        ImageFormat::Tiff => "tiff",
        ImageFormat::Bmp => "bmp",
        ImageFormat::Ico => "ico",
        ImageFormat::Avif => "avif",
        other => other.extensions_str().first().copied().unwrap_or(""),
    }
}
