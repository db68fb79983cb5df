//! The introspection facade.
//!
//! [`MediaProbe`] dispatches every query to the extraction strategy selected
//! by the [`Strategy`](crate::Strategy) classifier, and each per-property
//! query independently re-dispatches to the *cheapest sufficient* probe —
//! asking for a frame count does not pay for a full decode when 2 frames
//! settle the question.
//!
//! The probe is stateless and `Send + Sync`: every query is a pure function
//! of the source bytes, there is no cache and no shared mutable state, so a
//! single probe can be used from parallel workers freely.
//!
//! # Example
//!
//! ```no_run
//! use frameprobe::{MediaProbe, MediaSource};
//!
//! let probe = MediaProbe::new();
//! let source = MediaSource::path("sticker.webp");
//! let record = probe.record(&source)?;
//! println!(
//!     "{}x{} {} @ {:.2} fps, animated: {}",
//!     record.resolution.0,
//!     record.resolution.1,
//!     record.codec,
//!     record.timing.fps,
//!     record.is_animated(),
//! );
//! # Ok::<(), frameprobe::ProbeError>(())
//! ```

use std::path::PathBuf;

use crate::classifier::Strategy;
use crate::error::ProbeError;
use crate::record::{MediaRecord, TimingRecord};
use crate::source::MediaSource;
use crate::{chunked, external, fallback, raster, vector};

/// The set of probing backends available to a [`MediaProbe`].
///
/// The built-in decoders (vector archive, raster, video container) are
/// always available; `Backends` controls the optional external command-line
/// cross-check layer. Construct with [`Backends::detect`] to pick up
/// whatever is installed, or [`Backends::none`] for fully deterministic,
/// library-only probing.
#[derive(Debug, Clone, Default)]
pub struct Backends {
    ffprobe: Option<PathBuf>,
    magick: Option<PathBuf>,
}

impl Backends {
    /// No external tools: internal decoding libraries only.
    pub fn none() -> Self {
        Self::default()
    }

    /// Discover `ffprobe` and `magick` on `PATH`.
    ///
    /// Tools that are not found are silently omitted; probing works without
    /// them, just without the cross-check.
    pub fn detect() -> Self {
        let backends = Self {
            ffprobe: which::which("ffprobe").ok(),
            magick: which::which("magick").ok(),
        };
        log::debug!(
            "external backends: ffprobe={}, magick={}",
            backends.ffprobe.is_some(),
            backends.magick.is_some(),
        );
        backends
    }

    fn has_external(&self) -> bool {
        self.ffprobe.is_some() || self.magick.is_some()
    }
}

/// Stateless media introspection facade.
///
/// Every query takes a [`MediaSource`] and returns fresh values; see the
/// module docs for the dispatch model.
#[derive(Debug, Clone, Default)]
pub struct MediaProbe {
    backends: Backends,
}

impl MediaProbe {
    /// A probe using only the built-in decoding libraries.
    pub fn new() -> Self {
        Self {
            backends: Backends::none(),
        }
    }

    /// A probe with an explicit backend capability set.
    ///
    /// ```no_run
    /// use frameprobe::{Backends, MediaProbe};
    ///
    /// let probe = MediaProbe::with_backends(Backends::detect());
    /// ```
    pub fn with_backends(backends: Backends) -> Self {
        Self { backends }
    }

    /// Frames per second.
    ///
    /// Vector archives report their declared rate; chunked and raster
    /// formats run the full per-frame derivation; generic containers use a
    /// bounded decode (default 10 frames) against the metadata duration.
    ///
    /// # Errors
    ///
    /// Fatal for invalid vector archives and for unreadable sources on the
    /// strategies that read the bytes directly; container probing degrades
    /// to `0` instead.
    pub fn fps(&self, source: &MediaSource) -> Result<f64, ProbeError> {
        match self.strategy(source) {
            Strategy::VectorArchive => Ok(vector::decode(source)?.fps()),
            Strategy::ChunkedRaster => Ok(chunked::timing(source)?.fps),
            Strategy::AnimatedRaster => Ok(raster::timing(source)?.fps),
            Strategy::DecodeFallback => {
                let (frames, duration_ms) = fallback::frames_duration(
                    source,
                    Some(fallback::DEFAULT_FPS_PROBE_FRAMES),
                    false,
                );
                Ok(rate(frames, duration_ms))
            }
        }
    }

    /// Exact frame count.
    pub fn frames(&self, source: &MediaSource) -> Result<u64, ProbeError> {
        self.frames_bounded(source, false)
    }

    /// Frame count, optionally bounded for the animation predicate.
    ///
    /// With `check_anim` set, a returned value `> 1` means "animated" but
    /// the count itself may be truncated at 2 for generic containers —
    /// enough to answer the predicate without a full decode.
    pub fn frames_bounded(
        &self,
        source: &MediaSource,
        check_anim: bool,
    ) -> Result<u64, ProbeError> {
        match self.strategy(source) {
            Strategy::VectorArchive => Ok(vector::decode(source)?.frames()),
            Strategy::ChunkedRaster => chunked::frame_count(source),
            Strategy::AnimatedRaster => raster::frame_count(source),
            Strategy::DecodeFallback => {
                let bound = check_anim.then_some(fallback::ANIMATION_CHECK_FRAMES);
                Ok(fallback::frames_duration(source, bound, true).0)
            }
        }
    }

    /// Total duration in milliseconds.
    pub fn duration_ms(&self, source: &MediaSource) -> Result<f64, ProbeError> {
        Ok(self.timing(source)?.duration_ms)
    }

    /// The full normalized timing model.
    pub fn timing(&self, source: &MediaSource) -> Result<TimingRecord, ProbeError> {
        match self.strategy(source) {
            Strategy::VectorArchive => Ok(vector::decode(source)?.timing()),
            Strategy::ChunkedRaster => chunked::timing(source),
            Strategy::AnimatedRaster => raster::timing(source),
            Strategy::DecodeFallback => {
                let (frames, duration_ms) = fallback::frames_duration(source, None, false);
                Ok(TimingRecord {
                    fps: rate(frames, duration_ms),
                    frames,
                    duration_ms,
                })
            }
        }
    }

    /// Codec name, lowercase. Empty string when undetermined.
    ///
    /// Vector-family extensions (`tgs`, `lottie`, `json`) name themselves;
    /// raster bytes are identified by the image library (with the PNG/APNG
    /// ambiguity resolved via the decoder's animation flag); everything else
    /// asks the video decoder. An available `ffprobe` backend fills in only
    /// when the internal answer is empty.
    pub fn codec(&self, source: &MediaSource) -> Result<String, ProbeError> {
        if let Some(ext) = source.extension() {
            if Strategy::is_vector_family(&ext) {
                return Ok(ext);
            }
        }

        if let Some(identity) = raster::identify(source)? {
            return Ok(identity.codec);
        }

        let codec = fallback::codec_name(source);
        if !codec.is_empty() {
            return Ok(codec);
        }

        if let (Some(tool), Some(path)) = (&self.backends.ffprobe, source.as_path()) {
            return Ok(external::ffprobe_codec(tool, path));
        }
        Ok(String::new())
    }

    /// Pixel resolution `(width, height)`, `(0, 0)` when undetermined.
    ///
    /// When external backends are available for a path-based source, their
    /// answers are cross-checked against the internal one and the per-axis
    /// maximum wins — `0` from any single tool means "could not determine",
    /// so one tool's blind spot never zeroes the result.
    pub fn resolution(&self, source: &MediaSource) -> Result<(u32, u32), ProbeError> {
        let internal = match source.extension().as_deref() {
            Some("tgs") => vector::decode(source)?.resolution(),
            Some("webp" | "png" | "apng") => raster::dimensions(source)?,
            _ => fallback::resolution(source),
        };

        if !self.backends.has_external() {
            return Ok(internal);
        }
        let Some(path) = source.as_path() else {
            return Ok(internal);
        };

        let (mut width, mut height) = internal;
        if let Some(tool) = &self.backends.ffprobe {
            let (w, h) = external::ffprobe_resolution(tool, path);
            width = width.max(w);
            height = height.max(h);
        }
        if let Some(tool) = &self.backends.magick {
            let (w, h) = external::magick_resolution(tool, path);
            width = width.max(w);
            height = height.max(h);
        }
        Ok((width, height))
    }

    /// Whether the file is animated: `fps > 1`, for every strategy.
    pub fn is_animated(&self, source: &MediaSource) -> Result<bool, ProbeError> {
        Ok(self.fps(source)? > 1.0)
    }

    /// Assemble the full [`MediaRecord`] for a source in one call.
    ///
    /// # Errors
    ///
    /// Returns an error only for unreadable sources and invalid vector
    /// archives; strategy-level blind spots appear as zero/empty fields.
    pub fn record(&self, source: &MediaSource) -> Result<MediaRecord, ProbeError> {
        let file_ext = source.extension();
        log::debug!(
            "building record (ext={:?}, strategy={:?})",
            file_ext,
            self.strategy(source),
        );
        Ok(MediaRecord {
            file_ext,
            codec: self.codec(source)?,
            resolution: self.resolution(source)?,
            timing: self.timing(source)?,
        })
    }

    fn strategy(&self, source: &MediaSource) -> Strategy {
        Strategy::for_extension(source.extension().as_deref())
    }
}

fn rate(frames: u64, duration_ms: f64) -> f64 {
    if duration_ms > 0.0 {
        frames as f64 / duration_ms * 1000.0
    } else {
        0.0
    }
}
