//! Vector-animation archive strategy.
//!
//! Lottie/TGS files are gzip-compressed JSON documents that state their
//! frame rate and playback range outright — there are no per-frame durations
//! to reconcile. This strategy decompresses the archive, parses the
//! document, and reads the authoritative fields.
//!
//! Unlike every other strategy, failure here is fatal for the file: nothing
//! else can substitute for vector-animation data, so a malformed archive
//! surfaces as [`ProbeError::InvalidVectorArchive`] instead of degrading to
//! a static-image result.

use flate2::read::GzDecoder;
use serde::Deserialize;

use crate::algebra::round_half_up;
use crate::error::ProbeError;
use crate::record::TimingRecord;
use crate::source::MediaSource;

/// The fields of a vector-animation document this engine cares about.
///
/// `fr` is the frame rate, `ip`/`op` the in/out points in frames (the
/// playable frame count is their difference), `w`/`h` the design-time
/// canvas size. Everything else in the document is ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct VectorDocument {
    #[serde(rename = "fr", default)]
    frame_rate: f64,
    #[serde(rename = "ip", default)]
    in_point: f64,
    #[serde(rename = "op", default)]
    out_point: f64,
    #[serde(rename = "w", default)]
    width: u32,
    #[serde(rename = "h", default)]
    height: u32,
}

impl VectorDocument {
    /// Frames per second as declared by the document.
    pub(crate) fn fps(&self) -> f64 {
        self.frame_rate.max(0.0)
    }

    /// Total playable frame count (`op - ip`, rounded half-up).
    pub(crate) fn frames(&self) -> u64 {
        let span = self.out_point - self.in_point;
        if span <= 0.0 {
            0
        } else {
            round_half_up(span) as u64
        }
    }

    /// Canvas size in pixels.
    pub(crate) fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Normalized timing: `duration_ms = frames / fps * 1000` when the
    /// declared rate is positive, zero otherwise.
    pub(crate) fn timing(&self) -> TimingRecord {
        let fps = self.fps();
        let frames = self.frames();
        let duration_ms = if fps > 0.0 {
            frames as f64 / fps * 1000.0
        } else {
            0.0
        };
        TimingRecord {
            fps,
            frames,
            duration_ms,
        }
    }
}

/// Decompress and parse a vector-animation archive.
///
/// # Errors
///
/// [`ProbeError::FileOpen`] if a path-based source cannot be read;
/// [`ProbeError::InvalidVectorArchive`] if the bytes are not valid gzip or
/// the decompressed payload is not a valid document.
pub(crate) fn decode(source: &MediaSource) -> Result<VectorDocument, ProbeError> {
    let data = source.read()?;
    let decoder = GzDecoder::new(data.as_ref());
    serde_json::from_reader(decoder).map_err(|error| {
        log::debug!("vector archive rejected: {error}");
        ProbeError::InvalidVectorArchive {
            reason: error.to_string(),
        }
    })
}
