//! Normalized per-file probe results.
//!
//! [`TimingRecord`] is the timing model every strategy reduces to, and
//! [`MediaRecord`] the full per-file answer assembled by
//! [`MediaProbe::record`](crate::MediaProbe::record). Records are built once
//! per query and are immutable; the engine keeps no cache.

/// Normalized timing for one media file.
///
/// Invariant: when `fps > 0` and `duration_ms > 0`, `frames` approximates
/// `round(fps * duration_ms / 1000)` within strategy-specific tolerance.
/// Values are never negative and never NaN; a failed extraction yields
/// [`TimingRecord::static_image`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub struct TimingRecord {
    /// Frames per second. `0` when the file is static or undetermined.
    pub fps: f64,
    /// Total frame count.
    pub frames: u64,
    /// Total duration in milliseconds.
    pub duration_ms: f64,
}

impl TimingRecord {
    /// The degenerate record for a static image (or a failed extraction):
    /// one frame, zero duration, zero rate.
    pub fn static_image() -> Self {
        Self {
            fps: 0.0,
            frames: 1,
            duration_ms: 0.0,
        }
    }
}

/// Full per-file introspection record.
///
/// Assembled by [`MediaProbe::record`](crate::MediaProbe::record) in a
/// single call; each field can also be queried independently and more
/// cheaply via the per-property methods.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct MediaRecord {
    /// Effective file extension (lowercase, no dot), if one was known.
    pub file_ext: Option<String>,
    /// Codec name, lowercase. Empty string when undetermined.
    pub codec: String,
    /// Pixel resolution `(width, height)`. `(0, 0)` when undetermined.
    pub resolution: (u32, u32),
    /// Normalized timing model.
    pub timing: TimingRecord,
}

impl MediaRecord {
    /// Whether the file is animated.
    ///
    /// Derived from the timing model (`fps > 1`) on every call rather than
    /// stored, so it can never diverge from `timing.fps`.
    pub fn is_animated(&self) -> bool {
        self.timing.fps > 1.0
    }
}
