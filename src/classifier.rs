//! Format classification.
//!
//! Maps a file's extension (or explicit override) to the extraction strategy
//! that owns it. Classification happens once per query; the chosen
//! [`Strategy`] tag drives all subsequent dispatch, so the extension string
//! is never re-examined further down the call graph.

/// The extraction strategy selected for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Gzip-compressed JSON keyframe archive (Lottie/TGS). Frame rate and
    /// frame count are read directly from the document.
    VectorArchive,
    /// Container with explicit per-frame duration chunks (animated WebP).
    /// Durations are decoded straight from the chunk bytes.
    ChunkedRaster,
    /// Multi-frame raster format whose per-frame durations are exposed by
    /// the image decoding library (GIF, PNG/APNG).
    AnimatedRaster,
    /// Arbitrary video container; timing comes from container metadata or a
    /// bounded decode. The most tolerant strategy and the default.
    DecodeFallback,
}

impl Strategy {
    /// Classify by normalized lowercase extension.
    ///
    /// Unknown or missing extensions map to [`Strategy::DecodeFallback`].
    pub fn for_extension(extension: Option<&str>) -> Self {
        match extension {
            Some("tgs") => Strategy::VectorArchive,
            Some("webp") => Strategy::ChunkedRaster,
            Some("gif" | "png" | "apng") => Strategy::AnimatedRaster,
            _ => Strategy::DecodeFallback,
        }
    }

    /// Whether this extension names a vector-animation document family
    /// member (used for codec naming, not timing dispatch).
    pub(crate) fn is_vector_family(extension: &str) -> bool {
        matches!(extension, "tgs" | "lottie" | "json")
    }
}
