//! Error types for the `frameprobe` crate.
//!
//! This module defines [`ProbeError`], the unified error type returned by all
//! fallible operations in the crate. Only failures with no sane fallback are
//! surfaced: a strategy that loses one of several probing sources degrades to
//! a zero-valued result instead of erroring.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use thiserror::Error;

/// The unified error type for all `frameprobe` operations.
///
/// Every public method that can fail returns `Result<T, ProbeError>`.
/// Variants carry enough context to diagnose the problem without needing
/// additional logging at the call site.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProbeError {
    /// The media file could not be opened or memory-mapped.
    #[error("Failed to open media file at {path}: {reason}")]
    FileOpen {
        /// Path that was handed to the probe.
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The bytes are not a valid vector-animation archive (gzip + JSON).
    ///
    /// Fatal for the file in question: no other strategy can substitute for
    /// vector-animation data.
    #[error("Invalid vector-animation archive: {reason}")]
    InvalidVectorArchive {
        /// Why decompression or parsing failed.
        reason: String,
    },

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),

    /// An I/O error occurred while reading the source.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}

impl From<FfmpegError> for ProbeError {
    fn from(error: FfmpegError) -> Self {
        ProbeError::Ffmpeg(error.to_string())
    }
}
