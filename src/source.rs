//! Media input sources.
//!
//! [`MediaSource`] is the single input type every probe query accepts: a
//! filesystem path or an in-memory byte buffer, optionally tagged with an
//! explicit file-extension override for buffers that arrive without a name.
//! The engine never mutates or persists a source; ownership stays with the
//! caller.
//!
//! # Example
//!
//! ```
//! use frameprobe::MediaSource;
//!
//! let from_path = MediaSource::from(std::path::Path::new("sticker.webp"));
//! assert_eq!(from_path.extension().as_deref(), Some("webp"));
//!
//! // Bytes without a name need an explicit extension to classify.
//! let from_bytes = MediaSource::from(vec![0u8; 16]).with_extension("tgs");
//! assert_eq!(from_bytes.extension().as_deref(), Some("tgs"));
//! ```

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ProbeError;

/// A media file, by path or as an in-memory buffer.
#[derive(Debug, Clone)]
pub struct MediaSource {
    input: Input,
    /// Explicit extension override (normalized: lowercase, no leading dot).
    extension_override: Option<String>,
}

#[derive(Debug, Clone)]
enum Input {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl MediaSource {
    /// Create a source backed by a filesystem path.
    pub fn path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            input: Input::Path(path.as_ref().to_path_buf()),
            extension_override: None,
        }
    }

    /// Create a source backed by an in-memory buffer.
    ///
    /// Buffers carry no filename, so classification falls back to the most
    /// tolerant strategy unless [`with_extension`](Self::with_extension) is
    /// used.
    pub fn bytes(bytes: Vec<u8>) -> Self {
        Self {
            input: Input::Bytes(bytes),
            extension_override: None,
        }
    }

    /// Override the extension used for format classification.
    ///
    /// Accepts `"webp"` or `".webp"`; case-insensitive.
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension_override = Some(normalize_extension(extension));
        self
    }

    /// The effective extension: the override if present, otherwise the path
    /// suffix. `None` for anonymous buffers.
    pub fn extension(&self) -> Option<String> {
        if let Some(ext) = &self.extension_override {
            return Some(ext.clone());
        }
        match &self.input {
            Input::Path(path) => path
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase()),
            Input::Bytes(_) => None,
        }
    }

    /// The backing path, if this source is path-based.
    pub fn as_path(&self) -> Option<&Path> {
        match &self.input {
            Input::Path(path) => Some(path),
            Input::Bytes(_) => None,
        }
    }

    /// The raw bytes of the source.
    ///
    /// Path-based sources are read from disk; buffer-based sources are
    /// borrowed without copying.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::FileOpen`] if a path-based source cannot be
    /// read.
    pub fn read(&self) -> Result<Cow<'_, [u8]>, ProbeError> {
        match &self.input {
            Input::Path(path) => {
                let data = fs::read(path).map_err(|error| ProbeError::FileOpen {
                    path: path.clone(),
                    reason: error.to_string(),
                })?;
                Ok(Cow::Owned(data))
            }
            Input::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
        }
    }
}

impl From<PathBuf> for MediaSource {
    fn from(path: PathBuf) -> Self {
        Self::path(path)
    }
}

impl From<&Path> for MediaSource {
    fn from(path: &Path) -> Self {
        Self::path(path)
    }
}

impl From<Vec<u8>> for MediaSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::bytes(bytes)
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_lowercase()
}
