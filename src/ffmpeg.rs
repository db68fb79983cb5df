//! FFmpeg native log control.
//!
//! FFmpeg prints warnings and errors to stderr through its own logging
//! system, independent of the Rust [`log`] facade. A probing engine gets
//! handed malformed files on purpose, so that output is pure noise for most
//! hosts. This wrapper lets consumers tune or silence it without importing
//! `ffmpeg-next` themselves.
//!
//! ```no_run
//! use frameprobe::NativeLogLevel;
//!
//! // Probing malformed files is expected; keep FFmpeg quiet about it.
//! frameprobe::set_native_log_level(NativeLogLevel::Quiet);
//! ```

use ffmpeg_next::util::log::Level;

/// FFmpeg internal log verbosity, most quiet to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeLogLevel {
    /// Print nothing at all.
    Quiet,
    /// Unrecoverable errors only.
    Fatal,
    /// Recoverable errors.
    Error,
    /// Warnings (FFmpeg's default).
    Warning,
    /// Informational messages.
    Info,
    /// Debugging output.
    Debug,
}

/// Set FFmpeg's internal stderr verbosity.
///
/// This does not affect Rust-side `log` crate output.
pub fn set_native_log_level(level: NativeLogLevel) {
    let native = match level {
        NativeLogLevel::Quiet => Level::Quiet,
        NativeLogLevel::Fatal => Level::Fatal,
        NativeLogLevel::Error => Level::Error,
        NativeLogLevel::Warning => Level::Warning,
        NativeLogLevel::Info => Level::Info,
        NativeLogLevel::Debug => Level::Debug,
    };
    ffmpeg_next::util::log::set_level(native);
}
