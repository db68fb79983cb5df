//! # frameprobe
//!
//! Inspect animated and static media files — derive a normalized timing and
//! geometry model (frame count, frame rate, total duration, codec,
//! resolution) from heterogeneous containers, even when their metadata is
//! missing, inconsistent, or lies.
//!
//! Four extraction strategies cover the container landscape:
//!
//! - **Vector archives** (Lottie/TGS): gzip + JSON documents that declare
//!   their frame rate and playback range outright.
//! - **Chunked raster containers** (animated WebP): per-frame durations are
//!   binary-scanned straight out of the `ANMF` chunks via a memory map.
//! - **Animated raster formats** (GIF, APNG): frames enumerated through the
//!   [`image`](https://crates.io/crates/image) crate with per-frame delays.
//! - **Everything else**: FFmpeg (via
//!   [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next)) container
//!   metadata, falling back to a bounded decode with timestamp
//!   extrapolation.
//!
//! Variable per-frame durations are reconciled into a single apparent frame
//! rate with exact rational arithmetic (see [`algebra`]), avoiding the drift
//! that floating-point frame-duration rounding introduces.
//!
//! ## Quick Start
//!
//! ```no_run
//! use frameprobe::{MediaProbe, MediaSource};
//!
//! let probe = MediaProbe::new();
//! let record = probe.record(&MediaSource::path("sticker.webp"))?;
//!
//! println!("codec:    {}", record.codec);
//! println!("size:     {}x{}", record.resolution.0, record.resolution.1);
//! println!("fps:      {:.2}", record.timing.fps);
//! println!("frames:   {}", record.timing.frames);
//! println!("duration: {} ms", record.timing.duration_ms);
//! println!("animated: {}", record.is_animated());
//! # Ok::<(), frameprobe::ProbeError>(())
//! ```
//!
//! ## Cheap single-property queries
//!
//! Every property can be queried on its own, and each query dispatches to
//! the cheapest probe that can answer it — checking whether a video is
//! animated decodes at most two frames:
//!
//! ```no_run
//! use frameprobe::{MediaProbe, MediaSource};
//!
//! let probe = MediaProbe::new();
//! let source = MediaSource::path("clip.webm");
//! if probe.frames_bounded(&source, true)? > 1 {
//!     println!("animated");
//! }
//! # Ok::<(), frameprobe::ProbeError>(())
//! ```
//!
//! ## In-memory buffers
//!
//! Sources can be byte buffers instead of paths; supply an extension
//! override so classification does not fall back to the most generic
//! strategy:
//!
//! ```no_run
//! use frameprobe::{MediaProbe, MediaSource};
//!
//! let bytes = std::fs::read("sticker.tgs")?;
//! let source = MediaSource::bytes(bytes).with_extension("tgs");
//! let fps = MediaProbe::new().fps(&source)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system for the
//! decode-fallback strategy; the other strategies are pure Rust.

pub mod algebra;
mod chunked;
pub mod classifier;
pub mod error;
mod external;
mod fallback;
pub mod ffmpeg;
pub mod probe;
mod raster;
pub mod record;
pub mod source;
mod vector;

pub use classifier::Strategy;
pub use error::ProbeError;
pub use ffmpeg::{NativeLogLevel, set_native_log_level};
pub use probe::{Backends, MediaProbe};
pub use record::{MediaRecord, TimingRecord};
pub use source::MediaSource;
