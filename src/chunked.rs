//! Chunked raster-animation strategy (animated WebP).
//!
//! Animated WebP stores one `ANMF` chunk per frame, each carrying that
//! frame's display duration in a packed little-endian field. Container-level
//! metadata is not trusted here at all: the file is binary-scanned for every
//! `ANMF` marker and the duration decoded straight from the chunk bytes.
//! Path-based sources are memory-mapped so large stickers are never loaded
//! wholesale; the mapping is scoped to the query and released on every exit
//! path.

use std::fs::File;

use memmap2::Mmap;

use crate::algebra::apparent_fps;
use crate::error::ProbeError;
use crate::record::TimingRecord;
use crate::source::MediaSource;

/// Four-byte ASCII tag opening a per-frame data chunk.
pub(crate) const FRAME_CHUNK_MARKER: [u8; 4] = *b"ANMF";

/// Byte offset from the marker start to the packed duration field.
pub(crate) const FRAME_DURATION_OFFSET: usize = 20;

/// Mask applied to the fourth (most significant, little-endian) byte of the
/// duration field before interpretation.
///
/// The duration occupies the low bytes of the field; the low 2 bits of the
/// fourth byte are reserved flag bits unrelated to timing and must be
/// discarded, or frames whose flags are set would report durations off by
/// up to three quarters of a gigasecond.
pub(crate) const FRAME_DURATION_FLAG_MASK: u8 = 0b1111_1100;

/// Extract normalized timing by scanning the container's frame chunks.
///
/// Fewer than two chunks means a static image (not an error); two or more
/// feed the rational duration algebra.
///
/// # Errors
///
/// Returns [`ProbeError::FileOpen`] only when the file cannot be opened or
/// memory-mapped. Malformed or absent chunks degrade to the static-image
/// record.
pub(crate) fn timing(source: &MediaSource) -> Result<TimingRecord, ProbeError> {
    match source.as_path() {
        Some(path) => {
            let file = File::open(path).map_err(|error| ProbeError::FileOpen {
                path: path.to_path_buf(),
                reason: error.to_string(),
            })?;
            // Safety: the mapping is read-only and dropped before this
            // query returns; the engine never writes through it.
            let mapping = unsafe { Mmap::map(&file) }.map_err(|error| ProbeError::FileOpen {
                path: path.to_path_buf(),
                reason: format!("memory map failed: {error}"),
            })?;
            Ok(timing_from_bytes(&mapping))
        }
        None => Ok(timing_from_bytes(&source.read()?)),
    }
}

/// Count frame chunks without decoding any pixel data.
///
/// A container without frame chunks is a static image and reports one
/// frame.
pub(crate) fn frame_count(source: &MediaSource) -> Result<u64, ProbeError> {
    let timing = timing(source)?;
    Ok(timing.frames)
}

fn timing_from_bytes(data: &[u8]) -> TimingRecord {
    let mut frames: u64 = 0;
    let mut total_ms: f64 = 0.0;
    let mut distinct: Vec<f64> = Vec::new();

    let mut position = 0;
    while let Some(marker) = find_marker(data, position) {
        let field_start = marker + FRAME_DURATION_OFFSET;
        let Some(raw) = data.get(field_start..field_start + 4) else {
            // Truncated final chunk; stop scanning rather than fail.
            break;
        };
        let field = [raw[0], raw[1], raw[2], raw[3] & FRAME_DURATION_FLAG_MASK];
        let duration_ms = u32::from_le_bytes(field) as f64;

        if duration_ms != 0.0 && !distinct.contains(&duration_ms) {
            distinct.push(duration_ms);
        }
        total_ms += duration_ms;
        frames += 1;
        position = field_start + 4;
    }

    if frames <= 1 {
        log::trace!("chunked scan found {frames} frame chunk(s); treating as static");
        return TimingRecord::static_image();
    }

    TimingRecord {
        fps: apparent_fps(&distinct, total_ms, frames),
        frames,
        duration_ms: total_ms,
    }
}

fn find_marker(data: &[u8], from: usize) -> Option<usize> {
    if from >= data.len() {
        return None;
    }
    data[from..]
        .windows(FRAME_CHUNK_MARKER.len())
        .position(|window| window == FRAME_CHUNK_MARKER)
        .map(|offset| offset + from)
}
