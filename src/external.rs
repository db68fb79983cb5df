//! External command-line prober cross-check.
//!
//! A single probing library occasionally has metadata blind spots (a codec
//! it can name but whose dimensions it reports as zero, or vice versa).
//! When `ffprobe` and/or ImageMagick's `magick` binary are installed, they
//! serve as independent secondary sources for codec and resolution only.
//! This layer is optional robustness, not required for correctness: any
//! spawn or parse failure is absorbed into the "tool could not determine"
//! values (`(0, 0)` / empty string) and never surfaces as an error.

use std::path::Path;
use std::process::Command;

/// Resolution reported by `ffprobe`, `(0, 0)` on any failure.
pub(crate) fn ffprobe_resolution(tool: &Path, file: &Path) -> (u32, u32) {
    let output = Command::new(tool)
        .args([
            "-v",
            "error",
            "-select_streams",
            "v",
            "-show_entries",
            "stream=width,height",
            "-of",
            "csv=p=0:s=x",
        ])
        .arg(file)
        .output();
    match output {
        Ok(output) if output.status.success() => {
            // One line per matched stream; the first video stream wins.
            let stdout = String::from_utf8_lossy(&output.stdout);
            parse_dimensions(stdout.lines().next().unwrap_or("").trim())
        }
        _ => (0, 0),
    }
}

/// Codec name reported by `ffprobe`, empty on any failure.
pub(crate) fn ffprobe_codec(tool: &Path, file: &Path) -> String {
    let output = Command::new(tool)
        .args([
            "-v",
            "error",
            "-select_streams",
            "v",
            "-show_entries",
            "stream=codec_name",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(file)
        .output();
    match output {
        Ok(output) if output.status.success() => String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase(),
        _ => String::new(),
    }
}

/// Resolution of the first frame reported by `magick identify`, `(0, 0)` on
/// any failure.
pub(crate) fn magick_resolution(tool: &Path, file: &Path) -> (u32, u32) {
    // "[0]" pins identify to the first frame of multi-frame files.
    let mut target = file.as_os_str().to_os_string();
    target.push("[0]");

    let output = Command::new(tool)
        .args(["identify", "-ping", "-format", "%wx%h"])
        .arg(target)
        .output();
    match output {
        Ok(output) if output.status.success() => {
            parse_dimensions(String::from_utf8_lossy(&output.stdout).trim())
        }
        _ => (0, 0),
    }
}

fn parse_dimensions(rendered: &str) -> (u32, u32) {
    let Some((width, height)) = rendered.split_once('x') else {
        return (0, 0);
    };
    match (width.trim().parse(), height.trim().parse()) {
        (Ok(width), Ok(height)) => (width, height),
        _ => (0, 0),
    }
}
