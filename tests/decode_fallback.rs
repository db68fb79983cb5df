//! Video-container fallback integration tests.
//!
//! Tests that need a real container are gated on the presence of the sample
//! fixture and pass vacuously when it is absent.

use std::path::Path;

use frameprobe::{MediaProbe, MediaSource};

fn sample_video_path() -> &'static str {
    "tests/fixtures/sample_video.mp4"
}

#[test]
fn sample_video_timing() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let source = MediaSource::path(path);
    let timing = MediaProbe::new().timing(&source).expect("timing");

    assert!(timing.frames > 1, "frames was {}", timing.frames);
    assert!(timing.duration_ms > 0.0);
    assert!(timing.fps > 1.0, "fps was {}", timing.fps);
}

#[test]
fn sample_video_record() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let source = MediaSource::path(path);
    let record = MediaProbe::new().record(&source).expect("record");

    assert_eq!(record.file_ext.as_deref(), Some("mp4"));
    assert!(!record.codec.is_empty());
    assert!(record.resolution.0 > 0 && record.resolution.1 > 0);
    assert!(record.is_animated());
}

#[test]
fn sample_video_bounded_animation_check() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let source = MediaSource::path(path);
    // The bounded count may stop at 2; it only has to settle the predicate.
    let frames = MediaProbe::new()
        .frames_bounded(&source, true)
        .expect("frames");
    assert!(frames > 1, "bounded count was {frames}");
}

#[test]
fn garbage_bytes_degrade_instead_of_raising() {
    let source = MediaSource::bytes(b"definitely not a media container".to_vec())
        .with_extension("mp4");
    let probe = MediaProbe::new();

    let timing = probe.timing(&source).expect("timing");
    assert_eq!(timing.fps, 0.0);
    assert_eq!(timing.frames, 0);
    assert_eq!(timing.duration_ms, 0.0);
    assert!(!probe.is_animated(&source).expect("is_animated"));
}

#[test]
fn missing_file_is_a_fatal_open_error() {
    let source = MediaSource::path("tests/fixtures/no_such_file.mp4");
    // Reading the source at all is the one fatal path here.
    assert!(MediaProbe::new().record(&source).is_err());
}
