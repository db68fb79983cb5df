//! Vector-animation archive (gzip + JSON) extraction.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use frameprobe::{MediaProbe, MediaSource, ProbeError};

fn archive(document: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(document.as_bytes()).expect("compress");
    encoder.finish().expect("finish")
}

fn tgs_source(document: &str) -> MediaSource {
    MediaSource::bytes(archive(document)).with_extension("tgs")
}

#[test]
fn reads_declared_rate_and_range() {
    let source = tgs_source(r#"{"fr":60,"ip":0,"op":180,"w":512,"h":512,"layers":[]}"#);
    let probe = MediaProbe::new();

    let timing = probe.timing(&source).expect("timing");
    assert_eq!(timing.fps, 60.0);
    assert_eq!(timing.frames, 180);
    assert_eq!(timing.duration_ms, 3000.0);

    assert_eq!(probe.resolution(&source).expect("resolution"), (512, 512));
    assert!(probe.is_animated(&source).expect("is_animated"));
}

#[test]
fn nonzero_in_point_shrinks_the_range() {
    let source = tgs_source(r#"{"fr":30,"ip":15,"op":75}"#);
    let timing = MediaProbe::new().timing(&source).expect("timing");

    assert_eq!(timing.frames, 60);
    assert_eq!(timing.duration_ms, 2000.0);
}

#[test]
fn zero_rate_reports_zero_duration() {
    let source = tgs_source(r#"{"fr":0,"ip":0,"op":10}"#);
    let timing = MediaProbe::new().timing(&source).expect("timing");

    assert_eq!(timing.fps, 0.0);
    assert_eq!(timing.duration_ms, 0.0);
}

#[test]
fn codec_is_the_vector_family_extension() {
    let source = tgs_source(r#"{"fr":60,"ip":0,"op":180}"#);
    assert_eq!(MediaProbe::new().codec(&source).expect("codec"), "tgs");
}

#[test]
fn invalid_gzip_is_fatal() {
    let source = MediaSource::bytes(b"definitely not gzip".to_vec()).with_extension("tgs");
    let error = MediaProbe::new().timing(&source).unwrap_err();
    assert!(
        matches!(error, ProbeError::InvalidVectorArchive { .. }),
        "{error:?}"
    );
}

#[test]
fn invalid_json_is_fatal() {
    let source = MediaSource::bytes(archive("this is not json")).with_extension("tgs");
    let error = MediaProbe::new().record(&source).unwrap_err();
    assert!(
        matches!(error, ProbeError::InvalidVectorArchive { .. }),
        "{error:?}"
    );
}

#[test]
fn fractional_rates_are_preserved() {
    let source = tgs_source(r#"{"fr":29.97,"ip":0,"op":300}"#);
    let probe = MediaProbe::new();
    let fps = probe.fps(&source).expect("fps");
    assert!((fps - 29.97).abs() < 1e-9);
}
