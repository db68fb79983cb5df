//! Generic animated-raster extraction on synthetic GIF/PNG inputs.

use std::io::Cursor;

use image::codecs::gif::GifEncoder;
use image::{Delay, Frame, ImageFormat, Rgba, RgbaImage};

use frameprobe::{MediaProbe, MediaSource};

fn animated_gif(delays_ms: &[u32]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buffer);
        for (index, &delay) in delays_ms.iter().enumerate() {
            let shade = (index * 40) as u8;
            let image = RgbaImage::from_pixel(4, 4, Rgba([shade, 0, 0, 255]));
            let frame = Frame::from_parts(image, 0, 0, Delay::from_numer_denom_ms(delay, 1));
            encoder.encode_frame(frame).expect("encode frame");
        }
    }
    buffer
}

fn static_png(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    let image = image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([0, 128, 0, 255]),
    ));
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("encode png");
    buffer
}

fn gif_source(delays_ms: &[u32]) -> MediaSource {
    MediaSource::bytes(animated_gif(delays_ms)).with_extension("gif")
}

#[test]
fn uniform_gif_timing() {
    let source = gif_source(&[100, 100, 100, 100]);
    let timing = MediaProbe::new().timing(&source).expect("timing");

    assert!((timing.fps - 10.0).abs() < 1e-9, "fps was {}", timing.fps);
    assert_eq!(timing.frames, 4);
    assert_eq!(timing.duration_ms, 400.0);
}

#[test]
fn mixed_gif_delays_run_the_algebra() {
    // 100/150 ms delays share a 50 ms tick: 10 apparent frames over 500 ms.
    let source = gif_source(&[100, 150, 100, 150]);
    let timing = MediaProbe::new().timing(&source).expect("timing");

    assert!((timing.fps - 20.0).abs() < 1e-9, "fps was {}", timing.fps);
    assert_eq!(timing.frames, 4);
    assert_eq!(timing.duration_ms, 500.0);
}

#[test]
fn single_frame_is_static_regardless_of_delay() {
    let source = gif_source(&[100]);
    let timing = MediaProbe::new().timing(&source).expect("timing");

    assert_eq!(timing.fps, 0.0);
    assert_eq!(timing.frames, 1);
    assert_eq!(timing.duration_ms, 0.0);
}

#[test]
fn missing_delays_default_to_one_second() {
    // Frames without a delay attribute decode as zero; each counts for the
    // one-second display convention instead of collapsing the total.
    let source = gif_source(&[0, 0, 0]);
    let timing = MediaProbe::new().timing(&source).expect("timing");

    assert_eq!(timing.frames, 3);
    assert_eq!(timing.duration_ms, 3000.0);
    assert!((timing.fps - 1.0).abs() < 1e-9, "fps was {}", timing.fps);
    assert!(!MediaProbe::new().is_animated(&source).expect("is_animated"));
}

#[test]
fn frame_count_fast_path() {
    let probe = MediaProbe::new();
    assert_eq!(probe.frames(&gif_source(&[100, 100, 100])).expect("frames"), 3);
    assert_eq!(probe.frames(&gif_source(&[100])).expect("frames"), 1);
}

#[test]
fn gif_codec_comes_from_the_image_library() {
    let source = gif_source(&[100, 100]);
    assert_eq!(MediaProbe::new().codec(&source).expect("codec"), "gif");
}

#[test]
fn static_png_reports_static_record() {
    let source = MediaSource::bytes(static_png(8, 6)).with_extension("png");
    let probe = MediaProbe::new();

    let record = probe.record(&source).expect("record");
    assert_eq!(record.codec, "png");
    assert_eq!(record.resolution, (8, 6));
    assert_eq!(record.timing.fps, 0.0);
    assert_eq!(record.timing.frames, 1);
    assert_eq!(record.timing.duration_ms, 0.0);
    assert!(!record.is_animated());
    assert_eq!(record.file_ext.as_deref(), Some("png"));
}

#[test]
fn animation_predicate_follows_fps() {
    let probe = MediaProbe::new();
    assert!(probe.is_animated(&gif_source(&[100, 100])).expect("is_animated"));
    assert!(
        !probe
            .is_animated(&MediaSource::bytes(static_png(4, 4)).with_extension("png"))
            .expect("is_animated")
    );
}

#[test]
fn undecodable_raster_bytes_degrade_to_static() {
    let source = MediaSource::bytes(b"not an image at all".to_vec()).with_extension("gif");
    let timing = MediaProbe::new().timing(&source).expect("timing");

    assert_eq!(timing.fps, 0.0);
    assert_eq!(timing.frames, 1);
    assert_eq!(timing.duration_ms, 0.0);
}
