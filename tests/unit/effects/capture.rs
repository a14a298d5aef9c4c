use super::*;
use crate::effects::filter::filter_by_id;

fn two_tone() -> image::RgbaImage {
    image::RgbaImage::from_fn(4, 2, |x, _| {
        if x < 2 {
            image::Rgba([255, 0, 0, 255])
        } else {
            image::Rgba([0, 0, 255, 255])
        }
    })
}

#[test]
fn mirror_flips_columns() {
    let out = mirror_horizontal(&two_tone());
    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 255, 255]);
    assert_eq!(out.get_pixel(3, 1).0, [255, 0, 0, 255]);
}

#[test]
fn capture_bakes_filter_and_tags_photo() {
    let bw = filter_by_id("bw").unwrap();
    let photo = CapturedPhoto::capture(&two_tone(), &bw, false).unwrap();
    assert_eq!(photo.filter_id(), "bw");

    let decoded = photo.decode().unwrap();
    assert_eq!((decoded.width, decoded.height), (4, 2));
    let px = &decoded.rgba8_premul[0..4];
    assert_eq!(px[0], px[1]);
    assert_eq!(px[1], px[2]);
}

#[test]
fn capture_with_mirror_keeps_selfie_orientation() {
    let normal = filter_by_id("normal").unwrap();
    let photo = CapturedPhoto::capture(&two_tone(), &normal, true).unwrap();
    let decoded = photo.decode().unwrap();
    assert_eq!(&decoded.rgba8_premul[0..4], &[0, 0, 255, 255]);
}

#[test]
fn empty_frame_is_rejected() {
    let normal = filter_by_id("normal").unwrap();
    let err = CapturedPhoto::capture(&image::RgbaImage::new(0, 0), &normal, false).unwrap_err();
    assert!(matches!(err, BoothError::Validation(_)));
}

#[test]
fn captured_shot_keeps_its_png_payload() {
    let normal = filter_by_id("normal").unwrap();
    let photo = CapturedPhoto::capture(&two_tone(), &normal, false).unwrap();
    let png = photo.encoded_bytes().unwrap();
    assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
}
