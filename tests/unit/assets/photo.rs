use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::*;
use crate::foundation::error::BoothError;

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([9, 8, 7, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn encoded_and_data_url_sources_decode_alike() {
    let bytes = png(3, 2);
    let a = CapturedPhoto::from_encoded(bytes.clone(), "normal");
    let b = CapturedPhoto::from_data_url(
        format!("data:image/png;base64,{}", STANDARD.encode(&bytes)),
        "normal",
    );
    assert_eq!(a.decode().unwrap(), b.decode().unwrap());
    assert_eq!(a.filter_id(), "normal");
}

#[test]
fn raster_source_is_returned_premultiplied() {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
    let p = CapturedPhoto::from_rgba(img, "bw").unwrap();
    let d = p.decode().unwrap();
    assert_eq!((d.width, d.height), (2, 2));
    assert_eq!(&d.rgba8_premul[..4], &[255, 0, 0, 255]);
}

#[test]
fn empty_raster_is_rejected() {
    let img = image::RgbaImage::new(0, 0);
    assert!(CapturedPhoto::from_rgba(img, "normal").is_err());
}

#[test]
fn corrupt_sources_fail_only_on_decode() {
    let p = CapturedPhoto::from_encoded(vec![0u8; 16], "normal");
    assert!(matches!(p.decode(), Err(BoothError::Decode(_))));
    let p = CapturedPhoto::from_data_url("not a url", "normal");
    assert!(matches!(p.decode(), Err(BoothError::Decode(_))));
}

#[test]
fn only_encoded_sources_expose_bytes() {
    let bytes = png(1, 1);
    let encoded = CapturedPhoto::from_encoded(bytes.clone(), "normal");
    assert_eq!(encoded.encoded_bytes(), Some(bytes.as_slice()));

    let url = CapturedPhoto::from_data_url(
        format!("data:image/png;base64,{}", STANDARD.encode(&bytes)),
        "normal",
    );
    assert!(url.encoded_bytes().is_none());
}
