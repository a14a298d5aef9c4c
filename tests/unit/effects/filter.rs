use super::*;

fn solid(px: [u8; 4]) -> image::RgbaImage {
    image::RgbaImage::from_pixel(3, 2, image::Rgba(px))
}

#[test]
fn all_builtin_filters_parse() {
    assert_eq!(builtin_filters().len(), BUILTIN_FILTERS.len());
    assert!(filter_by_id("normal").unwrap().is_identity());
    assert_eq!(filter_by_id("dreamy").unwrap().ops.len(), 3);
}

#[test]
fn parser_accepts_percentages_and_degrees() {
    let ops = parse_filter_chain("sepia(40%) hue-rotate(15deg)  contrast(1.25)").unwrap();
    assert_eq!(
        ops,
        vec![
            FilterOp::Sepia(0.4),
            FilterOp::HueRotate(15.0),
            FilterOp::Contrast(1.25)
        ]
    );
    assert!(parse_filter_chain("none").unwrap().is_empty());
}

#[test]
fn parser_rejects_unknown_and_malformed_functions() {
    assert!(parse_filter_chain("blur(2px)").is_err());
    assert!(parse_filter_chain("brightness(").is_err());
    assert!(parse_filter_chain("brightness(abc)").is_err());
    assert!(parse_filter_chain("contrast(-1)").is_err());
}

#[test]
fn normal_filter_is_identity() {
    let img = solid([12, 200, 99, 180]);
    assert_eq!(filter_by_id("normal").unwrap().apply(&img), img);
}

#[test]
fn bw_filter_produces_gray_pixels() {
    let out = filter_by_id("bw").unwrap().apply(&solid([200, 40, 90, 255]));
    for px in out.pixels() {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_eq!(px[3], 255);
    }
}

#[test]
fn brightness_scales_and_clamps() {
    let f = Filter::new("b", "b", "brightness(2)").unwrap();
    let out = f.apply(&solid([100, 200, 0, 7]));
    assert_eq!(out.get_pixel(0, 0).0, [200, 255, 0, 7]);
}

#[test]
fn zero_degree_hue_rotate_is_identity_matrix() {
    let m = FilterOp::HueRotate(0.0).matrix();
    let id = FilterOp::Brightness(1.0).matrix();
    for (a, b) in m.iter().zip(id.iter()) {
        assert!((a - b).abs() < 1e-6);
    }
}
