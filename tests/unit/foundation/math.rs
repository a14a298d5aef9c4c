use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn premultiply_clears_color_of_transparent_pixels() {
    let mut px = vec![10, 20, 30, 0, 255, 128, 0, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0, 255, 128, 0, 255]);
}

#[test]
fn unpremultiply_recovers_opaque_and_half_alpha() {
    let mut px = vec![100, 50, 200, 128];
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px.iter().zip([100u8, 50, 200, 128]) {
        assert!(got.abs_diff(want) <= 1, "got {got}, want {want}");
    }
}
