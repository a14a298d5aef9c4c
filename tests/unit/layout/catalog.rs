use super::*;
use crate::layout::geometry::CompositeGeometry;

#[test]
fn every_preset_is_valid_at_default_width() {
    for l in builtin_layouts() {
        l.validate().unwrap();
        let g = CompositeGeometry::compute(&l, 1200, 100.0).unwrap();
        assert_eq!(g.capacity(), l.capacity());
    }
}

#[test]
fn ids_are_unique_and_resolvable() {
    let layouts = builtin_layouts();
    let mut ids: Vec<_> = layouts.iter().map(|l| l.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), layouts.len());
    assert_eq!(layout_by_id("grid-6").unwrap().capacity(), 6);
}

#[test]
fn unknown_id_is_validation_error() {
    assert!(matches!(
        layout_by_id("nope"),
        Err(BoothError::Validation(_))
    ));
}

#[test]
fn presets_roundtrip_through_json() {
    let l = layout_by_id("grid-4").unwrap();
    let json = serde_json::to_string(&l).unwrap();
    assert!(json.contains("\"bgColor\":\"#fce7f3\""));
    assert_eq!(LayoutSpec::from_json(&json).unwrap(), l);
}
