use std::sync::Arc;

use super::*;
use crate::assets::fonts::FontBook;
use crate::caption::static_list::StaticCaptionProvider;
use crate::render::config::CompositorConfig;

fn frame() -> image::RgbaImage {
    image::RgbaImage::from_pixel(16, 12, image::Rgba([200, 120, 40, 255]))
}

fn grid4_session() -> BoothSession {
    BoothSession::new(layout_by_id("grid-4").unwrap(), filter_by_id("korean").unwrap()).unwrap()
}

#[test]
fn new_session_starts_in_setup() {
    let s = BoothSession::with_defaults().unwrap();
    assert_eq!(s.mode(), BoothMode::Setup);
    assert_eq!(s.layout().id, "strip-4");
    assert_eq!(s.filter().id, "normal");
    assert_eq!(s.timer_seconds(), 3);
    assert!(s.mirror());
}

#[test]
fn timer_accepts_only_offered_durations() {
    let mut s = grid4_session();
    s.set_timer(10).unwrap();
    assert_eq!(s.timer_seconds(), 10);
    assert!(s.set_timer(7).is_err());
    assert_eq!(s.timer_seconds(), 10);
}

#[test]
fn capture_loop_fills_capacity_then_decorates() {
    let mut s = grid4_session();
    s.start_session().unwrap();
    for n in 1..=4 {
        assert_eq!(s.mode(), BoothMode::Capturing);
        s.take_shot(&frame()).unwrap();
        assert_eq!(s.mode(), BoothMode::Review);
        assert!(s.pending_shot().is_some());
        s.confirm_shot().unwrap();
        assert_eq!(s.shots().len(), n);
    }
    assert_eq!(s.mode(), BoothMode::Decorate);
    assert_eq!(s.remaining_shots(), 0);
    assert!(s.shots().iter().all(|p| p.filter_id() == "korean"));
}

#[test]
fn retake_discards_pending_shot() {
    let mut s = grid4_session();
    s.start_session().unwrap();
    s.take_shot(&frame()).unwrap();
    s.retake_shot().unwrap();
    assert_eq!(s.mode(), BoothMode::Capturing);
    assert!(s.pending_shot().is_none());
    assert!(s.shots().is_empty());
}

#[test]
fn transitions_outside_their_mode_are_rejected() {
    let mut s = grid4_session();
    assert!(s.take_shot(&frame()).is_err());
    assert!(s.confirm_shot().is_err());
    assert!(s.retake_shot().is_err());

    s.start_session().unwrap();
    let err = s.select_layout(layout_by_id("grid-6").unwrap()).unwrap_err();
    assert!(matches!(err, BoothError::Validation(_)));
    assert_eq!(s.layout().id, "grid-4");

    s.select_filter(filter_by_id("bw").unwrap()).unwrap();
    s.take_shot(&frame()).unwrap();
    assert!(s.select_filter(filter_by_id("lomo").unwrap()).is_err());
}

#[test]
fn reset_clears_shots_and_keeps_choices() {
    let mut s = grid4_session();
    s.set_timer(5).unwrap();
    s.start_session().unwrap();
    s.take_shot(&frame()).unwrap();
    s.confirm_shot().unwrap();
    s.reset();
    assert_eq!(s.mode(), BoothMode::Setup);
    assert!(s.shots().is_empty());
    assert_eq!(s.timer_seconds(), 5);
    assert_eq!(s.layout().id, "grid-4");
}

#[test]
fn export_requires_decorate_and_names_file() {
    let compositor =
        Compositor::with_fonts(CompositorConfig::default(), Arc::new(FontBook::empty())).unwrap();
    let captions = StaticCaptionProvider::with_seed(vec!["only".to_owned()], 1);

    let mut s = grid4_session();
    s.start_session().unwrap();
    assert!(
        s.export(&compositor, DEFAULT_BRANDING, &captions, "fb", 1)
            .is_err()
    );

    for _ in 0..4 {
        s.take_shot(&frame()).unwrap();
        s.confirm_shot().unwrap();
    }
    let out = s
        .export(&compositor, DEFAULT_BRANDING, &captions, "fb", 1_234)
        .unwrap();
    assert_eq!(out.file_name, "photobooth-1234.png");
    assert_eq!(out.caption, "only");
    assert_eq!(&out.png[1..4], b"PNG");
    assert_eq!(out.composite.width(), 1200);
}

#[test]
fn export_falls_back_when_captions_fail() {
    let compositor =
        Compositor::with_fonts(CompositorConfig::default(), Arc::new(FontBook::empty())).unwrap();
    let captions = StaticCaptionProvider::new(Vec::new());

    let mut s = BoothSession::new(
        LayoutSpec {
            rows: 1,
            cols: 1,
            ..layout_by_id("grid-4").unwrap()
        },
        filter_by_id("normal").unwrap(),
    )
    .unwrap();
    s.start_session().unwrap();
    s.take_shot(&frame()).unwrap();
    s.confirm_shot().unwrap();
    let out = s
        .export(&compositor, "", &captions, "Xinh xỉu luôn á! ✨", 0)
        .unwrap();
    assert_eq!(out.caption, "Xinh xỉu luôn á! ✨");
}
