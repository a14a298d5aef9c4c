use crate::foundation::core::Rgba8;
use crate::foundation::error::{BoothError, BoothResult};
use crate::layout::spec::{DecorationSpec, LayoutSpec};

/// The built-in frame presets, in display order.
pub fn builtin_layouts() -> Vec<LayoutSpec> {
    vec![
        LayoutSpec {
            id: "strip-4".to_owned(),
            name: "Dọc 4 Ảnh".to_owned(),
            rows: 4,
            cols: 1,
            gap: 20.0,
            padding: 50.0,
            bg_color: Rgba8::rgb(0xff, 0xff, 0xff),
            aspect_ratio: 4.0 / 3.0,
            decorations: vec![
                DecorationSpec::new("🎀", 0.5, 0.03, 2.5),
                DecorationSpec::new("✨", 0.1, 0.97, 1.5).rotated(-15.0),
                DecorationSpec::new("✨", 0.9, 0.97, 1.5).rotated(15.0),
            ],
        },
        LayoutSpec {
            id: "grid-4".to_owned(),
            name: "Vuông 4 Ảnh".to_owned(),
            rows: 2,
            cols: 2,
            gap: 20.0,
            padding: 50.0,
            bg_color: Rgba8::rgb(0xfc, 0xe7, 0xf3),
            aspect_ratio: 1.0,
            decorations: vec![
                DecorationSpec::new("👑", 0.5, 0.04, 2.0),
                DecorationSpec::new("🌸", 0.5, 0.5, 1.2),
                DecorationSpec::new("🍓", 0.05, 0.95, 1.5).rotated(-20.0),
                DecorationSpec::new("🍓", 0.95, 0.95, 1.5).rotated(20.0),
            ],
        },
        LayoutSpec {
            id: "grid-6".to_owned(),
            name: "Chữ Nhật 6 Ảnh".to_owned(),
            rows: 2,
            cols: 3,
            gap: 15.0,
            padding: 40.0,
            bg_color: Rgba8::rgb(0xff, 0xf1, 0xf2),
            aspect_ratio: 1.0,
            decorations: vec![
                DecorationSpec::new("🌈", 0.92, 0.05, 2.0).rotated(10.0),
                DecorationSpec::new("☁\u{fe0f}", 0.08, 0.05, 2.0).rotated(-10.0),
                DecorationSpec::new("❤\u{fe0f}", 0.5, 0.95, 1.5),
            ],
        },
    ]
}

/// Look up a built-in preset by id.
pub fn layout_by_id(id: &str) -> BoothResult<LayoutSpec> {
    builtin_layouts()
        .into_iter()
        .find(|l| l.id == id)
        .ok_or_else(|| BoothError::validation(format!("unknown layout id '{id}'")))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/catalog.rs"]
mod tests;
