use std::borrow::Cow;
use std::sync::Arc;

use usvg::fontdb;

use crate::assets::fonts::ResolvedFont;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{BoothError, BoothResult};

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Size, weight and fill of one line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size_px: f32,
    /// CSS-style weight (400 regular, 700 bold).
    pub weight: u16,
    /// Fill color.
    pub color: Rgba8,
}

/// A shaped single-paragraph layout plus the faces its glyph runs were shaped with.
pub struct ShapedText {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    faces: Vec<ShapedFace>,
}

struct ShapedFace {
    blob_id: u64,
    data: vello_cpu::peniko::FontData,
}

impl ShapedText {
    /// Advance width of the widest line.
    pub fn width(&self) -> f64 {
        f64::from(self.layout.width())
    }

    /// Total line-box height.
    pub fn height(&self) -> f64 {
        f64::from(self.layout.height())
    }

    /// Baseline of the first line, measured from the layout's top edge.
    pub fn first_baseline(&self) -> f64 {
        self.layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().baseline))
            .unwrap_or(0.0)
    }

    /// Outline source for a run shaped from the parley font `(blob_id, index)`.
    pub(crate) fn font_for(
        &self,
        blob_id: u64,
        index: u32,
    ) -> Option<&vello_cpu::peniko::FontData> {
        self.faces
            .iter()
            .find(|f| f.blob_id == blob_id && f.data.index == index)
            .map(|f| &f.data)
    }

    /// Glyph ids of every shaped glyph, in visual order.
    pub(crate) fn glyph_ids(&self) -> Vec<u32> {
        let mut ids = Vec::new();
        for line in self.layout.lines() {
            for item in line.items() {
                if let parley::layout::PositionedLayoutItem::GlyphRun(run) = item {
                    ids.extend(run.positioned_glyphs().map(|g| g.id));
                }
            }
        }
        ids
    }
}

struct RegisteredFace {
    id: fontdb::ID,
    blob_id: u64,
    family: String,
    data: vello_cpu::peniko::FontData,
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    registered: Vec<RegisteredFace>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: Vec::new(),
        }
    }

    fn register(&mut self, font: &ResolvedFont) -> BoothResult<usize> {
        if let Some(pos) = self.registered.iter().position(|r| r.id == font.id) {
            return Ok(pos);
        }

        let bytes: Arc<dyn AsRef<[u8]> + Send + Sync> = font.bytes.clone();
        let blob = parley::fontique::Blob::new(bytes.clone());
        let blob_id = blob.id();
        let families = self.font_ctx.collection.register_fonts(blob, None);
        let family_id = families
            .iter()
            .find(|(_, infos)| infos.iter().any(|info| info.index() == font.index))
            .map(|(id, _)| *id)
            .ok_or_else(|| {
                BoothError::configuration(format!(
                    "font '{}' has no face at index {}",
                    font.family, font.index
                ))
            })?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BoothError::configuration("registered font family has no name"))?
            .to_string();

        self.registered.push(RegisteredFace {
            id: font.id,
            blob_id,
            family,
            data: vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::new(bytes),
                font.index,
            ),
        });
        Ok(self.registered.len() - 1)
    }

    /// Shape and lay out `text` on a single unbounded line.
    ///
    /// `fonts` is a fallback chain: each character is shaped with the first font that covers it.
    pub fn shape(
        &mut self,
        text: &str,
        fonts: &[ResolvedFont],
        style: &TextStyle,
    ) -> BoothResult<ShapedText> {
        if !style.size_px.is_finite() || style.size_px <= 0.0 {
            return Err(BoothError::configuration(
                "text size_px must be finite and > 0",
            ));
        }
        if fonts.is_empty() {
            return Err(BoothError::configuration("no font to shape text with"));
        }

        let mut slots = Vec::with_capacity(fonts.len());
        for font in fonts {
            let slot = self.register(font)?;
            if !slots.contains(&slot) {
                slots.push(slot);
            }
        }
        let stack: Vec<parley::style::FontFamily<'static>> = slots
            .iter()
            .map(|&slot| {
                parley::style::FontFamily::Named(Cow::Owned(self.registered[slot].family.clone()))
            })
            .collect();
        let faces = slots
            .iter()
            .map(|&slot| {
                let r = &self.registered[slot];
                ShapedFace {
                    blob_id: r.blob_id,
                    data: r.data.clone(),
                }
            })
            .collect();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::List(Cow::Owned(stack)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(style.weight)),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::from(
            style.color,
        )));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        Ok(ShapedText { layout, faces })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
