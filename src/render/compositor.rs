use std::sync::Arc;

use rayon::prelude::*;

use crate::assets::decode::PreparedImage;
use crate::assets::fonts::{FontBook, ResolvedFont};
use crate::assets::photo::CapturedPhoto;
use crate::assets::text::{ShapedText, TextLayoutEngine, TextStyle};
use crate::foundation::core::{Affine, Rgba8};
use crate::foundation::error::{BoothError, BoothResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::layout::geometry::CompositeGeometry;
use crate::layout::spec::LayoutSpec;
use crate::render::config::CompositorConfig;
use crate::render::cover::CoverFit;

/// A rendered collage: premultiplied RGBA8 pixels plus the photos that could not be drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeResult {
    width: u32,
    height: u32,
    data: Vec<u8>,
    skipped_photos: Vec<usize>,
}

impl CompositeResult {
    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major premultiplied RGBA8 bytes.
    pub fn data_premul(&self) -> &[u8] {
        &self.data
    }

    /// Indices of photos that failed to decode and left their cell showing the background.
    pub fn skipped_photos(&self) -> &[usize] {
        &self.skipped_photos
    }

    /// Straight-alpha pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let mut px = [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ];
        unpremultiply_rgba8_in_place(&mut px);
        Some(Rgba8::rgba(px[0], px[1], px[2], px[3]))
    }

    /// Copy into a straight-alpha `image` buffer.
    pub fn to_rgba_image(&self) -> BoothResult<image::RgbaImage> {
        let mut raw = self.data.clone();
        unpremultiply_rgba8_in_place(&mut raw);
        image::RgbaImage::from_raw(self.width, self.height, raw)
            .ok_or_else(|| BoothError::encode("composite buffer does not match its dimensions"))
    }
}

/// Renders layouts, photos, decorations and branding into a [`CompositeResult`].
///
/// A compositor holds only configuration and the font book; every call to
/// [`Compositor::render`] starts from an empty surface.
pub struct Compositor {
    config: CompositorConfig,
    fonts: Arc<FontBook>,
}

impl Compositor {
    /// Validate `config` and load fonts from the system and the configured directories.
    pub fn new(config: CompositorConfig) -> BoothResult<Self> {
        config.validate()?;
        let fonts = FontBook::load(&config.effective_font_dirs(), config.system_fonts);
        Ok(Self {
            config,
            fonts: Arc::new(fonts),
        })
    }

    /// Build a compositor around an already loaded font book.
    pub fn with_fonts(config: CompositorConfig, fonts: Arc<FontBook>) -> BoothResult<Self> {
        config.validate()?;
        Ok(Self { config, fonts })
    }

    /// Active configuration.
    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// Shared font book.
    pub fn fonts(&self) -> &Arc<FontBook> {
        &self.fonts
    }

    /// Size `layout` at the configured export width.
    pub fn geometry(&self, layout: &LayoutSpec) -> BoothResult<CompositeGeometry> {
        CompositeGeometry::compute(
            layout,
            self.config.export_width,
            self.config.branding_reserve,
        )
    }

    /// Render one collage.
    ///
    /// Drawing order is background, photos by index, decorations in list order, then the
    /// branding line. Photos that fail to decode are skipped and reported in
    /// [`CompositeResult::skipped_photos`]. Invalid layouts and too many photos fail before any
    /// drawing happens.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(layout = %layout.id, photos = photos.len())
    )]
    pub fn render(
        &self,
        layout: &LayoutSpec,
        photos: &[CapturedPhoto],
        branding: &str,
    ) -> BoothResult<CompositeResult> {
        let geom = self.geometry(layout)?;
        if photos.len() > geom.capacity() {
            return Err(BoothError::configuration(format!(
                "layout '{}' holds {} photos, got {}",
                layout.id,
                geom.capacity(),
                photos.len()
            )));
        }

        let decoded: Vec<BoothResult<PreparedImage>> =
            photos.par_iter().map(CapturedPhoto::decode).collect();

        let width: u16 = geom
            .surface_width
            .try_into()
            .map_err(|_| BoothError::configuration("surface width exceeds u16"))?;
        let height: u16 = geom
            .surface_height
            .try_into()
            .map_err(|_| BoothError::configuration("surface height exceeds u16"))?;
        let mut ctx = vello_cpu::RenderContext::new(width, height);

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        let bg = layout.bg_color;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            bg.r, bg.g, bg.b, bg.a,
        ));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        let mut skipped_photos = Vec::new();
        for (i, result) in decoded.into_iter().enumerate() {
            let drawn = result.and_then(|img| draw_photo(&mut ctx, &geom, i, &img));
            if let Err(e) = drawn {
                tracing::warn!(photo = i, error = %e, "skipping photo that could not be drawn");
                skipped_photos.push(i);
            }
        }

        let mut text = TextLayoutEngine::new();
        self.draw_decorations(&mut ctx, &mut text, layout, &geom);
        self.draw_branding(&mut ctx, &mut text, &geom, branding);

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        tracing::debug!(
            width = geom.surface_width,
            height = geom.surface_height,
            skipped = skipped_photos.len(),
            "composite rendered"
        );
        Ok(CompositeResult {
            width: geom.surface_width,
            height: geom.surface_height,
            data: pixmap.data_as_u8_slice().to_vec(),
            skipped_photos,
        })
    }

    fn draw_decorations(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        text: &mut TextLayoutEngine,
        layout: &LayoutSpec,
        geom: &CompositeGeometry,
    ) {
        if layout.decorations.is_empty() {
            return;
        }
        let style = &self.config.decoration;

        for (i, deco) in layout.decorations.iter().enumerate() {
            let fonts =
                self.resolve_fonts(&deco.content, &style.families, style.weight, "decoration");
            if fonts.is_empty() {
                return;
            }
            let text_style = TextStyle {
                size_px: (self.config.base_font_size * deco.size_scale) as f32,
                weight: style.weight,
                color: deco.color.unwrap_or(style.color),
            };
            let shaped = match text.shape(&deco.content, &fonts, &text_style) {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!(decoration = i, error = %e, "skipping decoration");
                    continue;
                }
            };

            let pivot = geom.canvas_point(deco.x_frac, deco.y_frac);
            let tr = Affine::translate(pivot.to_vec2())
                * Affine::rotate(deco.rotation_degrees.to_radians())
                * Affine::translate((-shaped.width() / 2.0, -shaped.height() / 2.0));
            draw_text(ctx, &shaped, tr);
        }
    }

    fn draw_branding(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        text: &mut TextLayoutEngine,
        geom: &CompositeGeometry,
        branding: &str,
    ) {
        if branding.trim().is_empty() {
            return;
        }
        let style = &self.config.branding;
        let fonts = self.resolve_fonts(branding, &style.families, style.weight, "branding");
        if fonts.is_empty() {
            return;
        }
        let text_style = TextStyle {
            size_px: style.size_px,
            weight: style.weight,
            color: style.color,
        };
        let shaped = match text.shape(branding, &fonts, &text_style) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "skipping branding line");
                return;
            }
        };

        let baseline_y = f64::from(geom.surface_height) - style.bottom_offset;
        let tr = Affine::translate((
            f64::from(geom.surface_width) / 2.0 - shaped.width() / 2.0,
            baseline_y - shaped.first_baseline(),
        ));
        draw_text(ctx, &shaped, tr);
    }

    fn resolve_fonts(
        &self,
        text: &str,
        families: &[String],
        weight: u16,
        role: &str,
    ) -> Vec<ResolvedFont> {
        let fonts = self.fonts.resolve_for_text(text, families, weight);
        if fonts.is_empty() {
            tracing::warn!(role, ?families, "no font available, text will not be drawn");
        }
        fonts
    }
}

fn draw_photo(
    ctx: &mut vello_cpu::RenderContext,
    geom: &CompositeGeometry,
    index: usize,
    img: &PreparedImage,
) -> BoothResult<()> {
    let pixmap = pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?;
    let paint = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };

    let cell = geom.cell_rect(index);
    let fit = CoverFit::compute(
        f64::from(img.width),
        f64::from(img.height),
        cell.width(),
        cell.height(),
    );
    let src = fit.source_rect(cell.width(), cell.height());

    ctx.set_transform(affine_to_cpu(fit.transform(cell.x0, cell.y0)));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(src.x0, src.y0, src.x1, src.y1));
    Ok(())
}

fn draw_text(ctx: &mut vello_cpu::RenderContext, shaped: &ShapedText, tr: Affine) {
    ctx.set_transform(affine_to_cpu(tr));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    for line in shaped.layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let run_font = run.run().font();
            let Some(font) = shaped.font_for(run_font.data.id(), run_font.index) else {
                tracing::debug!("glyph run shaped with an unregistered font");
                continue;
            };
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> BoothResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BoothError::decode(format!("photo width {width} exceeds u16")))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BoothError::decode(format!("photo height {height} exceeds u16")))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(BoothError::decode("photo byte length does not match its size"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
