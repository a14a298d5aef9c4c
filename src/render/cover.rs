use crate::foundation::core::{Affine, Rect};

/// Uniform scale and centering offsets that make an image fully cover a target box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    /// Uniform scale applied to the source image.
    pub scale: f64,
    /// Horizontal overflow trimmed from each side, in output pixels.
    pub shift_x: f64,
    /// Vertical overflow trimmed from each side, in output pixels.
    pub shift_y: f64,
}

impl CoverFit {
    /// Fit an `iw x ih` image into a `w x h` box.
    ///
    /// `scale = max(w/iw, h/ih)`; the scaled image overflows in at most one dimension and the
    /// overflow is split evenly between both sides.
    pub fn compute(iw: f64, ih: f64, w: f64, h: f64) -> Self {
        let scale = (w / iw).max(h / ih);
        Self {
            scale,
            shift_x: (iw * scale - w) / 2.0,
            shift_y: (ih * scale - h) / 2.0,
        }
    }

    /// Image-to-canvas transform for a box whose top-left corner is `(x, y)`.
    pub fn transform(&self, x: f64, y: f64) -> Affine {
        Affine::translate((x - self.shift_x, y - self.shift_y)) * Affine::scale(self.scale)
    }

    /// The visible part of the source image, in image coordinates, for a `w x h` box.
    ///
    /// Filling this rectangle under [`CoverFit::transform`] paints exactly the target box.
    pub fn source_rect(&self, w: f64, h: f64) -> Rect {
        Rect::new(
            self.shift_x / self.scale,
            self.shift_y / self.scale,
            (self.shift_x + w) / self.scale,
            (self.shift_y + h) / self.scale,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cover.rs"]
mod tests;
