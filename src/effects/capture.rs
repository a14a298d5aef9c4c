use crate::assets::photo::CapturedPhoto;
use crate::effects::filter::Filter;
use crate::encode::png::encode_rgba8_png;
use crate::foundation::error::{BoothError, BoothResult};

/// Flip an image left-to-right, as a front camera preview shows it.
pub fn mirror_horizontal(img: &image::RgbaImage) -> image::RgbaImage {
    image::imageops::flip_horizontal(img)
}

impl CapturedPhoto {
    /// Turn a raw camera frame into a confirmed-quality shot.
    ///
    /// The frame is mirrored first when `mirror` is set, then `filter` is baked into the pixels
    /// and the result is stored as PNG tagged with the filter id.
    pub fn capture(frame: &image::RgbaImage, filter: &Filter, mirror: bool) -> BoothResult<Self> {
        let (w, h) = frame.dimensions();
        if w == 0 || h == 0 {
            return Err(BoothError::validation(format!(
                "camera frame has empty dimensions {w}x{h}"
            )));
        }

        let filtered = if mirror {
            filter.apply(&mirror_horizontal(frame))
        } else {
            filter.apply(frame)
        };
        let png = encode_rgba8_png(w, h, filtered.as_raw())?;
        tracing::debug!(filter = %filter.id, mirror, width = w, height = h, bytes = png.len(), "captured photo");
        Ok(Self::from_encoded(png, filter.id.clone()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/capture.rs"]
mod tests;
