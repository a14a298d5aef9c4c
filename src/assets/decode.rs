use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::foundation::error::{BoothError, BoothResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Premultiply a straight-alpha RGBA image.
    pub fn from_rgba_image(img: image::RgbaImage) -> BoothResult<Self> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(BoothError::decode(format!(
                "image has empty dimensions {width}x{height}"
            )));
        }
        let mut rgba8_premul = img.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> BoothResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| BoothError::decode(format!("decode image from memory: {e}")))?;
    PreparedImage::from_rgba_image(dyn_img.to_rgba8())
}

/// Extract the payload of a base64 `data:` URL such as `data:image/png;base64,iVBOR...`.
pub fn decode_data_url(url: &str) -> BoothResult<Vec<u8>> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| BoothError::decode("data URL must start with 'data:'"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| BoothError::decode("data URL is missing the ',' separator"))?;
    if !meta.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err(BoothError::decode(
            "only base64-encoded data URLs are supported",
        ));
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|e| BoothError::decode(format!("invalid base64 payload in data URL: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
