use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::foundation::error::{BoothError, BoothResult};
use crate::render::compositor::CompositeResult;

/// MIME prefix of every exported data URL.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode straight-alpha RGBA8 pixels as PNG.
pub fn encode_rgba8_png(width: u32, height: u32, rgba: &[u8]) -> BoothResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(width, height, rgba.to_vec()).ok_or_else(|| {
        BoothError::encode(format!(
            "pixel buffer of {} bytes does not match {width}x{height}",
            rgba.len()
        ))
    })?;
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)
        .map_err(|e| BoothError::encode(format!("write PNG: {e}")))?;
    Ok(buffer.into_inner())
}

/// Wrap PNG bytes in a `data:image/png;base64,` URL.
pub fn png_data_url(png: &[u8]) -> String {
    let mut url = String::with_capacity(PNG_DATA_URL_PREFIX.len() + png.len().div_ceil(3) * 4);
    url.push_str(PNG_DATA_URL_PREFIX);
    STANDARD.encode_string(png, &mut url);
    url
}

/// Download name for an export made at `unix_millis`.
pub fn export_file_name(unix_millis: u128) -> String {
    format!("photobooth-{unix_millis}.png")
}

impl CompositeResult {
    /// Encode the composite as PNG.
    pub fn encode_png(&self) -> BoothResult<Vec<u8>> {
        let img = self.to_rgba_image()?;
        encode_rgba8_png(img.width(), img.height(), img.as_raw())
    }

    /// Encode the composite as a PNG data URL.
    pub fn to_data_url(&self) -> BoothResult<String> {
        Ok(png_data_url(&self.encode_png()?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
