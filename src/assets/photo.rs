use std::sync::Arc;

use crate::assets::decode::{PreparedImage, decode_data_url, decode_image};
use crate::foundation::error::BoothResult;

#[derive(Clone, Debug)]
enum PhotoData {
    Encoded(Arc<[u8]>),
    DataUrl(Arc<str>),
    Raster(PreparedImage),
}

/// One confirmed shot: raster data with its capture filter already baked in.
///
/// Decoding is deferred to [`CapturedPhoto::decode`], so a corrupt shot only fails when the
/// compositor reaches it.
#[derive(Clone, Debug)]
pub struct CapturedPhoto {
    data: PhotoData,
    filter_id: String,
}

impl CapturedPhoto {
    /// Wrap encoded image bytes (PNG, JPEG, ...).
    pub fn from_encoded(bytes: impl Into<Vec<u8>>, filter_id: impl Into<String>) -> Self {
        Self {
            data: PhotoData::Encoded(Arc::from(bytes.into())),
            filter_id: filter_id.into(),
        }
    }

    /// Wrap a `data:image/...;base64,` URL.
    pub fn from_data_url(url: impl Into<String>, filter_id: impl Into<String>) -> Self {
        Self {
            data: PhotoData::DataUrl(Arc::from(url.into())),
            filter_id: filter_id.into(),
        }
    }

    /// Wrap an already decoded straight-alpha RGBA image.
    pub fn from_rgba(img: image::RgbaImage, filter_id: impl Into<String>) -> BoothResult<Self> {
        Ok(Self {
            data: PhotoData::Raster(PreparedImage::from_rgba_image(img)?),
            filter_id: filter_id.into(),
        })
    }

    /// Id of the filter applied at capture time.
    pub fn filter_id(&self) -> &str {
        &self.filter_id
    }

    /// The encoded payload, when the shot was captured or supplied as image bytes.
    pub fn encoded_bytes(&self) -> Option<&[u8]> {
        match &self.data {
            PhotoData::Encoded(bytes) => Some(bytes),
            PhotoData::DataUrl(_) | PhotoData::Raster(_) => None,
        }
    }

    /// Decode to premultiplied RGBA8.
    pub fn decode(&self) -> BoothResult<PreparedImage> {
        match &self.data {
            PhotoData::Encoded(bytes) => decode_image(bytes),
            PhotoData::DataUrl(url) => decode_image(&decode_data_url(url)?),
            PhotoData::Raster(img) => Ok(img.clone()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/photo.rs"]
mod tests;
