use crate::foundation::error::BoothResult;

/// Produces a short caption for a finished collage.
///
/// Implementations may be slow or fail; callers that must not fail go through
/// [`caption_or_fallback`].
pub trait CaptionProvider: Send + Sync {
    /// Caption the PNG-encoded composite. Failures are [`crate::BoothError::CaptionProvider`].
    fn generate_caption(&self, image_png: &[u8]) -> BoothResult<String>;
}

impl<P: CaptionProvider + ?Sized> CaptionProvider for Box<P> {
    fn generate_caption(&self, image_png: &[u8]) -> BoothResult<String> {
        (**self).generate_caption(image_png)
    }
}

impl<P: CaptionProvider + ?Sized> CaptionProvider for std::sync::Arc<P> {
    fn generate_caption(&self, image_png: &[u8]) -> BoothResult<String> {
        (**self).generate_caption(image_png)
    }
}

/// Ask `provider` for a caption and substitute `fallback` when it fails.
pub fn caption_or_fallback(
    provider: &dyn CaptionProvider,
    image_png: &[u8],
    fallback: &str,
) -> String {
    match provider.generate_caption(image_png) {
        Ok(caption) => caption,
        Err(e) => {
            tracing::warn!(error = %e, "caption provider failed, using fallback caption");
            fallback.to_owned()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/caption/provider.rs"]
mod tests;
