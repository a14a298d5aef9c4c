use super::*;
use crate::foundation::error::BoothError;

struct Fixed(&'static str);

impl CaptionProvider for Fixed {
    fn generate_caption(&self, _image_png: &[u8]) -> BoothResult<String> {
        Ok(self.0.to_owned())
    }
}

struct Failing;

impl CaptionProvider for Failing {
    fn generate_caption(&self, _image_png: &[u8]) -> BoothResult<String> {
        Err(BoothError::caption_provider("service unavailable"))
    }
}

#[test]
fn success_passes_caption_through() {
    assert_eq!(caption_or_fallback(&Fixed("hi"), b"png", "fb"), "hi");
}

#[test]
fn failure_uses_fallback() {
    assert_eq!(caption_or_fallback(&Failing, b"png", "fb"), "fb");
}

#[test]
fn boxed_and_shared_providers_delegate() {
    let boxed: Box<dyn CaptionProvider> = Box::new(Fixed("boxed"));
    assert_eq!(boxed.generate_caption(&[]).unwrap(), "boxed");
    let shared: std::sync::Arc<dyn CaptionProvider> = std::sync::Arc::new(Failing);
    assert!(shared.generate_caption(&[]).is_err());
}
