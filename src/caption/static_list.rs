use std::sync::Mutex;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::caption::provider::CaptionProvider;
use crate::foundation::error::{BoothError, BoothResult};

const DEFAULT_CAPTIONS: &[&str] = &[
    "Xinh xỉu luôn á! ✨",
    "Giao diện trưởng thành, hệ điều hành cute 🎀",
    "Hôm nay trời đẹp, nhưng không bằng tui ☀️",
    "Vibe này đỉnh nóc kịch trần ☁️",
    "Trạng thái: Đang rất yêu đời 💖",
    "Keo lì tái châu 💅",
    "Cười xinh lung linh 📸",
    "Mười điểm không có nhưng 💯",
    "Dễ thương lạc lối 🌸",
    "Em bé ngoan xinh yêu đây rồi 🥰",
    "Độc lạ Bình Dương nhưng mà cute 😽",
];

/// The built-in caption list.
pub fn default_captions() -> Vec<String> {
    DEFAULT_CAPTIONS.iter().map(|s| (*s).to_owned()).collect()
}

/// Picks a caption uniformly at random from a fixed list. The image is ignored.
pub struct StaticCaptionProvider {
    captions: Vec<String>,
    rng: Mutex<StdRng>,
}

impl StaticCaptionProvider {
    /// Provider over `captions`, seeded from OS entropy.
    pub fn new(captions: Vec<String>) -> Self {
        Self {
            captions,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Provider with a fixed seed, so the sequence of picks is reproducible.
    pub fn with_seed(captions: Vec<String>, seed: u64) -> Self {
        Self {
            captions,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Candidate captions.
    pub fn captions(&self) -> &[String] {
        &self.captions
    }
}

impl Default for StaticCaptionProvider {
    fn default() -> Self {
        Self::new(default_captions())
    }
}

impl CaptionProvider for StaticCaptionProvider {
    fn generate_caption(&self, _image_png: &[u8]) -> BoothResult<String> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| BoothError::caption_provider("caption rng lock poisoned"))?;
        self.captions
            .choose(&mut *rng)
            .cloned()
            .ok_or_else(|| BoothError::caption_provider("caption list is empty"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/caption/static_list.rs"]
mod tests;
