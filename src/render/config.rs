use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{BoothError, BoothResult};
use crate::layout::geometry::MAX_SURFACE_DIM;

/// Environment variable naming an extra font directory (`:`-separated list on Unix).
pub const FONT_DIR_ENV: &str = "PHOTOBOOTH_FONT_DIR";

/// Style of the sticker glyphs placed over the grid.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecorationStyle {
    /// Fill used when a decoration carries no color of its own.
    pub color: Rgba8,
    /// Font weight.
    pub weight: u16,
    /// Family preference list.
    pub families: Vec<String>,
}

impl Default for DecorationStyle {
    fn default() -> Self {
        Self {
            color: Rgba8::BLACK,
            weight: 400,
            families: vec!["serif".to_owned()],
        }
    }
}

/// Style and placement of the branding line.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrandingStyle {
    /// Text fill.
    pub color: Rgba8,
    /// Font weight.
    pub weight: u16,
    /// Font size in pixels.
    pub size_px: f32,
    /// Family preference list.
    pub families: Vec<String>,
    /// Distance from the bottom edge to the alphabetic baseline.
    pub bottom_offset: f64,
}

impl Default for BrandingStyle {
    fn default() -> Self {
        Self {
            color: Rgba8::rgb(0xdb, 0x27, 0x77),
            weight: 700,
            size_px: 30.0,
            families: vec!["Quicksand".to_owned(), "sans-serif".to_owned()],
            bottom_offset: 40.0,
        }
    }
}

/// Compositor settings. Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompositorConfig {
    /// Output width in pixels.
    pub export_width: u32,
    /// Height added below the grid for the branding line.
    pub branding_reserve: f64,
    /// Decoration font size at `size_scale == 1`.
    pub base_font_size: f64,
    /// Decoration text style.
    pub decoration: DecorationStyle,
    /// Branding text style.
    pub branding: BrandingStyle,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` files.
    pub font_dirs: Vec<PathBuf>,
    /// Whether installed system fonts are loaded.
    pub system_fonts: bool,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            export_width: 1200,
            branding_reserve: 100.0,
            base_font_size: 40.0,
            decoration: DecorationStyle::default(),
            branding: BrandingStyle::default(),
            font_dirs: Vec::new(),
            system_fonts: true,
        }
    }
}

impl CompositorConfig {
    /// Parse a config from a JSON reader. Missing keys take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> BoothResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| BoothError::configuration(format!("parse compositor config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> BoothResult<Self> {
        Self::from_reader(json.as_bytes())
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BoothResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BoothError::configuration(format!(
                "open compositor config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Font directories from the config followed by those named in [`FONT_DIR_ENV`].
    pub fn effective_font_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self.font_dirs.clone();
        if let Some(v) = std::env::var_os(FONT_DIR_ENV) {
            dirs.extend(std::env::split_paths(&v).filter(|p| !p.as_os_str().is_empty()));
        }
        dirs
    }

    /// Reject values that cannot produce a surface.
    pub fn validate(&self) -> BoothResult<()> {
        if self.export_width == 0 || self.export_width > MAX_SURFACE_DIM {
            return Err(BoothError::configuration(format!(
                "exportWidth must be in 1..={MAX_SURFACE_DIM}, got {}",
                self.export_width
            )));
        }
        if !self.branding_reserve.is_finite() || self.branding_reserve < 0.0 {
            return Err(BoothError::configuration(
                "brandingReserve must be finite and >= 0",
            ));
        }
        if !self.base_font_size.is_finite() || self.base_font_size <= 0.0 {
            return Err(BoothError::configuration(
                "baseFontSize must be finite and > 0",
            ));
        }
        if !self.branding.size_px.is_finite() || self.branding.size_px <= 0.0 {
            return Err(BoothError::configuration(
                "branding.sizePx must be finite and > 0",
            ));
        }
        if !self.branding.bottom_offset.is_finite() {
            return Err(BoothError::configuration(
                "branding.bottomOffset must be finite",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/config.rs"]
mod tests;
