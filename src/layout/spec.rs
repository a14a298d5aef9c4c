use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{BoothError, BoothResult};

/// A named collage preset: grid geometry, spacing, background and fixed stickers.
///
/// JSON keys follow the preset option names (`rows`, `cols`, `gap`, `padding`, `bgColor`,
/// `aspectRatio`, `decorations`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSpec {
    /// Stable catalog identifier (e.g. `grid-4`).
    pub id: String,
    /// Human readable display name.
    #[serde(default)]
    pub name: String,
    /// Grid rows, >= 1.
    pub rows: u32,
    /// Grid columns, >= 1.
    pub cols: u32,
    /// Spacing between cells in pixels.
    pub gap: f64,
    /// Outer margin around the grid in pixels.
    pub padding: f64,
    /// Canvas fill drawn before any photo.
    pub bg_color: Rgba8,
    /// Width / height of one photo cell.
    pub aspect_ratio: f64,
    /// Stickers stamped over the photos, in drawing order.
    #[serde(default)]
    pub decorations: Vec<DecorationSpec>,
}

/// A glyph or short text stamped at a canvas-relative position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecorationSpec {
    /// Glyph or text to draw.
    pub content: String,
    /// Horizontal anchor as a fraction of the final canvas width.
    #[serde(rename = "xPct", alias = "xFrac")]
    pub x_frac: f64,
    /// Vertical anchor as a fraction of the final canvas height.
    #[serde(rename = "yPct", alias = "yFrac")]
    pub y_frac: f64,
    /// Multiplier on the configured base font size.
    #[serde(rename = "size", alias = "sizeScale")]
    pub size_scale: f64,
    /// Clockwise rotation about the anchor.
    #[serde(rename = "rotation", alias = "rotationDegrees", default)]
    pub rotation_degrees: f64,
    /// Fill color; falls back to the compositor's decoration color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba8>,
}

impl DecorationSpec {
    /// Decoration with no rotation and the default color.
    pub fn new(content: impl Into<String>, x_frac: f64, y_frac: f64, size_scale: f64) -> Self {
        Self {
            content: content.into(),
            x_frac,
            y_frac,
            size_scale,
            rotation_degrees: 0.0,
            color: None,
        }
    }

    /// Set the rotation in degrees.
    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    /// Set an explicit fill color.
    pub fn with_color(mut self, color: Rgba8) -> Self {
        self.color = Some(color);
        self
    }

    pub(crate) fn validate(&self, idx: usize) -> BoothResult<()> {
        let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in_unit(self.x_frac) || !in_unit(self.y_frac) {
            return Err(BoothError::configuration(format!(
                "decoration {idx}: position fractions must lie in [0, 1], got ({}, {})",
                self.x_frac, self.y_frac
            )));
        }
        if !self.size_scale.is_finite() || self.size_scale <= 0.0 {
            return Err(BoothError::configuration(format!(
                "decoration {idx}: size scale must be finite and > 0, got {}",
                self.size_scale
            )));
        }
        if !self.rotation_degrees.is_finite() {
            return Err(BoothError::configuration(format!(
                "decoration {idx}: rotation must be finite"
            )));
        }
        Ok(())
    }
}

impl LayoutSpec {
    /// Number of photo slots (`rows * cols`).
    pub fn capacity(&self) -> usize {
        (self.rows as usize).saturating_mul(self.cols as usize)
    }

    /// Parse a layout from JSON text.
    pub fn from_json(s: &str) -> BoothResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| BoothError::configuration(format!("invalid layout JSON: {e}")))
    }

    /// Check the descriptor fields that do not depend on the export width.
    ///
    /// Cell sizes are checked by [`CompositeGeometry::compute`](crate::CompositeGeometry::compute).
    pub fn validate(&self) -> BoothResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(BoothError::configuration(format!(
                "layout '{}': rows and cols must be >= 1, got {}x{}",
                self.id, self.rows, self.cols
            )));
        }
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(BoothError::configuration(format!(
                "layout '{}': aspect ratio must be finite and > 0, got {}",
                self.id, self.aspect_ratio
            )));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(BoothError::configuration(format!(
                "layout '{}': gap must be finite and >= 0, got {}",
                self.id, self.gap
            )));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(BoothError::configuration(format!(
                "layout '{}': padding must be finite and >= 0, got {}",
                self.id, self.padding
            )));
        }
        for (idx, deco) in self.decorations.iter().enumerate() {
            deco.validate(idx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/spec.rs"]
mod tests;
