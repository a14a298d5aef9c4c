use rayon::prelude::*;

use crate::foundation::error::{BoothError, BoothResult};

/// One step of a CSS-style filter chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterOp {
    /// `brightness(a)`: multiply color by `a`.
    Brightness(f32),
    /// `contrast(a)`: scale color around mid-gray.
    Contrast(f32),
    /// `saturate(s)`: 0 is gray, 1 is identity, above 1 oversaturates.
    Saturate(f32),
    /// `sepia(a)`, amount clamped to [0, 1].
    Sepia(f32),
    /// `grayscale(a)`, amount clamped to [0, 1].
    Grayscale(f32),
    /// `hue-rotate(deg)`.
    HueRotate(f32),
}

impl FilterOp {
    /// Row-major 3x4 matrix over straight RGB with a trailing offset column.
    pub fn matrix(self) -> [f32; 12] {
        match self {
            Self::Brightness(a) => [a, 0.0, 0.0, 0.0, 0.0, a, 0.0, 0.0, 0.0, 0.0, a, 0.0],
            Self::Contrast(a) => {
                let o = 0.5 - 0.5 * a;
                [a, 0.0, 0.0, o, 0.0, a, 0.0, o, 0.0, 0.0, a, o]
            }
            Self::Saturate(s) => [
                0.213 + 0.787 * s,
                0.715 - 0.715 * s,
                0.072 - 0.072 * s,
                0.0,
                0.213 - 0.213 * s,
                0.715 + 0.285 * s,
                0.072 - 0.072 * s,
                0.0,
                0.213 - 0.213 * s,
                0.715 - 0.715 * s,
                0.072 + 0.928 * s,
                0.0,
            ],
            Self::Sepia(a) => {
                let s = 1.0 - a.clamp(0.0, 1.0);
                [
                    0.393 + 0.607 * s,
                    0.769 - 0.769 * s,
                    0.189 - 0.189 * s,
                    0.0,
                    0.349 - 0.349 * s,
                    0.686 + 0.314 * s,
                    0.168 - 0.168 * s,
                    0.0,
                    0.272 - 0.272 * s,
                    0.534 - 0.534 * s,
                    0.131 + 0.869 * s,
                    0.0,
                ]
            }
            Self::Grayscale(a) => {
                let s = 1.0 - a.clamp(0.0, 1.0);
                [
                    0.2126 + 0.7874 * s,
                    0.7152 - 0.7152 * s,
                    0.0722 - 0.0722 * s,
                    0.0,
                    0.2126 - 0.2126 * s,
                    0.7152 + 0.2848 * s,
                    0.0722 - 0.0722 * s,
                    0.0,
                    0.2126 - 0.2126 * s,
                    0.7152 - 0.7152 * s,
                    0.0722 + 0.9278 * s,
                    0.0,
                ]
            }
            Self::HueRotate(deg) => {
                let (sin, cos) = deg.to_radians().sin_cos();
                [
                    0.213 + cos * 0.787 - sin * 0.213,
                    0.715 - cos * 0.715 - sin * 0.715,
                    0.072 - cos * 0.072 + sin * 0.928,
                    0.0,
                    0.213 - cos * 0.213 + sin * 0.143,
                    0.715 + cos * 0.285 + sin * 0.140,
                    0.072 - cos * 0.072 - sin * 0.283,
                    0.0,
                    0.213 - cos * 0.213 - sin * 0.787,
                    0.715 - cos * 0.715 + sin * 0.715,
                    0.072 + cos * 0.928 + sin * 0.072,
                    0.0,
                ]
            }
        }
    }
}

/// Parse a CSS filter list such as `"brightness(1.1) contrast(0.9) hue-rotate(15deg)"`.
///
/// `"none"` and the empty string parse to an empty chain. Percentages are accepted.
pub fn parse_filter_chain(css: &str) -> BoothResult<Vec<FilterOp>> {
    let css = css.trim();
    if css.is_empty() || css.eq_ignore_ascii_case("none") {
        return Ok(Vec::new());
    }

    let mut ops = Vec::new();
    let mut rest = css;
    while !rest.is_empty() {
        let open = rest
            .find('(')
            .ok_or_else(|| BoothError::validation(format!("filter '{css}': expected '('")))?;
        let close = rest[open..]
            .find(')')
            .map(|i| open + i)
            .ok_or_else(|| BoothError::validation(format!("filter '{css}': expected ')'")))?;
        let name = rest[..open].trim().to_ascii_lowercase();
        let arg = rest[open + 1..close].trim();

        let op = match name.as_str() {
            "brightness" => FilterOp::Brightness(parse_amount(css, arg)?),
            "contrast" => FilterOp::Contrast(parse_amount(css, arg)?),
            "saturate" => FilterOp::Saturate(parse_amount(css, arg)?),
            "sepia" => FilterOp::Sepia(parse_amount(css, arg)?),
            "grayscale" => FilterOp::Grayscale(parse_amount(css, arg)?),
            "hue-rotate" => FilterOp::HueRotate(parse_angle(css, arg)?),
            other => {
                return Err(BoothError::validation(format!(
                    "filter '{css}': unsupported function '{other}'"
                )));
            }
        };
        ops.push(op);
        rest = rest[close + 1..].trim_start();
    }
    Ok(ops)
}

fn parse_amount(css: &str, arg: &str) -> BoothResult<f32> {
    let (num, scale) = match arg.strip_suffix('%') {
        Some(n) => (n, 0.01),
        None => (arg, 1.0),
    };
    let v: f32 = num
        .trim()
        .parse()
        .map_err(|_| BoothError::validation(format!("filter '{css}': invalid amount '{arg}'")))?;
    let v = v * scale;
    if !v.is_finite() || v < 0.0 {
        return Err(BoothError::validation(format!(
            "filter '{css}': amount must be finite and >= 0, got '{arg}'"
        )));
    }
    Ok(v)
}

fn parse_angle(css: &str, arg: &str) -> BoothResult<f32> {
    let num = arg.strip_suffix("deg").unwrap_or(arg);
    let v: f32 = num
        .trim()
        .parse()
        .map_err(|_| BoothError::validation(format!("filter '{css}': invalid angle '{arg}'")))?;
    if !v.is_finite() {
        return Err(BoothError::validation(format!(
            "filter '{css}': angle must be finite"
        )));
    }
    Ok(v)
}

/// A named capture look.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    /// Stable identifier stored on captured photos.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Source CSS filter list.
    pub css: String,
    /// Parsed chain, applied left to right.
    pub ops: Vec<FilterOp>,
}

impl Filter {
    /// Build a filter from a CSS filter list.
    pub fn new(id: impl Into<String>, name: impl Into<String>, css: &str) -> BoothResult<Self> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            css: css.to_owned(),
            ops: parse_filter_chain(css)?,
        })
    }

    /// `true` when the chain is empty.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// Apply the chain to a straight-alpha image. Alpha is left untouched.
    pub fn apply(&self, img: &image::RgbaImage) -> image::RgbaImage {
        let mut out = img.clone();
        if self.is_identity() {
            return out;
        }
        let matrices: Vec<[f32; 12]> = self.ops.iter().map(|op| op.matrix()).collect();
        let row_len = (img.width() as usize).saturating_mul(4).max(4);
        let buf: &mut [u8] = &mut out;
        buf.par_chunks_mut(row_len).for_each(|row| {
            for px in row.chunks_exact_mut(4) {
                apply_matrices_px(px, &matrices);
            }
        });
        out
    }
}

fn apply_matrices_px(px: &mut [u8], matrices: &[[f32; 12]]) {
    let mut r = f32::from(px[0]) / 255.0;
    let mut g = f32::from(px[1]) / 255.0;
    let mut b = f32::from(px[2]) / 255.0;
    for m in matrices {
        let nr = (m[0] * r + m[1] * g + m[2] * b + m[3]).clamp(0.0, 1.0);
        let ng = (m[4] * r + m[5] * g + m[6] * b + m[7]).clamp(0.0, 1.0);
        let nb = (m[8] * r + m[9] * g + m[10] * b + m[11]).clamp(0.0, 1.0);
        r = nr;
        g = ng;
        b = nb;
    }
    px[0] = (r * 255.0).round() as u8;
    px[1] = (g * 255.0).round() as u8;
    px[2] = (b * 255.0).round() as u8;
}

const BUILTIN_FILTERS: &[(&str, &str, &str)] = &[
    ("normal", "Tự nhiên", "none"),
    (
        "korean",
        "Hàn Quốc",
        "brightness(1.1) contrast(0.9) saturate(1.1) sepia(0.1)",
    ),
    (
        "peach",
        "Đào Tươi",
        "brightness(1.1) saturate(1.5) contrast(0.9) sepia(0.2)",
    ),
    (
        "vintage",
        "Phim Cũ",
        "sepia(0.4) contrast(1.25) grayscale(0.2)",
    ),
    (
        "retro90s",
        "1990s",
        "contrast(1.25) brightness(0.9) saturate(1.5) sepia(0.2)",
    ),
    (
        "summer",
        "Mùa Hè",
        "brightness(1.1) saturate(1.8) contrast(0.9) sepia(0.1)",
    ),
    (
        "bw",
        "Đen Trắng",
        "grayscale(1) contrast(1.25) brightness(1.1)",
    ),
    (
        "dreamy",
        "Mơ Mộng",
        "brightness(1.25) saturate(0.5) hue-rotate(15deg)",
    ),
    ("lomo", "Lomo", "contrast(1.4) saturate(1.3)"),
    (
        "cool",
        "Lạnh Lùng",
        "saturate(0.5) contrast(1.1) brightness(1.1) hue-rotate(10deg)",
    ),
];

/// The built-in capture filters, in display order.
pub fn builtin_filters() -> Vec<Filter> {
    BUILTIN_FILTERS
        .iter()
        .filter_map(|(id, name, css)| match Filter::new(*id, *name, css) {
            Ok(f) => Some(f),
            Err(e) => {
                tracing::warn!(filter = id, error = %e, "skipping malformed built-in filter");
                None
            }
        })
        .collect()
}

/// Look up a built-in filter by id.
pub fn filter_by_id(id: &str) -> BoothResult<Filter> {
    builtin_filters()
        .into_iter()
        .find(|f| f.id == id)
        .ok_or_else(|| BoothError::validation(format!("unknown filter id '{id}'")))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
