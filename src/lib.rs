//! Photobooth collage compositor.
//!
//! Confirmed shots are laid out on a preset grid with cover-fit cropping, decorated with sticker
//! glyphs and finished with a branding line, all rendered on the CPU:
//!
//! - Pick a [`LayoutSpec`] (see [`builtin_layouts`]) and a capture [`Filter`]
//! - Turn camera frames into [`CapturedPhoto`]s with [`CapturedPhoto::capture`]
//! - Render them with a [`Compositor`] into a [`CompositeResult`], then encode PNG
//!
//! [`BoothSession`] wraps the same steps in an explicit capture workflow.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod caption;
mod effects;
mod encode;
mod foundation;
mod layout;
mod render;
mod session;

pub use crate::foundation::core::{Affine, Point, Rect, Rgba8};
pub use crate::foundation::error::{BoothError, BoothResult};

pub use crate::assets::decode::{PreparedImage, decode_data_url, decode_image};
pub use crate::assets::fonts::{FontBook, ResolvedFont};
pub use crate::assets::photo::CapturedPhoto;
pub use crate::caption::command::CommandCaptionProvider;
pub use crate::caption::provider::{CaptionProvider, caption_or_fallback};
pub use crate::caption::static_list::{StaticCaptionProvider, default_captions};
pub use crate::effects::capture::mirror_horizontal;
pub use crate::effects::filter::{
    Filter, FilterOp, builtin_filters, filter_by_id, parse_filter_chain,
};
pub use crate::encode::png::{
    PNG_DATA_URL_PREFIX, encode_rgba8_png, export_file_name, png_data_url,
};
pub use crate::layout::catalog::{builtin_layouts, layout_by_id};
pub use crate::layout::geometry::{CompositeGeometry, GridCell, MAX_SURFACE_DIM, grid_cell};
pub use crate::layout::spec::{DecorationSpec, LayoutSpec};
pub use crate::render::compositor::{CompositeResult, Compositor};
pub use crate::render::config::{BrandingStyle, CompositorConfig, DecorationStyle, FONT_DIR_ENV};
pub use crate::render::cover::CoverFit;
pub use crate::session::booth::{
    BoothExport, BoothMode, BoothSession, DEFAULT_BRANDING, TIMER_CHOICES,
};
