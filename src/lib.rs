//! Coverart is a rendering engine for square album-cover images.
//!
//! A cover is one background photo plus two styled caption lines ("top" and
//! "bottom"), described by a [`CoverProperties`] parameter set against a
//! canonical 1500x1500 canvas. The engine turns parameters plus a background
//! into deterministic pixels, and turns persisted records into parameters and
//! back.
//!
//! # Pipeline overview
//!
//! 1. **Model**: [`CoverProperties`] <-> [`CoverRecord`] (persisted form)
//! 2. **Layout**: parameters + a target size -> placed text lines
//!    ([`place_lines`]); pure geometry, scale-invariant up to one factor
//! 3. **Render**: [`Compositor`] rasterizes background + lines at the fixed
//!    1500x1500 export size; [`PreviewRenderer`] does the same at arbitrary
//!    viewport sizes for live editing
//! 4. **Derive**: [`thumbnail`] scales a finished render down;
//!    [`extract_palette`] + [`ColorCache`] memoize per-background palettes
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: identical inputs yield identical pixels.
//! - **Total rendering**: given a decoded background, rendering never fails;
//!   font misses and corrupt persisted colors degrade to documented defaults.
//!   The one surfaced failure is a background that cannot be loaded.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod cache;
mod foundation;
mod layout;
mod model;
mod render;

pub use assets::decode::decode_background;
pub use assets::fonts::{FontLibrary, ResolvedFont, TextBrushRgba8, TextShaper};
pub use assets::palette::{Palette, extract_palette};
pub use assets::store::{BackgroundStore, PreparedImage, normalize_rel_path};
pub use cache::colors::ColorCache;
pub use foundation::core::{
    CANVAS_UNITS, Point, Rect, Rgba8, TextAlignment, Vec2, align_to_int, int_to_align,
};
pub use foundation::error::{CoverError, CoverResult};
pub use layout::engine::{PlacedLine, place_lines, scale_factor, text_box};
pub use model::props::{CoverProperties, DEFAULT_ALIGNMENT_PADDING};
pub use model::record::{CoverRecord, archive_color, now_millis, unarchive_color};
pub use render::compositor::{COVER_SIZE_PX, Compositor};
pub use render::frame::FrameRGBA;
pub use render::preview::PreviewRenderer;
pub use render::thumbnail::thumbnail;
