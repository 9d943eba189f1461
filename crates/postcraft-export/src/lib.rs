//! postcraft-export: Capture pipeline for the post card (sans-IO).
//!
//! Turns a rendered [`postcraft_core::Node`] tree into a PNG:
//!
//! 1. [`capture::prepare`] picks the tree to capture (an isolated copy or
//!    the live one),
//! 2. [`style::style_tree`] resolves Tailwind classes,
//!    [`normalize::normalize`] pins down styles the isolated capture
//!    needs,
//! 3. [`layout::layout_tree`] and [`layout::paint`] produce a
//!    [`DisplayList`],
//! 4. the browser replays it onto a canvas through [`Surface`], and
//!    [`png::encode_png`] encodes the pixels it reads back.
//!
//! Text metrics and image sizes come in through [`Measure`]; pixels go out
//! through [`Surface`].  Both are implemented by `postcraft-io`.

pub mod capture;
pub mod config;
pub mod layout;
pub mod normalize;
pub mod paint;
pub mod png;
pub mod style;

pub use capture::{CaptureMode, build_display_list, image_sources, isolate, prepare};
pub use config::ExportConfig;
pub use layout::{LayoutBox, LayoutError, Measure, layout_tree, paint};
pub use paint::{DisplayList, FONT_FAMILY, Font, PaintCommand, Rect, Surface, replay};
pub use png::{EncodeError, encode_png, flatten_onto_white, png_data_url};
pub use style::{Color, Viewport};
