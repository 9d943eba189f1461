//! postcraft-core: Post model and preview renderer (sans-IO).
//!
//! Holds the [`PostRecord`] and its partial updates, validates raw form
//! input, and renders the record into a [`Node`] tree describing a
//! LinkedIn-style post card.
//!
//! This crate has **no I/O dependencies**.  The browser view and the PNG
//! exporter both consume the same tree; all DOM and canvas interaction
//! lives in `postcraft-io`.

pub mod data_url;
pub mod icons;
pub mod input;
pub mod preview;
pub mod text;
pub mod types;
pub mod view;

pub use icons::{Icon, IconPaint};
pub use input::{
    InputError, image_from_upload, media_type_from_name, parse_count, profile_picture_from_url,
    validate_image_media_type, validate_image_url,
};
pub use preview::{DEFAULT_PROFILE_PICTURE, PreviewOptions, PreviewVariant, render_preview};
pub use text::{Segment, format_count, split_hashtags, truncate_words};
pub use types::{CountField, ImageField, PostPatch, PostRecord, TextField};
pub use view::{Action, ImageNode, Kind, Node};
