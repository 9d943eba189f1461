//! postcraft-io: Browser I/O and Dioxus component library.
//!
//! Reads uploaded images, rasterizes the post card onto a canvas through
//! the `postcraft-export` seams, triggers Blob downloads, and provides the
//! UI components of the postcraft web application.

pub mod canvas;
pub mod capture;
pub mod components;
pub mod download;
pub mod file;
pub mod gate;
pub mod store;

pub use capture::{CaptureError, GeneratedImage, capture};
pub use components::{EditorForm, ImageGenerator, PostPreview};
pub use gate::ExportGate;
pub use store::{PostStore, use_post_store};
