//! Dioxus UI components for postcraft.
//!
//! Provides the editor form, the DOM rendering of the post card, and the
//! image generator panel.

mod form;
mod generator;
mod preview;

pub use form::EditorForm;
pub use generator::ImageGenerator;
pub use preview::PostPreview;
