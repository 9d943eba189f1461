//! Browser side of PNG export.
//!
//! [`capture`] runs one export end to end: it loads the card's images,
//! waits for them to settle (isolated mode only), lays the card out with
//! canvas text metrics, replays it onto an offscreen canvas, reads the
//! pixels back, and encodes them.  The canvas and every intermediate
//! tree live only as long as the returned future.

use gloo_timers::future::TimeoutFuture;
use postcraft_core::Node;
use postcraft_export::{
    CaptureMode, Color, EncodeError, ExportConfig, LayoutError, build_display_list, encode_png,
    image_sources, png_data_url, replay,
};
use wasm_bindgen::JsValue;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::canvas::{BrowserMeasure, CanvasSurface, ImageCache, offscreen_canvas};

/// Errors that can occur while capturing the card.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// A browser API call returned an error, including a `SecurityError`
    /// from reading a canvas tainted by a cross-origin image.
    #[error("browser API error: {0}")]
    JsError(String),

    /// The canvas refused to hand out a 2D context.
    #[error("canvas 2D context unavailable")]
    NoContext,

    /// The card could not be laid out.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// The captured pixels could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl From<JsValue> for CaptureError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// A finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Encoded PNG bytes, offered for download.
    pub png: Vec<u8>,
    /// The same PNG as a data URL, shown in the generator panel.
    pub data_url: String,
    /// Suggested download filename.
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// Capture `tree` as a PNG.
///
/// # Errors
///
/// Returns [`CaptureError`] if a browser API fails, the canvas is tainted,
/// or the pixels cannot be encoded.  Nothing is left behind on failure.
pub async fn capture(
    tree: Node,
    mode: CaptureMode,
    config: ExportConfig,
) -> Result<GeneratedImage, CaptureError> {
    let images = ImageCache::load(&image_sources(&tree), config.image_timeout_ms).await;

    let delay = mode.settle_delay_ms(&config);
    if delay > 0 {
        TimeoutFuture::new(delay).await;
    }

    let (canvas, ctx) = offscreen_canvas()?;
    let list = build_display_list(
        &tree,
        mode,
        &config,
        &BrowserMeasure {
            ctx: &ctx,
            images: &images,
        },
    )?;

    // Resizing resets the context, so it happens after measuring and
    // before any drawing.
    let (width, height) = list.pixel_size(config.scale);
    canvas.set_width(width);
    canvas.set_height(height);

    replay(
        &list,
        &mut CanvasSurface {
            ctx: &ctx,
            images: &images,
        },
        config.scale,
        Color::WHITE,
    )?;

    let pixels = ctx
        .get_image_data(0.0, 0.0, f64::from(width), f64::from(height))?
        .data();
    let png = encode_png(width, height, &pixels.0)?;
    let data_url = png_data_url(&png);

    Ok(GeneratedImage {
        png,
        data_url,
        filename: config.download_filename(mode, unix_millis()),
        width,
        height,
    })
}
