//! Canvas 2D implementations of the export seams.
//!
//! [`BrowserMeasure`] answers text-width and image-size queries for
//! layout, and [`CanvasSurface`] replays a display list onto an offscreen
//! `<canvas>`.  Images are fetched once into an [`ImageCache`] before
//! either is used.

use std::collections::HashMap;
use std::pin::pin;

use futures::future::{Either, join_all, select};
use gloo_timers::future::TimeoutFuture;
use postcraft_core::{Icon, IconPaint};
use postcraft_export::{Color, Font, Measure, Rect, Surface};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Path2d};

use crate::capture::CaptureError;

/// Decoded images keyed by their source.
#[derive(Default)]
pub struct ImageCache {
    images: HashMap<String, HtmlImageElement>,
}

impl ImageCache {
    /// Load and decode every source concurrently.
    ///
    /// Images are requested with `crossOrigin=anonymous` so servers that
    /// allow it do not taint the canvas.  A source that fails to load, or
    /// is still decoding after `timeout_ms`, is logged and left out; the
    /// exporter paints its fallback instead.
    pub async fn load(sources: &[String], timeout_ms: u32) -> Self {
        let decodes = sources.iter().map(|src| async move {
            let decoded = with_timeout(decode_image(src), TimeoutFuture::new(timeout_ms)).await;
            (src, decoded)
        });
        let mut cache = Self::default();
        for (src, decoded) in join_all(decodes).await {
            let message = match decoded {
                Some(Ok(img)) => {
                    cache.images.insert(src.clone(), img);
                    continue;
                }
                Some(Err(e)) => format!("postcraft: image did not load, using fallback: {e:?}"),
                None => format!("postcraft: image timed out after {timeout_ms}ms: {src}"),
            };
            web_sys::console::warn_1(&message.into());
        }
        cache
    }

    #[must_use]
    pub fn get(&self, src: &str) -> Option<&HtmlImageElement> {
        self.images.get(src)
    }
}

/// Resolve `fut`, or `None` if `timeout` finishes first.
async fn with_timeout<F: Future>(fut: F, timeout: impl Future<Output = ()>) -> Option<F::Output> {
    match select(pin!(fut), pin!(timeout)).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(((), _)) => None,
    }
}

async fn decode_image(src: &str) -> Result<HtmlImageElement, JsValue> {
    let img = HtmlImageElement::new()?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(src);
    JsFuture::from(img.decode()).await?;
    Ok(img)
}

/// Create a detached canvas and its 2D context.
///
/// The canvas is never attached to the document; dropping both handles
/// releases it.
///
/// # Errors
///
/// Returns [`CaptureError::JsError`] if the browser objects are missing
/// and [`CaptureError::NoContext`] if the canvas has no 2D context.
pub fn offscreen_canvas() -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), CaptureError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| CaptureError::JsError("no document".into()))?;
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|e| CaptureError::JsError(format!("failed to cast element: {e:?}")))?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or(CaptureError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| CaptureError::NoContext)?;
    Ok((canvas, ctx))
}

/// Text metrics from a canvas context and sizes from loaded images.
pub struct BrowserMeasure<'a> {
    pub ctx: &'a CanvasRenderingContext2d,
    pub images: &'a ImageCache,
}

impl Measure for BrowserMeasure<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn text_width(&self, text: &str, font: &Font) -> f32 {
        self.ctx.set_font(&font.to_css());
        self.ctx
            .measure_text(text)
            .map_or(0.0, |metrics| metrics.width() as f32)
    }

    #[expect(clippy::cast_precision_loss)]
    fn image_size(&self, src: &str) -> Option<(f32, f32)> {
        let img = self.images.get(src)?;
        let (w, h) = (img.natural_width(), img.natural_height());
        (w > 0 && h > 0).then_some((w as f32, h as f32))
    }
}

/// Replays paint commands onto a 2D context.
pub struct CanvasSurface<'a> {
    pub ctx: &'a CanvasRenderingContext2d,
    pub images: &'a ImageCache,
}

impl CanvasSurface<'_> {
    /// Start a path tracing `rect` with corner `radius`.
    fn trace(&self, rect: Rect, radius: f32) -> Result<(), JsValue> {
        let (x, y, w, h) = (
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
        let r = f64::from(radius).min(w / 2.0).min(h / 2.0).max(0.0);
        self.ctx.begin_path();
        if r == 0.0 {
            self.ctx.rect(x, y, w, h);
            return Ok(());
        }
        self.ctx.move_to(x + r, y);
        self.ctx.arc_to(x + w, y, x + w, y + h, r)?;
        self.ctx.arc_to(x + w, y + h, x, y + h, r)?;
        self.ctx.arc_to(x, y + h, x, y, r)?;
        self.ctx.arc_to(x, y, x + w, y, r)?;
        self.ctx.close_path();
        Ok(())
    }
}

/// Source rectangle that crops an image to cover a box of the given
/// aspect ratio, centred.
fn cover_crop(natural: (f64, f64), target: (f64, f64)) -> (f64, f64, f64, f64) {
    let (nw, nh) = natural;
    let (tw, th) = target;
    if tw <= 0.0 || th <= 0.0 {
        return (0.0, 0.0, nw, nh);
    }
    let scale = (tw / nw).max(th / nh);
    let (sw, sh) = (tw / scale, th / scale);
    ((nw - sw) / 2.0, (nh - sh) / 2.0, sw, sh)
}

impl Surface for CanvasSurface<'_> {
    type Error = CaptureError;

    fn set_scale(&mut self, scale: f32) -> Result<(), CaptureError> {
        let s = f64::from(scale);
        self.ctx.set_transform(s, 0.0, 0.0, s, 0.0, 0.0)?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, radius: f32, color: Color) -> Result<(), CaptureError> {
        self.ctx.set_fill_style_str(&color.to_css());
        if radius <= 0.0 {
            self.ctx.fill_rect(
                f64::from(rect.x),
                f64::from(rect.y),
                f64::from(rect.width),
                f64::from(rect.height),
            );
        } else {
            self.trace(rect, radius)?;
            self.ctx.fill();
        }
        Ok(())
    }

    fn stroke_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        width: f32,
        color: Color,
    ) -> Result<(), CaptureError> {
        // Strokes straddle the path; inset by half the width to stay
        // inside the border box.
        let half = width / 2.0;
        let inset = Rect::new(
            rect.x + half,
            rect.y + half,
            (rect.width - width).max(0.0),
            (rect.height - width).max(0.0),
        );
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(f64::from(width));
        self.trace(inset, (radius - half).max(0.0))?;
        self.ctx.stroke();
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: &Font,
        color: Color,
    ) -> Result<(), CaptureError> {
        self.ctx.set_font(&font.to_css());
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_text(text, f64::from(x), f64::from(y))?;
        Ok(())
    }

    fn draw_image(&mut self, rect: Rect, src: &str) -> Result<bool, CaptureError> {
        let Some(img) = self.images.get(src) else {
            return Ok(false);
        };
        let natural = (f64::from(img.natural_width()), f64::from(img.natural_height()));
        if natural.0 <= 0.0 || natural.1 <= 0.0 {
            return Ok(false);
        }
        let (dw, dh) = (f64::from(rect.width), f64::from(rect.height));
        let (sx, sy, sw, sh) = cover_crop(natural, (dw, dh));
        self.ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                img,
                sx,
                sy,
                sw,
                sh,
                f64::from(rect.x),
                f64::from(rect.y),
                dw,
                dh,
            )?;
        Ok(true)
    }

    fn draw_icon(&mut self, rect: Rect, icon: Icon, color: Color) -> Result<(), CaptureError> {
        let view_box = f64::from(icon.view_box());
        let css = color.to_css();
        self.ctx.save();
        self.ctx.translate(f64::from(rect.x), f64::from(rect.y))?;
        self.ctx
            .scale(f64::from(rect.width) / view_box, f64::from(rect.height) / view_box)?;
        match icon.paint() {
            IconPaint::Fill => self.ctx.set_fill_style_str(&css),
            IconPaint::Stroke(width) => {
                self.ctx.set_stroke_style_str(&css);
                self.ctx.set_line_width(f64::from(width));
                self.ctx.set_line_cap("round");
                self.ctx.set_line_join("round");
            }
        }
        for d in icon.paths() {
            let path = Path2d::new_with_path_string(d)?;
            match icon.paint() {
                IconPaint::Fill => self.ctx.fill_with_path_2d(&path),
                IconPaint::Stroke(_) => self.ctx.stroke_with_path(&path),
            }
        }
        self.ctx.restore();
        Ok(())
    }

    fn push_clip(&mut self, rect: Rect, radius: f32) -> Result<(), CaptureError> {
        self.ctx.save();
        self.trace(rect, radius)?;
        self.ctx.clip();
        Ok(())
    }

    fn pop_clip(&mut self) -> Result<(), CaptureError> {
        self.ctx.restore();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::future::{pending, ready};

    use futures::executor::block_on;

    use super::*;

    #[test]
    fn finished_work_beats_the_timeout() {
        assert_eq!(block_on(with_timeout(ready(7), pending::<()>())), Some(7));
        // Both ready: the work is polled first.
        assert_eq!(block_on(with_timeout(ready("decoded"), ready(()))), Some("decoded"));
    }

    #[test]
    fn elapsed_timeout_means_not_loaded() {
        assert_eq!(block_on(with_timeout(pending::<u8>(), ready(()))), None);
    }

    #[test]
    fn cover_crop_trims_the_long_side() {
        // 1260x750 into a 512x400 box: height-bound, so the sides go.
        let (sx, sy, sw, sh) = cover_crop((1260.0, 750.0), (512.0, 400.0));
        assert!((sh - 750.0).abs() < 1e-9);
        assert!((sw - 960.0).abs() < 1e-9);
        assert!((sx - 150.0).abs() < 1e-9);
        assert!(sy.abs() < 1e-9);
    }

    #[test]
    fn cover_crop_is_identity_for_matching_aspect() {
        assert_eq!(cover_crop((200.0, 100.0), (50.0, 25.0)), (0.0, 0.0, 200.0, 100.0));
        assert_eq!(cover_crop((64.0, 64.0), (0.0, 48.0)), (0.0, 0.0, 64.0, 64.0));
    }
}
