//! End-to-end capture of the demo card without a browser.
//!
//! A fake measurer stands in for canvas text metrics and a tiny software
//! surface rasterizes rectangles, which is enough to exercise layout,
//! replay, and PNG encoding together.

#![allow(clippy::unwrap_used)]

use std::convert::Infallible;

use postcraft_core::{Icon, PostRecord, PreviewOptions, PreviewVariant, render_preview};
use postcraft_export::{
    CaptureMode, Color, ExportConfig, Font, Measure, Rect, Surface, build_display_list,
    encode_png, replay,
};

struct FakeMetrics;

impl Measure for FakeMetrics {
    #[expect(clippy::cast_precision_loss)]
    fn text_width(&self, text: &str, font: &Font) -> f32 {
        text.chars().count() as f32 * font.size * 0.5
    }

    fn image_size(&self, src: &str) -> Option<(f32, f32)> {
        src.starts_with("https://").then_some((1260.0, 750.0))
    }
}

/// Rasterizes filled rectangles into an RGBA buffer; everything else is
/// counted but not drawn.
struct Pixels {
    width: u32,
    height: u32,
    scale: f32,
    rgba: Vec<u8>,
    texts: Vec<String>,
    icons: Vec<Icon>,
}

impl Pixels {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scale: 1.0,
            rgba: vec![0; width as usize * height as usize * 4],
            texts: Vec::new(),
            icons: Vec::new(),
        }
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn fill(&mut self, rect: Rect, color: Color) {
        let start = |v: f32| (v * self.scale).floor().max(0.0) as u32;
        let end = |v: f32| (v * self.scale).ceil().max(0.0) as u32;
        let (x0, y0) = (start(rect.x), start(rect.y));
        let (x1, y1) = (
            end(rect.right()).min(self.width),
            end(rect.bottom()).min(self.height),
        );
        for y in y0..y1 {
            for x in x0..x1 {
                let i = (y * self.width + x) as usize * 4;
                self.rgba[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
            }
        }
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y * self.width + x) as usize * 4;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }
}

impl Surface for Pixels {
    type Error = Infallible;

    fn set_scale(&mut self, scale: f32) -> Result<(), Infallible> {
        self.scale = scale;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, _: f32, color: Color) -> Result<(), Infallible> {
        self.fill(rect, color);
        Ok(())
    }

    fn stroke_rect(&mut self, _: Rect, _: f32, _: f32, _: Color) -> Result<(), Infallible> {
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        _: f32,
        _: f32,
        _: &Font,
        _: Color,
    ) -> Result<(), Infallible> {
        self.texts.push(text.to_owned());
        Ok(())
    }

    fn draw_image(&mut self, _: Rect, _: &str) -> Result<bool, Infallible> {
        Ok(false)
    }

    fn draw_icon(&mut self, _: Rect, icon: Icon, _: Color) -> Result<(), Infallible> {
        self.icons.push(icon);
        Ok(())
    }

    fn push_clip(&mut self, _: Rect, _: f32) -> Result<(), Infallible> {
        Ok(())
    }

    fn pop_clip(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

fn capture(variant: PreviewVariant) -> (Pixels, Vec<u8>) {
    let config = ExportConfig::default();
    let tree = render_preview(
        &PostRecord::demo(),
        &PreviewOptions {
            variant,
            expanded: false,
        },
    );
    let mode = CaptureMode::for_variant(variant);
    let list = build_display_list(&tree, mode, &config, &FakeMetrics).unwrap();
    let (w, h) = list.pixel_size(config.scale);
    let mut surface = Pixels::new(w, h);
    replay(&list, &mut surface, config.scale, Color::WHITE).unwrap();
    let png = encode_png(w, h, &surface.rgba).unwrap();
    (surface, png)
}

#[test]
fn reactions_card_exports_without_hover_panel() {
    let (surface, png) = capture(PreviewVariant::Reactions);

    assert!(surface.texts.iter().any(|t| t == "142"));
    assert!(surface.texts.iter().any(|t| t == "23 comments"));
    assert!(!surface.texts.iter().any(|t| t.contains("Love")));
    // Like, Comment, Share, Send icons plus two badges and the audience
    // marker; the picker's icons are gone.
    assert_eq!(surface.icons.len(), 7);

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (surface.width, surface.height));
    assert_eq!(surface.width, 1024);
    assert!(decoded.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn missing_images_are_filled_with_placeholder_grey() {
    let (surface, _) = capture(PreviewVariant::Reactions);
    // The post image spans the full card width.
    let x = surface.width / 2;
    let grey = [0xd1, 0xd5, 0xdb, 0xff];
    assert!((0..surface.height).any(|y| surface.pixel(x, y) == grey));
}

#[test]
fn expandable_card_exports_truncated_text() {
    let (surface, png) = capture(PreviewVariant::Expandable);
    assert!(surface.texts.iter().any(|t| t == "show more"));
    assert!(!surface.texts.iter().any(|t| t.contains("#NewBeginnings")));
    assert!(image::load_from_memory(&png).is_ok());
}
