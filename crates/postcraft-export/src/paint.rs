//! Paint commands and the surface they are replayed onto.
//!
//! Layout produces a [`DisplayList`] in CSS pixels.  A [`Surface`]
//! implementation (the browser canvas in `postcraft-io`) draws it at the
//! requested pixel density through [`replay`].

use postcraft_core::Icon;

use crate::style::Color;

/// Font family stack of captured text runs.
///
/// Matches Tailwind's default `--font-sans`, which the page itself
/// inherits through preflight, so canvas metrics agree with the live
/// card.
pub const FONT_FAMILY: &str = "ui-sans-serif, system-ui, sans-serif, \"Apple Color Emoji\", \
     \"Segoe UI Emoji\", \"Segoe UI Symbol\", \"Noto Color Emoji\"";

/// An axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Font used by a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// Size in CSS pixels.
    pub size: f32,
    /// CSS weight (400, 500, 600, ...).
    pub weight: u16,
}

impl Font {
    /// CSS `font` shorthand, e.g. `600 16px <family>`.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("{} {}px {FONT_FAMILY}", self.weight, self.size)
    }
}

/// One drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Solid (optionally rounded) rectangle.
    FillRect {
        rect: Rect,
        radius: f32,
        color: Color,
    },
    /// Rectangle outline of `width`, drawn inside `rect`.
    StrokeRect {
        rect: Rect,
        radius: f32,
        width: f32,
        color: Color,
    },
    /// A single line of text.  `y` is the vertical centre of the line.
    Text {
        x: f32,
        y: f32,
        text: String,
        font: Font,
        color: Color,
    },
    /// An image scaled to cover `rect`.  `fallback` is tried when `src`
    /// did not load; a neutral fill is drawn when neither did.
    Image {
        rect: Rect,
        src: String,
        fallback: Option<String>,
    },
    /// A vector icon scaled to `rect`.
    Icon { rect: Rect, icon: Icon, color: Color },
    /// Clip subsequent commands to a (rounded) rectangle.
    PushClip { rect: Rect, radius: f32 },
    /// Undo the matching [`PaintCommand::PushClip`].
    PopClip,
}

/// Commands for one captured tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayList {
    /// Width of the captured root box in CSS pixels.
    pub width: f32,
    /// Height of the captured root box in CSS pixels.
    pub height: f32,
    pub commands: Vec<PaintCommand>,
}

impl DisplayList {
    /// All text runs, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            PaintCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Text runs joined with single spaces, for assertions and debugging.
    #[must_use]
    pub fn joined_text(&self) -> String {
        self.texts().collect::<Vec<_>>().join(" ")
    }

    /// Size of the raster in device pixels at `scale`.
    #[must_use]
    pub fn pixel_size(&self, scale: f32) -> (u32, u32) {
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let px = |v: f32| (v * scale).ceil().max(1.0) as u32;
        (px(self.width), px(self.height))
    }
}

/// A 2D drawing target.
///
/// Coordinates passed to every method are CSS pixels; the surface
/// applies the density multiplier set by [`Surface::set_scale`].
pub trait Surface {
    type Error;

    fn set_scale(&mut self, scale: f32) -> Result<(), Self::Error>;
    fn fill_rect(&mut self, rect: Rect, radius: f32, color: Color) -> Result<(), Self::Error>;
    fn stroke_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        width: f32,
        color: Color,
    ) -> Result<(), Self::Error>;
    fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: &Font,
        color: Color,
    ) -> Result<(), Self::Error>;
    /// Draw an image.  Returns `false` if the source is not available.
    fn draw_image(&mut self, rect: Rect, src: &str) -> Result<bool, Self::Error>;
    fn draw_icon(&mut self, rect: Rect, icon: Icon, color: Color) -> Result<(), Self::Error>;
    fn push_clip(&mut self, rect: Rect, radius: f32) -> Result<(), Self::Error>;
    fn pop_clip(&mut self) -> Result<(), Self::Error>;
}

/// Draw `list` onto `surface` at `scale` over an opaque `background`.
///
/// # Errors
///
/// Propagates the first error returned by the surface.
pub fn replay<S: Surface>(
    list: &DisplayList,
    surface: &mut S,
    scale: f32,
    background: Color,
) -> Result<(), S::Error> {
    surface.set_scale(scale)?;
    let opaque = Color {
        a: 0xff,
        ..background
    };
    surface.fill_rect(Rect::new(0.0, 0.0, list.width, list.height), 0.0, opaque)?;

    for command in &list.commands {
        match command {
            PaintCommand::FillRect {
                rect,
                radius,
                color,
            } => surface.fill_rect(*rect, *radius, *color)?,
            PaintCommand::StrokeRect {
                rect,
                radius,
                width,
                color,
            } => surface.stroke_rect(*rect, *radius, *width, *color)?,
            PaintCommand::Text {
                x,
                y,
                text,
                font,
                color,
            } => surface.fill_text(text, *x, *y, font, *color)?,
            PaintCommand::Image {
                rect,
                src,
                fallback,
            } => {
                let mut drawn = surface.draw_image(*rect, src)?;
                if !drawn && let Some(fallback) = fallback {
                    drawn = surface.draw_image(*rect, fallback)?;
                }
                if !drawn {
                    surface.fill_rect(*rect, 0.0, Color::PLACEHOLDER)?;
                }
            }
            PaintCommand::Icon { rect, icon, color } => surface.draw_icon(*rect, *icon, *color)?,
            PaintCommand::PushClip { rect, radius } => surface.push_clip(*rect, *radius)?,
            PaintCommand::PopClip => surface.pop_clip()?,
        }
    }
    Ok(())
}
