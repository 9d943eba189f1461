//! Vector icons drawn on the post card.
//!
//! Path data is shared by the DOM view (inline `<svg>`) and the canvas
//! exporter (`Path2D`), so both draw identical glyphs.

/// How an icon's paths are painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IconPaint {
    /// Filled with the current color.
    Fill,
    /// Stroked with the current color at the given width (viewBox units),
    /// round caps and joins.
    Stroke(f32),
}

/// Icons used by the post card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    ThumbsUp,
    Heart,
    MessageSquare,
    Repeat,
    Send,
    /// Audience marker after the post time.
    Audience,
}

impl Icon {
    /// Side length of the square viewBox.
    #[must_use]
    pub const fn view_box(self) -> f32 {
        match self {
            Self::Audience => 16.0,
            _ => 24.0,
        }
    }

    #[must_use]
    pub const fn paint(self) -> IconPaint {
        match self {
            Self::Heart | Self::Audience => IconPaint::Fill,
            _ => IconPaint::Stroke(2.0),
        }
    }

    /// SVG path `d` strings, drawn in order.
    #[must_use]
    pub const fn paths(self) -> &'static [&'static str] {
        match self {
            Self::ThumbsUp => &[
                "M7 10v12",
                "M15 5.88 14 10h5.83a2 2 0 0 1 1.92 2.56l-2.33 8A2 2 0 0 1 17.5 22H4a2 2 0 0 1-2-2v-8a2 2 0 0 1 2-2h2.76a2 2 0 0 0 1.79-1.11L12 2a3.13 3.13 0 0 1 3 3.88Z",
            ],
            Self::Heart => &[
                "M12 21.35l-1.45-1.32C5.4 15.36 2 12.28 2 8.5 2 5.42 4.42 3 7.5 3c1.74 0 3.41.81 4.5 2.09C13.09 3.81 14.76 3 16.5 3 19.58 3 22 5.42 22 8.5c0 3.78-3.4 6.86-8.55 11.54L12 21.35z",
            ],
            Self::MessageSquare => &["M21 15a2 2 0 0 1-2 2H7l-4 4V5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2z"],
            Self::Repeat => &[
                "m17 2 4 4-4 4",
                "M3 11v-1a4 4 0 0 1 4-4h14",
                "m7 22-4-4 4-4",
                "M21 13v1a4 4 0 0 1-4 4H3",
            ],
            Self::Send => &["m22 2-7 20-4-9-9-4Z", "M22 2 11 13"],
            Self::Audience => &[
                "M8 0C3.58 0 0 3.58 0 8C0 12.41 3.58 16 8 16C12.42 16 16 12.41 16 8C16 3.58 12.42 0 8 0ZM7 11.5C7 11.78 6.78 12 6.5 12H5.5C5.22 12 5 11.78 5 11.5V5.5C5 5.22 5.22 5 5.5 5H6.5C6.78 5 7 5.22 7 5.5V11.5ZM11 11.5C11 11.78 10.78 12 10.5 12H9.5C9.22 12 9 11.78 9 11.5V5.5C9 5.22 9.22 5 9.5 5H10.5C10.78 5 11 5.22 11 5.5V11.5Z",
            ],
        }
    }

    /// The `viewBox` attribute value.
    #[must_use]
    pub fn view_box_attr(self) -> String {
        let s = self.view_box();
        format!("0 0 {s} {s}")
    }
}
