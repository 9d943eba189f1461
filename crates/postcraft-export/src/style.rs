//! Resolve Tailwind utility classes into layout styles.
//!
//! Only the utilities emitted by the post card renderer are understood.
//! Unknown utilities are ignored, as are state variants (`hover:`,
//! `group-hover:`, `focus:`): a capture is a static picture.  Responsive
//! variants (`sm:`, `md:`, `lg:`) apply when the configured viewport is at
//! least as wide as their breakpoint, the same way the live page sees
//! them.

use postcraft_core::{Kind, Node};

/// Root font size in CSS pixels (`1rem`).
pub const REM: f32 = 16.0;

/// Tailwind spacing unit (`0.25rem`).
const SPACING: f32 = 4.0;

/// An sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Neutral fill for images that failed to load.
    pub const PLACEHOLDER: Self = Self::rgb(0xd1, 0xd5, 0xdb);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Parse `#rgb` or `#rrggbb`.
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        let channel = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(
                channel(0, 1)? * 17,
                channel(1, 1)? * 17,
                channel(2, 1)? * 17,
            )),
            6 => Some(Self::rgb(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            _ => None,
        }
    }

    /// CSS `rgba()` notation, for canvas fill and stroke styles.
    #[must_use]
    pub fn to_css(self) -> String {
        let alpha = f32::from(self.a) / 255.0;
        format!("rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
    }
}

/// Tailwind palette entries used by the card.
fn palette(name: &str) -> Option<Color> {
    let hex = match name {
        "white" => return Some(Color::WHITE),
        "black" => return Some(Color::BLACK),
        "gray-50" => "#f9fafb",
        "gray-100" => "#f3f4f6",
        "gray-200" => "#e5e7eb",
        "gray-300" => "#d1d5db",
        "gray-400" => "#9ca3af",
        "gray-500" => "#6b7280",
        "gray-600" => "#4b5563",
        "gray-700" => "#374151",
        "gray-800" => "#1f2937",
        "gray-900" => "#111827",
        "blue-600" => "#2563eb",
        "blue-700" => "#1d4ed8",
        "red-500" => "#ef4444",
        "red-600" => "#dc2626",
        "green-600" => "#16a34a",
        _ => {
            // Arbitrary value: `[#0A66C2]`.
            let inner = name.strip_prefix('[')?.strip_suffix(']')?;
            return Color::from_hex(inner);
        }
    };
    Color::from_hex(hex)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    Flex,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Row,
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    Start,
    Center,
    End,
    Between,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Static,
    Relative,
    Absolute,
}

/// A width or height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f32),
    /// `100%` of the containing block.
    Full,
}

/// Per-side lengths (padding, margin, border widths).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Corner radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Radius {
    Px(f32),
    /// `rounded-full`: half the shorter side.
    Full,
}

impl Radius {
    /// Radius in pixels for a box of the given size.
    #[must_use]
    pub fn resolve(self, width: f32, height: f32) -> f32 {
        match self {
            Self::Px(r) => r.min(width / 2.0).min(height / 2.0),
            Self::Full => width.min(height) / 2.0,
        }
    }
}

/// Font properties that children inherit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub line_height: f32,
    pub weight: u16,
    pub color: Color,
    /// `white-space: pre-wrap`: keep spaces and newlines.
    pub pre_wrap: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: REM,
            line_height: REM * 1.5,
            weight: 400,
            color: Color::BLACK,
            pre_wrap: false,
        }
    }
}

/// Resolved style of one node.
///
/// Text properties are stored as overrides (`None` inherits from the
/// parent); everything else applies to the node alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub display: Display,
    pub direction: Direction,
    pub align_items: Align,
    pub justify: Justify,
    /// Space between flex items (from `space-x-*`, `space-y-*`, `gap-*`).
    pub gap: f32,
    pub flex_grow: f32,
    pub position: Position,
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
    pub padding: Edges,
    pub margin: Edges,
    pub border: Edges,
    pub border_color: Color,
    pub background: Option<Color>,
    pub radius: Option<Radius>,
    pub overflow_hidden: bool,
    /// `opacity-0` elements take space but are not painted.
    pub invisible: bool,
    /// Paint order among siblings (`z-10`, `z-20`, ...).
    pub z_index: i32,
    pub font_size: Option<f32>,
    pub line_height: Option<f32>,
    /// `leading-*` as a multiple of the font size.
    pub line_height_factor: Option<f32>,
    pub font_weight: Option<u16>,
    pub color: Option<Color>,
    pub pre_wrap: Option<bool>,
}

impl Style {
    /// Default style of an element kind before any classes apply.
    #[must_use]
    pub fn for_kind(kind: &Kind) -> Self {
        let display = match kind {
            Kind::Div | Kind::Paragraph | Kind::Heading | Kind::Image(_) | Kind::Icon(_) => {
                Display::Block
            }
            Kind::Span | Kind::Text(_) => Display::Inline,
            Kind::Button(_) => Display::InlineBlock,
        };
        Self {
            display,
            direction: Direction::Row,
            align_items: Align::Stretch,
            justify: Justify::Start,
            gap: 0.0,
            flex_grow: 0.0,
            position: Position::Static,
            width: None,
            height: None,
            max_width: None,
            max_height: None,
            padding: Edges::default(),
            margin: Edges::default(),
            border: Edges::default(),
            border_color: palette("gray-200").unwrap_or(Color::BLACK),
            background: None,
            radius: None,
            overflow_hidden: false,
            invisible: false,
            z_index: 0,
            font_size: None,
            line_height: None,
            line_height_factor: None,
            font_weight: None,
            color: None,
            pre_wrap: None,
        }
    }

    /// Apply this node's overrides on top of the inherited text style.
    #[must_use]
    pub fn text_style(&self, parent: &TextStyle) -> TextStyle {
        let size = self.font_size.unwrap_or(parent.size);
        let line_height = match (self.line_height_factor, self.line_height) {
            (Some(f), _) => size * f,
            (None, Some(lh)) => lh,
            (None, None) => parent.line_height,
        };
        TextStyle {
            size,
            line_height,
            weight: self.font_weight.unwrap_or(parent.weight),
            color: self.color.unwrap_or(parent.color),
            pre_wrap: self.pre_wrap.unwrap_or(parent.pre_wrap),
        }
    }

    /// Whether the node is laid out at all.
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        self.display != Display::None && self.position != Position::Absolute
    }
}

/// Settings that decide which responsive variants apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width of the page the preview lives in, in CSS pixels.
    pub width: f32,
}

impl Viewport {
    fn variant_active(self, variant: &str) -> bool {
        let min = match variant {
            "sm" => 640.0,
            "md" => 768.0,
            "lg" => 1024.0,
            "xl" => 1280.0,
            _ => return false,
        };
        self.width >= min
    }
}

/// Parse the numeric part of a spacing utility (`4`, `0.5`, `px`, `[10px]`).
fn spacing(value: &str) -> Option<f32> {
    if value == "px" {
        return Some(1.0);
    }
    if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        return inner.strip_suffix("px")?.parse().ok();
    }
    value.parse::<f32>().ok().map(|n| n * SPACING)
}

fn size(value: &str) -> Option<Length> {
    if value == "full" {
        return Some(Length::Full);
    }
    spacing(value).map(Length::Px)
}

/// Resolve a node's classes into a [`Style`].
#[must_use]
pub fn resolve(node: &Node, viewport: Viewport) -> Style {
    let mut style = Style::for_kind(&node.kind);
    for class in node.classes() {
        let utility = match class.rsplit_once(':') {
            Some((variant, utility)) => {
                if !viewport.variant_active(variant) {
                    continue;
                }
                utility
            }
            None => class,
        };
        apply_utility(&mut style, utility);
    }
    style
}

#[allow(clippy::too_many_lines)]
fn apply_utility(style: &mut Style, utility: &str) {
    let (negative, utility) = match utility.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, utility),
    };
    let sign = if negative { -1.0 } else { 1.0 };

    match utility {
        "block" => style.display = Display::Block,
        "inline" => style.display = Display::Inline,
        "inline-block" => style.display = Display::InlineBlock,
        "flex" => style.display = Display::Flex,
        "hidden" => style.display = Display::None,
        "flex-row" => style.direction = Direction::Row,
        "flex-col" => style.direction = Direction::Column,
        "flex-1" => style.flex_grow = 1.0,
        "items-start" => style.align_items = Align::Start,
        "items-center" => style.align_items = Align::Center,
        "items-end" => style.align_items = Align::End,
        "items-stretch" => style.align_items = Align::Stretch,
        "justify-start" => style.justify = Justify::Start,
        "justify-center" => style.justify = Justify::Center,
        "justify-end" => style.justify = Justify::End,
        "justify-between" => style.justify = Justify::Between,
        "relative" => style.position = Position::Relative,
        "absolute" => style.position = Position::Absolute,
        "overflow-hidden" => style.overflow_hidden = true,
        "opacity-0" => style.invisible = true,
        "opacity-100" => style.invisible = false,
        "whitespace-pre-wrap" => style.pre_wrap = Some(true),
        "whitespace-normal" | "whitespace-nowrap" => style.pre_wrap = Some(false),
        "border" => style.border = uniform(1.0),
        "border-2" => style.border = uniform(2.0),
        "border-t" => style.border.top = 1.0,
        "border-b" => style.border.bottom = 1.0,
        "border-l" => style.border.left = 1.0,
        "border-r" => style.border.right = 1.0,
        "rounded" => style.radius = Some(Radius::Px(4.0)),
        "rounded-md" => style.radius = Some(Radius::Px(6.0)),
        "rounded-lg" => style.radius = Some(Radius::Px(8.0)),
        "rounded-full" => style.radius = Some(Radius::Full),
        "max-w-lg" => style.max_width = Some(32.0 * REM),
        "text-xs" => set_font(style, 0.75, 1.0),
        "text-sm" => set_font(style, 0.875, 1.25),
        "text-base" => set_font(style, 1.0, 1.5),
        "text-lg" => set_font(style, 1.125, 1.75),
        "text-xl" => set_font(style, 1.25, 1.75),
        "leading-tight" => style.line_height_factor = Some(1.25),
        "leading-normal" => style.line_height_factor = Some(1.5),
        "font-normal" => style.font_weight = Some(400),
        "font-medium" => style.font_weight = Some(500),
        "font-semibold" => style.font_weight = Some(600),
        "font-bold" => style.font_weight = Some(700),
        _ => apply_prefixed(style, utility, sign),
    }
}

fn uniform(v: f32) -> Edges {
    Edges {
        top: v,
        right: v,
        bottom: v,
        left: v,
    }
}

fn set_font(style: &mut Style, size_rem: f32, line_rem: f32) {
    style.font_size = Some(size_rem * REM);
    style.line_height = Some(line_rem * REM);
    style.line_height_factor = None;
}

fn apply_prefixed(style: &mut Style, utility: &str, sign: f32) {
    let Some((prefix, value)) = utility.split_once('-') else {
        return;
    };
    match prefix {
        "p" | "px" | "py" | "pt" | "pr" | "pb" | "pl" => {
            if let Some(v) = spacing(value) {
                set_edges(&mut style.padding, prefix, v);
            }
        }
        "m" | "mx" | "my" | "mt" | "mr" | "mb" | "ml" => {
            if let Some(v) = spacing(value) {
                set_edges(&mut style.margin, prefix, v * sign);
            }
        }
        "gap" => {
            if let Some(v) = spacing(value) {
                style.gap = v;
            }
        }
        "space" => {
            // `space-x-3`, `space-y-2`
            if let Some((axis, amount)) = value.split_once('-')
                && matches!(axis, "x" | "y")
                && let Some(v) = spacing(amount)
            {
                style.gap = v * sign;
            }
        }
        "z" => {
            if let Ok(z) = value.parse() {
                style.z_index = z;
            }
        }
        "w" => style.width = size(value),
        "h" => style.height = size(value),
        "max" => {
            // `max-h-[400px]`
            if let Some(v) = value.strip_prefix("h-").and_then(spacing) {
                style.max_height = Some(v);
            } else if let Some(v) = value.strip_prefix("w-").and_then(spacing) {
                style.max_width = Some(v);
            }
        }
        "bg" => {
            if let Some(c) = palette(value) {
                style.background = Some(c);
            }
        }
        "text" => {
            if let Some(c) = palette(value) {
                style.color = Some(c);
            }
        }
        "border" => {
            if let Some(c) = palette(value) {
                style.border_color = c;
            }
        }
        _ => {}
    }
}

fn set_edges(edges: &mut Edges, prefix: &str, v: f32) {
    let side = &prefix[1..];
    match side {
        "" => *edges = uniform(v),
        "x" => {
            edges.left = v;
            edges.right = v;
        }
        "y" => {
            edges.top = v;
            edges.bottom = v;
        }
        "t" => edges.top = v,
        "r" => edges.right = v,
        "b" => edges.bottom = v,
        "l" => edges.left = v,
        _ => {}
    }
}

/// A node paired with its resolved style.
#[derive(Debug, Clone)]
pub struct StyledNode<'a> {
    pub node: &'a Node,
    pub style: Style,
    pub children: Vec<Self>,
}

impl StyledNode<'_> {
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.node.has_class(class)
    }
}

/// Resolve styles for a whole tree.
#[must_use]
pub fn style_tree(node: &Node, viewport: Viewport) -> StyledNode<'_> {
    StyledNode {
        node,
        style: resolve(node, viewport),
        children: node
            .children
            .iter()
            .map(|c| style_tree(c, viewport))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESKTOP: Viewport = Viewport { width: 1280.0 };
    const PHONE: Viewport = Viewport { width: 375.0 };

    fn div(class: &'static str) -> Node {
        Node::div(class)
    }

    #[test]
    fn spacing_and_sizes_use_quarter_rem_steps() {
        let s = resolve(&div("px-4 py-3 w-12 h-full mb-4"), DESKTOP);
        assert_eq!(s.padding.left, 16.0);
        assert_eq!(s.padding.top, 12.0);
        assert_eq!(s.width, Some(Length::Px(48.0)));
        assert_eq!(s.height, Some(Length::Full));
        assert_eq!(s.margin.bottom, 16.0);
    }

    #[test]
    fn negative_utilities_flip_sign() {
        let s = resolve(&div("-mx-4 flex -space-x-1"), DESKTOP);
        assert_eq!(s.margin.left, -16.0);
        assert_eq!(s.margin.right, -16.0);
        assert_eq!(s.gap, -4.0);
        assert_eq!(s.display, Display::Flex);
    }

    #[test]
    fn z_index_parses() {
        assert_eq!(resolve(&div("border-2 z-30"), DESKTOP).z_index, 30);
        assert_eq!(resolve(&div("z-auto"), DESKTOP).z_index, 0);
    }

    #[test]
    fn arbitrary_values_parse() {
        let s = resolve(&div("max-h-[400px] text-[#0A66C2] bg-[#fff]"), DESKTOP);
        assert_eq!(s.max_height, Some(400.0));
        assert_eq!(s.color, Some(Color::rgb(0x0a, 0x66, 0xc2)));
        assert_eq!(s.background, Some(Color::WHITE));
    }

    #[test]
    fn state_variants_are_ignored() {
        let s = resolve(&div("hidden group-hover:flex hover:bg-gray-100"), DESKTOP);
        assert_eq!(s.display, Display::None);
        assert_eq!(s.background, None);
    }

    #[test]
    fn responsive_variants_follow_viewport() {
        let node = Node::span("text-xs sm:text-sm");
        assert_eq!(resolve(&node, DESKTOP).font_size, Some(14.0));
        assert_eq!(resolve(&node, PHONE).font_size, Some(12.0));
    }

    #[test]
    fn text_style_inherits_unset_properties() {
        let parent = TextStyle {
            color: Color::rgb(1, 2, 3),
            pre_wrap: true,
            ..TextStyle::default()
        };
        let s = resolve(&Node::span("text-xs font-medium"), DESKTOP).text_style(&parent);
        assert_eq!(s.size, 12.0);
        assert_eq!(s.line_height, 16.0);
        assert_eq!(s.weight, 500);
        assert_eq!(s.color, Color::rgb(1, 2, 3));
        assert!(s.pre_wrap);
    }

    #[test]
    fn leading_scales_with_font_size() {
        let s = resolve(&Node::paragraph("text-xs leading-tight"), DESKTOP)
            .text_style(&TextStyle::default());
        assert_eq!(s.line_height, 15.0);
    }

    #[test]
    fn default_display_depends_on_kind() {
        assert_eq!(resolve(&Node::button(""), DESKTOP).display, Display::InlineBlock);
        assert_eq!(resolve(&Node::span(""), DESKTOP).display, Display::Inline);
        assert_eq!(resolve(&Node::div(""), DESKTOP).display, Display::Block);
    }

    #[test]
    fn radius_full_is_half_the_short_side() {
        assert_eq!(Radius::Full.resolve(48.0, 40.0), 20.0);
        assert_eq!(Radius::Px(8.0).resolve(10.0, 10.0), 5.0);
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(Color::from_hex("#abc"), Some(Color::rgb(0xaa, 0xbb, 0xcc)));
        assert_eq!(Color::from_hex("abc"), None);
        assert_eq!(Color::from_hex("#abcd"), None);
        assert_eq!(Color::WHITE.to_css(), "rgba(255, 255, 255, 1)");
    }
}
