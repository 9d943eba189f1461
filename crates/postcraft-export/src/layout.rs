//! Box layout for styled trees.
//!
//! Block and flex geometry is computed by `taffy`.  This module translates
//! a [`StyledNode`] tree into a taffy tree, breaks inline content into
//! lines from taffy's measure callback, and reads the result back as
//! [`LayoutBox`]es.  Text metrics and image sizes come from a [`Measure`]
//! implementation so this module stays free of I/O.
//!
//! [`layout_tree`] sizes and positions every box relative to its parent;
//! [`paint`] walks the result and emits a [`DisplayList`] in absolute
//! coordinates.

use postcraft_core::{ImageNode, Kind};
use taffy::geometry::Point;
use taffy::prelude as tf;
use taffy::prelude::{auto, length, percent};
use taffy::style::Overflow;
use taffy::style_helpers::FromLength;

use crate::paint::{DisplayList, Font, PaintCommand, Rect};
use crate::style::{
    Align, Color, Direction, Display, Edges, Justify, Length, Style, StyledNode, TextStyle,
};

/// Side of an icon without a size class.
const ICON_SIZE: f32 = 16.0;

/// A preserved tab advances this many spaces (no tab stops).
const TAB: &str = "        ";

/// Rounding slack when a line is re-broken at its own measured width.
const FIT_SLACK: f32 = 0.01;

/// Errors raised while computing a layout.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("layout engine error: {0}")]
    Taffy(#[from] taffy::TaffyError),
}

/// Source of text metrics and image dimensions.
pub trait Measure {
    /// Advance width of `text` set in `font`, in CSS pixels.
    fn text_width(&self, text: &str, font: &Font) -> f32;

    /// Natural size of a loaded image, or `None` if it is unavailable.
    fn image_size(&self, src: &str) -> Option<(f32, f32)>;
}

/// One line of text positioned inside its box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    /// Vertical centre of the line box.
    pub y: f32,
    pub width: f32,
    pub text: String,
    pub font: Font,
    pub color: Color,
}

/// A laid-out box.
#[derive(Debug, Clone)]
pub struct LayoutBox<'a> {
    pub node: &'a StyledNode<'a>,
    /// Border box, relative to the parent's border box.
    pub rect: Rect,
    /// Inherited text style after this node's overrides.
    pub text: TextStyle,
    pub children: Vec<Self>,
    /// Text runs, relative to this box.
    pub runs: Vec<TextRun>,
}

impl LayoutBox<'_> {
    /// First descendant (or self) whose node has `class`.
    #[must_use]
    pub fn find_class(&self, class: &str) -> Option<&Self> {
        if self.node.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_class(class))
    }
}

/// Inline-level input to line breaking, measured up front.
enum Piece<'a> {
    Word {
        text: String,
        style: TextStyle,
        width: f32,
    },
    Space {
        text: &'static str,
        style: TextStyle,
        collapsible: bool,
        width: f32,
    },
    Break,
    /// Inline-block, image, or icon; laid out ahead as an unbreakable box.
    Atomic(LayoutBox<'a>),
}

impl Piece<'_> {
    /// Advance including margins.
    fn width(&self) -> f32 {
        match self {
            Self::Word { width, .. } | Self::Space { width, .. } => *width,
            Self::Break => 0.0,
            Self::Atomic(b) => b.rect.width + b.node.style.margin.horizontal(),
        }
    }

    fn height(&self) -> f32 {
        match self {
            Self::Word { style, .. } | Self::Space { style, .. } => style.line_height,
            Self::Break => 0.0,
            Self::Atomic(b) => b.rect.height + b.node.style.margin.vertical(),
        }
    }

    const fn is_collapsible(&self) -> bool {
        matches!(
            self,
            Self::Space {
                collapsible: true,
                ..
            }
        )
    }
}

/// Indices into a paragraph's pieces, with their x offsets.
#[derive(Default)]
struct Line {
    items: Vec<(f32, usize)>,
    width: f32,
}

impl Line {
    fn push(&mut self, index: usize, width: f32) {
        self.items.push((self.width, index));
        self.width += width;
    }

    /// Drop collapsible spaces at the end of the line.
    fn trim_end(&mut self, pieces: &[Piece<'_>]) {
        while let Some(&(_, i)) = self.items.last()
            && pieces[i].is_collapsible()
        {
            self.width -= pieces[i].width();
            self.items.pop();
        }
    }
}

/// Runs and atomic boxes of a paragraph, relative to its top-left corner.
#[derive(Default)]
struct Content<'a> {
    boxes: Vec<LayoutBox<'a>>,
    runs: Vec<TextRun>,
}

/// An anonymous block of inline content.
///
/// `strut` is the containing block's text style; every line is at least
/// its line height.
struct Paragraph<'a> {
    pieces: Vec<Piece<'a>>,
    strut: TextStyle,
}

impl<'a> Paragraph<'a> {
    /// Greedy line breaking at `width`.  `None` when nothing is visible.
    fn lines(&self, width: f32) -> Option<Vec<Line>> {
        let pieces = &self.pieces;
        let mut lines = Vec::new();
        let mut line = Line::default();
        for (i, piece) in pieces.iter().enumerate() {
            match piece {
                Piece::Break => {
                    line.trim_end(pieces);
                    lines.push(std::mem::take(&mut line));
                }
                Piece::Space { collapsible, .. } => {
                    if *collapsible && line.items.is_empty() {
                        continue;
                    }
                    // Spaces never wrap; they hang past the edge instead.
                    line.push(i, piece.width());
                }
                Piece::Word { .. } | Piece::Atomic(_) => {
                    let w = piece.width();
                    if !line.items.is_empty() && line.width + w > width + FIT_SLACK {
                        line.trim_end(pieces);
                        lines.push(std::mem::take(&mut line));
                    }
                    line.push(i, w);
                }
            }
        }
        line.trim_end(pieces);
        if !line.items.is_empty() || lines.is_empty() {
            lines.push(line);
        }
        if lines.len() == 1 && lines[0].items.is_empty() {
            return None;
        }
        Some(lines)
    }

    fn line_height(&self, line: &Line) -> f32 {
        line.items
            .iter()
            .map(|&(_, i)| self.pieces[i].height())
            .fold(self.strut.line_height, f32::max)
    }

    /// Content size when broken at `width`.
    fn size(&self, width: f32) -> (f32, f32) {
        self.lines(width).map_or((0.0, 0.0), |lines| {
            let w = lines.iter().map(|l| l.width).fold(0.0, f32::max);
            let h: f32 = lines.iter().map(|l| self.line_height(l)).sum();
            (w, h)
        })
    }

    /// Position runs and atomic boxes for a paragraph `width` wide.
    fn place(&self, width: f32) -> Content<'a> {
        let mut content = Content::default();
        let Some(lines) = self.lines(width) else {
            return content;
        };
        let mut top = 0.0;
        for line in &lines {
            let height = self.line_height(line);
            let mid = top + height / 2.0;
            let mut open: Option<TextRun> = None;
            for &(x, i) in &line.items {
                match &self.pieces[i] {
                    Piece::Word { text, style, width } => {
                        push_run(&mut open, &mut content, text, style, *width, x, mid);
                    }
                    Piece::Space {
                        text, style, width, ..
                    } => {
                        push_run(&mut open, &mut content, text, style, *width, x, mid);
                    }
                    Piece::Break => {}
                    Piece::Atomic(b) => {
                        content.runs.extend(open.take());
                        let mut b = b.clone();
                        let margin = b.node.style.margin;
                        let outer_h = b.rect.height + margin.vertical();
                        b.rect.x = x + margin.left;
                        b.rect.y = top + (height - outer_h) / 2.0 + margin.top;
                        content.boxes.push(b);
                    }
                }
            }
            content.runs.extend(open);
            top += height;
        }
        content
    }
}

/// Extend the open run when font and color match, else start a new one.
fn push_run(
    open: &mut Option<TextRun>,
    content: &mut Content<'_>,
    text: &str,
    style: &TextStyle,
    width: f32,
    x: f32,
    y: f32,
) {
    let (font, color) = (font(style), style.color);
    if let Some(run) = open.as_mut().filter(|r| r.font == font && r.color == color) {
        run.text.push_str(text);
        run.width += width;
        return;
    }
    content.runs.extend(open.take());
    *open = Some(TextRun {
        x,
        y,
        width,
        text: text.to_owned(),
        font,
        color,
    });
}

/// Measured content attached to taffy leaves.
enum Leaf<'a> {
    Paragraph(Paragraph<'a>),
    /// Natural size of a loaded image.
    Image(Option<(f32, f32)>),
}

fn measure_leaf(
    known: tf::Size<Option<f32>>,
    available: tf::Size<tf::AvailableSpace>,
    leaf: Option<&mut Leaf<'_>>,
) -> tf::Size<f32> {
    let (width, height) = match leaf {
        Some(Leaf::Paragraph(paragraph)) => {
            let room = known.width.unwrap_or(match available.width {
                tf::AvailableSpace::Definite(w) => w,
                tf::AvailableSpace::MinContent => 0.0,
                tf::AvailableSpace::MaxContent => f32::INFINITY,
            });
            paragraph.size(room)
        }
        Some(Leaf::Image(Some((nw, nh)))) => match (known.width, known.height) {
            (Some(w), None) => (w, w * *nh / *nw),
            (None, Some(h)) => (h * *nw / *nh, h),
            _ => (*nw, *nh),
        },
        Some(Leaf::Image(None)) | None => (0.0, 0.0),
    };
    tf::Size {
        width: known.width.unwrap_or(width),
        height: known.height.unwrap_or(height),
    }
}

const fn font(style: &TextStyle) -> Font {
    Font {
        size: style.size,
        weight: style.weight,
    }
}

const fn is_replaced(node: &StyledNode<'_>) -> bool {
    matches!(node.node.kind, Kind::Image(_) | Kind::Icon(_))
}

const fn is_inline_level(node: &StyledNode<'_>) -> bool {
    matches!(node.style.display, Display::Inline | Display::InlineBlock)
}

fn rendered<'a>(node: &'a StyledNode<'a>) -> impl Iterator<Item = &'a StyledNode<'a>> {
    node.children.iter().filter(|c| c.style.is_rendered())
}

fn edges<T: FromLength>(e: Edges) -> tf::Rect<T> {
    tf::Rect {
        left: length(e.left),
        right: length(e.right),
        top: length(e.top),
        bottom: length(e.bottom),
    }
}

fn dimension(len: Option<Length>) -> tf::Dimension {
    match len {
        Some(Length::Px(px)) => length(px),
        Some(Length::Full) => percent(1.0),
        None => auto(),
    }
}

fn max_dimension(px: Option<f32>) -> tf::Dimension {
    match px {
        Some(px) => length(px),
        None => auto(),
    }
}

/// Translate a resolved style into taffy's model.
///
/// Every box is block or flex; inline-level boxes reach taffy only as the
/// root of an atomic inline or as a blockified flex item.  `shift` is
/// added to the leading margins, which is how negative sibling spacing
/// (`-space-x-1`) is expressed.
fn taffy_style(style: &Style, shift: (f32, f32)) -> tf::Style {
    let display = match style.display {
        Display::Flex => tf::Display::Flex,
        Display::None => tf::Display::None,
        Display::Block | Display::Inline | Display::InlineBlock => tf::Display::Block,
    };
    let gap = length(style.gap.max(0.0));
    let mut margin = style.margin;
    margin.left += shift.0;
    margin.top += shift.1;
    let overflow = if style.overflow_hidden {
        Overflow::Hidden
    } else {
        Overflow::Visible
    };
    tf::Style {
        display,
        flex_direction: match style.direction {
            Direction::Row => tf::FlexDirection::Row,
            Direction::Column => tf::FlexDirection::Column,
        },
        align_items: Some(match style.align_items {
            Align::Start => tf::AlignItems::FlexStart,
            Align::Center => tf::AlignItems::Center,
            Align::End => tf::AlignItems::FlexEnd,
            Align::Stretch => tf::AlignItems::Stretch,
        }),
        justify_content: Some(match style.justify {
            Justify::Start => tf::JustifyContent::FlexStart,
            Justify::Center => tf::JustifyContent::Center,
            Justify::End => tf::JustifyContent::FlexEnd,
            Justify::Between => tf::JustifyContent::SpaceBetween,
        }),
        gap: tf::Size {
            width: gap,
            height: gap,
        },
        flex_grow: style.flex_grow,
        // `flex-1` is `flex: 1 1 0%`.
        flex_basis: if style.flex_grow > 0.0 {
            percent(0.0)
        } else {
            auto()
        },
        size: tf::Size {
            width: dimension(style.width),
            height: dimension(style.height),
        },
        max_size: tf::Size {
            width: max_dimension(style.max_width),
            height: max_dimension(style.max_height),
        },
        margin: edges(margin),
        padding: edges(style.padding),
        border: edges(style.border),
        overflow: Point {
            x: overflow,
            y: overflow,
        },
        ..tf::Style::default()
    }
}

/// A box in the taffy tree, kept to read the layout back.
struct Shape<'a> {
    node: &'a StyledNode<'a>,
    text: TextStyle,
    id: tf::NodeId,
    children: Vec<Slot<'a>>,
}

enum Slot<'a> {
    Box(Shape<'a>),
    /// Anonymous block holding a [`Leaf::Paragraph`].
    Paragraph(tf::NodeId),
}

struct Builder<'a, 'm, M: ?Sized> {
    measure: &'m M,
    tree: tf::TaffyTree<Leaf<'a>>,
}

impl<'a, M: Measure + ?Sized> Builder<'a, '_, M> {
    fn natural_size(&self, image: &ImageNode) -> Option<(f32, f32)> {
        self.measure
            .image_size(&image.src)
            .or_else(|| image.fallback.and_then(|f| self.measure.image_size(f)))
            .filter(|&(w, h)| w > 0.0 && h > 0.0)
    }

    fn word(&self, word: &mut String, style: TextStyle, out: &mut Vec<Piece<'a>>) {
        if word.is_empty() {
            return;
        }
        let width = self.measure.text_width(word, &font(&style));
        out.push(Piece::Word {
            text: std::mem::take(word),
            style,
            width,
        });
    }

    fn space(
        &self,
        out: &mut Vec<Piece<'a>>,
        text: &'static str,
        style: TextStyle,
        collapsible: bool,
    ) {
        if collapsible && out.last().is_some_and(Piece::is_collapsible) {
            return;
        }
        out.push(Piece::Space {
            text,
            style,
            collapsible,
            width: self.measure.text_width(text, &font(&style)),
        });
    }

    fn text(&self, text: &str, style: TextStyle, out: &mut Vec<Piece<'a>>) {
        let mut word = String::new();
        for ch in text.chars() {
            if style.pre_wrap {
                match ch {
                    '\n' => {
                        self.word(&mut word, style, out);
                        out.push(Piece::Break);
                    }
                    ' ' => {
                        self.word(&mut word, style, out);
                        self.space(out, " ", style, false);
                    }
                    '\t' => {
                        self.word(&mut word, style, out);
                        self.space(out, TAB, style, false);
                    }
                    '\r' => {}
                    _ => word.push(ch),
                }
            } else if ch.is_whitespace() {
                self.word(&mut word, style, out);
                self.space(out, " ", style, true);
            } else {
                word.push(ch);
            }
        }
        self.word(&mut word, style, out);
    }

    /// Flatten an inline-level subtree into pieces.
    fn collect(
        &self,
        node: &'a StyledNode<'a>,
        inherited: &TextStyle,
        out: &mut Vec<Piece<'a>>,
    ) -> Result<(), LayoutError> {
        if !node.style.is_rendered() {
            return Ok(());
        }
        let text = node.style.text_style(inherited);
        match &node.node.kind {
            Kind::Text(t) => self.text(t, text, out),
            _ if node.style.display == Display::Inline
                && !is_replaced(node)
                && !node.style.invisible =>
            {
                for child in &node.children {
                    self.collect(child, &text, out)?;
                }
            }
            _ => {
                let available = tf::AvailableSpace::MaxContent;
                out.push(Piece::Atomic(lay_out(node, inherited, available, self.measure)?));
            }
        }
        Ok(())
    }

    /// Close a run of inline children into an anonymous paragraph block.
    fn flush(
        &mut self,
        pending: &mut Vec<Piece<'a>>,
        strut: TextStyle,
        slots: &mut Vec<Slot<'a>>,
        ids: &mut Vec<tf::NodeId>,
    ) -> Result<(), LayoutError> {
        if pending.is_empty() {
            return Ok(());
        }
        let paragraph = Paragraph {
            pieces: std::mem::take(pending),
            strut,
        };
        let id = self.tree.new_leaf_with_context(
            tf::Style {
                display: tf::Display::Block,
                ..tf::Style::default()
            },
            Leaf::Paragraph(paragraph),
        )?;
        ids.push(id);
        slots.push(Slot::Paragraph(id));
        Ok(())
    }

    fn build(
        &mut self,
        node: &'a StyledNode<'a>,
        inherited: &TextStyle,
        shift: (f32, f32),
    ) -> Result<Shape<'a>, LayoutError> {
        let style = &node.style;
        let text = style.text_style(inherited);
        let mut layout = taffy_style(style, shift);
        let mut slots = Vec::new();
        let mut ids = Vec::new();

        let id = match &node.node.kind {
            Kind::Image(image) => {
                let natural = self.natural_size(image);
                self.tree.new_leaf_with_context(layout, Leaf::Image(natural))?
            }
            Kind::Icon(_) => {
                if style.width.is_none() && style.height.is_none() {
                    layout.size = tf::Size {
                        width: length(ICON_SIZE),
                        height: length(ICON_SIZE),
                    };
                }
                layout.aspect_ratio = Some(1.0);
                self.tree.new_leaf(layout)?
            }
            Kind::Text(_) => {
                let mut pending = Vec::new();
                self.collect(node, inherited, &mut pending)?;
                self.flush(&mut pending, text, &mut slots, &mut ids)?;
                self.tree.new_with_children(layout, &ids)?
            }
            _ => {
                let flex = style.display == Display::Flex;
                // Flex gaps cannot be negative; overlap through margins.
                let overlap = if flex { style.gap.min(0.0) } else { 0.0 };
                let mut pending = Vec::new();
                for (i, child) in rendered(node).enumerate() {
                    if !flex && is_inline_level(child) {
                        self.collect(child, &text, &mut pending)?;
                        continue;
                    }
                    self.flush(&mut pending, text, &mut slots, &mut ids)?;
                    let shift = match (i, style.direction) {
                        (0, _) => (0.0, 0.0),
                        (_, Direction::Row) => (overlap, 0.0),
                        (_, Direction::Column) => (0.0, overlap),
                    };
                    let shape = self.build(child, &text, shift)?;
                    ids.push(shape.id);
                    slots.push(Slot::Box(shape));
                }
                self.flush(&mut pending, text, &mut slots, &mut ids)?;
                self.tree.new_with_children(layout, &ids)?
            }
        };
        Ok(Shape {
            node,
            text,
            id,
            children: slots,
        })
    }

    fn read(&self, shape: Shape<'a>) -> Result<LayoutBox<'a>, LayoutError> {
        let layout = self.tree.layout(shape.id)?;
        let mut out = LayoutBox {
            node: shape.node,
            rect: Rect::new(
                layout.location.x,
                layout.location.y,
                layout.size.width,
                layout.size.height,
            ),
            text: shape.text,
            children: Vec::new(),
            runs: Vec::new(),
        };
        for slot in shape.children {
            match slot {
                Slot::Box(child) => out.children.push(self.read(child)?),
                Slot::Paragraph(id) => {
                    let layout = self.tree.layout(id)?;
                    let (dx, dy) = (layout.location.x, layout.location.y);
                    let width = layout.size.width;
                    let Some(Leaf::Paragraph(paragraph)) = self.tree.get_node_context(id) else {
                        continue;
                    };
                    let content = paragraph.place(width);
                    out.children.extend(content.boxes.into_iter().map(|mut b| {
                        b.rect = b.rect.translate(dx, dy);
                        b
                    }));
                    out.runs.extend(content.runs.into_iter().map(|mut r| {
                        r.x += dx;
                        r.y += dy;
                        r
                    }));
                }
            }
        }
        Ok(out)
    }
}

/// Lay out `root` in its own taffy tree, under a block container
/// `available` wide.
fn lay_out<'a, M: Measure + ?Sized>(
    root: &'a StyledNode<'a>,
    inherited: &TextStyle,
    available: tf::AvailableSpace,
    measure: &M,
) -> Result<LayoutBox<'a>, LayoutError> {
    let mut builder = Builder {
        measure,
        tree: tf::TaffyTree::new(),
    };
    builder.tree.disable_rounding();
    let shape = builder.build(root, inherited, (0.0, 0.0))?;
    let container = builder.tree.new_with_children(
        tf::Style {
            display: tf::Display::Block,
            size: tf::Size {
                width: match available {
                    tf::AvailableSpace::Definite(w) => length(w),
                    _ => auto(),
                },
                height: auto(),
            },
            ..tf::Style::default()
        },
        &[shape.id],
    )?;
    builder.tree.compute_layout_with_measure(
        container,
        tf::Size {
            width: available,
            height: tf::AvailableSpace::MaxContent,
        },
        |known, available, _id, leaf, _style| measure_leaf(known, available, leaf),
    )?;
    builder.read(shape)
}

/// Lay out `root` inside a container `width` CSS pixels wide.
///
/// # Errors
///
/// Returns [`LayoutError::Taffy`] if the layout engine rejects the tree.
pub fn layout_tree<'a, M: Measure + ?Sized>(
    root: &'a StyledNode<'a>,
    width: f32,
    measure: &M,
) -> Result<LayoutBox<'a>, LayoutError> {
    lay_out(
        root,
        &TextStyle::default(),
        tf::AvailableSpace::Definite(width),
        measure,
    )
}

fn is_uniform(edges: &Edges) -> bool {
    [edges.right, edges.bottom, edges.left]
        .iter()
        .all(|&side| (side - edges.top).abs() < f32::EPSILON)
}

fn paint_border(style: &Style, rect: Rect, radius: f32, out: &mut Vec<PaintCommand>) {
    let e = style.border;
    let color = style.border_color;
    if is_uniform(&e) {
        if e.top > 0.0 {
            out.push(PaintCommand::StrokeRect {
                rect,
                radius,
                width: e.top,
                color,
            });
        }
        return;
    }
    let sides = [
        (e.top, Rect::new(rect.x, rect.y, rect.width, e.top)),
        (e.bottom, Rect::new(rect.x, rect.bottom() - e.bottom, rect.width, e.bottom)),
        (e.left, Rect::new(rect.x, rect.y, e.left, rect.height)),
        (e.right, Rect::new(rect.right() - e.right, rect.y, e.right, rect.height)),
    ];
    for (width, rect) in sides {
        if width > 0.0 {
            out.push(PaintCommand::FillRect {
                rect,
                radius: 0.0,
                color,
            });
        }
    }
}

fn paint_box(layout: &LayoutBox<'_>, ox: f32, oy: f32, out: &mut Vec<PaintCommand>) {
    let style = &layout.node.style;
    if style.invisible {
        return;
    }
    let rect = layout.rect.translate(ox, oy);
    let radius = style.radius.map_or(0.0, |r| r.resolve(rect.width, rect.height));

    if let Some(color) = style.background {
        out.push(PaintCommand::FillRect {
            rect,
            radius,
            color,
        });
    }
    paint_border(style, rect, radius, out);

    match &layout.node.node.kind {
        Kind::Image(image) => {
            let rounded = radius > 0.0;
            if rounded {
                out.push(PaintCommand::PushClip { rect, radius });
            }
            out.push(PaintCommand::Image {
                rect,
                src: image.src.clone(),
                fallback: image.fallback.map(str::to_owned),
            });
            if rounded {
                out.push(PaintCommand::PopClip);
            }
        }
        Kind::Icon(icon) => out.push(PaintCommand::Icon {
            rect,
            icon: *icon,
            color: layout.text.color,
        }),
        _ => {}
    }

    if style.overflow_hidden {
        let b = style.border;
        out.push(PaintCommand::PushClip {
            rect: Rect::new(
                rect.x + b.left,
                rect.y + b.top,
                rect.width - b.horizontal(),
                rect.height - b.vertical(),
            ),
            radius: (radius - b.top).max(0.0),
        });
    }

    for run in &layout.runs {
        out.push(PaintCommand::Text {
            x: rect.x + run.x,
            y: rect.y + run.y,
            text: run.text.clone(),
            font: run.font,
            color: run.color,
        });
    }

    let mut children: Vec<&LayoutBox<'_>> = layout.children.iter().collect();
    children.sort_by_key(|c| c.node.style.z_index);
    for child in children {
        paint_box(child, rect.x, rect.y, out);
    }

    if style.overflow_hidden {
        out.push(PaintCommand::PopClip);
    }
}

/// Emit paint commands for a laid-out tree, with the root at the origin.
#[must_use]
pub fn paint(root: &LayoutBox<'_>) -> DisplayList {
    let mut commands = Vec::new();
    paint_box(root, -root.rect.x, -root.rect.y, &mut commands);
    DisplayList {
        width: root.rect.width,
        height: root.rect.height,
        commands,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use postcraft_core::{Icon, ImageNode, Node};

    use super::*;
    use crate::style::{Viewport, style_tree};

    const DESKTOP: Viewport = Viewport { width: 1280.0 };

    /// Every character is half an em wide.
    #[derive(Default)]
    struct Mono {
        images: HashMap<String, (f32, f32)>,
    }

    impl Measure for Mono {
        #[expect(clippy::cast_precision_loss)]
        fn text_width(&self, text: &str, font: &Font) -> f32 {
            text.chars().count() as f32 * font.size / 2.0
        }

        fn image_size(&self, src: &str) -> Option<(f32, f32)> {
            self.images.get(src).copied()
        }
    }

    fn lay_out(node: &Node, width: f32, measure: &Mono) -> DisplayList {
        let styled = style_tree(node, DESKTOP);
        paint(&layout_tree(&styled, width, measure).unwrap())
    }

    fn texts(list: &DisplayList) -> Vec<(String, f32, f32)> {
        list.commands
            .iter()
            .filter_map(|c| match c {
                PaintCommand::Text { x, y, text, .. } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    fn image(src: &str) -> ImageNode {
        ImageNode {
            src: src.into(),
            fallback: None,
            alt: "",
        }
    }

    #[test]
    fn blocks_stack_with_margins_and_padding() {
        let node = Node::div("p-2")
            .child(Node::div("h-4 mb-2"))
            .child(Node::div("h-8"));
        let styled = style_tree(&node, DESKTOP);
        let root = layout_tree(&styled, 100.0, &Mono::default()).unwrap();
        assert_eq!(root.rect.height, 8.0 + 16.0 + 8.0 + 32.0 + 8.0);
        assert_eq!(root.children[1].rect.y, 8.0 + 16.0 + 8.0);
        assert_eq!(root.children[1].rect.width, 100.0 - 16.0);
    }

    #[test]
    fn max_width_caps_the_root() {
        let node = Node::div("max-w-lg w-full h-4");
        let list = lay_out(&node, 550.0, &Mono::default());
        assert_eq!(list.width, 512.0);
        assert_eq!(list.height, 16.0);
    }

    #[test]
    fn flex_one_items_share_the_row() {
        let node = Node::div("flex").with_children((0..4).map(|_| Node::div("flex-1 h-4")));
        let styled = style_tree(&node, DESKTOP);
        let root = layout_tree(&styled, 400.0, &Mono::default()).unwrap();
        let xs: Vec<f32> = root.children.iter().map(|c| c.rect.x).collect();
        assert_eq!(xs, [0.0, 100.0, 200.0, 300.0]);
        assert!(root.children.iter().all(|c| c.rect.width == 100.0));
    }

    #[test]
    fn justify_between_pushes_items_apart() {
        let node = Node::div("flex justify-between items-center")
            .child(Node::div("w-4 h-4"))
            .child(Node::div("w-8 h-8"));
        let styled = style_tree(&node, DESKTOP);
        let root = layout_tree(&styled, 100.0, &Mono::default()).unwrap();
        assert_eq!(root.children[1].rect.x, 100.0 - 32.0);
        assert_eq!(root.children[0].rect.y, 8.0);
        assert_eq!(root.rect.height, 32.0);
    }

    #[test]
    fn words_wrap_at_the_container_edge() {
        // 16px font: each char 8px wide.  "aaaa bbbb" needs 72px.
        let node = Node::paragraph("").child(Node::text("aaaa bbbb cc"));
        let list = lay_out(&node, 80.0, &Mono::default());
        let runs = texts(&list);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].0, "aaaa bbbb");
        assert_eq!(runs[1].0, "cc");
        assert_eq!(runs[1].2 - runs[0].2, 24.0);
        assert_eq!(list.height, 48.0);
    }

    #[test]
    fn pre_wrap_keeps_blank_lines_and_spaces() {
        let node = Node::paragraph("whitespace-pre-wrap").child(Node::text("a  b\n\nc\n"));
        let list = lay_out(&node, 500.0, &Mono::default());
        let runs = texts(&list);
        assert_eq!(runs.iter().map(|r| r.0.as_str()).collect::<Vec<_>>(), ["a  b", "c"]);
        assert_eq!(runs[1].2 - runs[0].2, 48.0);
        assert_eq!(list.height, 72.0);
    }

    #[test]
    fn normal_whitespace_collapses() {
        let node = Node::paragraph("")
            .child(Node::text("  a \n\t b "))
            .child(Node::text(" c"));
        let list = lay_out(&node, 500.0, &Mono::default());
        assert_eq!(texts(&list)[0].0, "a b c");
    }

    #[test]
    fn inline_buttons_share_the_line_with_text() {
        let node = Node::paragraph("")
            .child(Node::text("hi "))
            .child(Node::button("text-[#0A66C2]").child(Node::text("#tag")));
        let list = lay_out(&node, 500.0, &Mono::default());
        let runs = texts(&list);
        assert_eq!(runs[0].0, "hi ");
        assert_eq!(runs[1], ("#tag".to_owned(), 24.0, 12.0));
    }

    #[test]
    fn images_keep_aspect_and_respect_max_height() {
        let measure = Mono {
            images: HashMap::from([
                ("tall".into(), (100.0, 200.0)),
                ("wide".into(), (200.0, 100.0)),
            ]),
        };
        for (src, expected) in [("tall", 400.0), ("wide", 250.0), ("missing", 0.0)] {
            let node = Node::div("").child(Node::image("w-full max-h-[400px]", image(src)));
            let styled = style_tree(&node, DESKTOP);
            let root = layout_tree(&styled, 500.0, &measure).unwrap();
            assert_eq!(root.children[0].rect.height, expected, "{src}");
        }
    }

    #[test]
    fn full_height_fills_a_sized_parent() {
        let node = Node::div("w-12 h-12 border")
            .child(Node::image("w-full h-full", image("x")));
        let styled = style_tree(&node, DESKTOP);
        let root = layout_tree(&styled, 500.0, &Mono::default()).unwrap();
        assert_eq!(root.rect.width, 48.0);
        assert_eq!(root.children[0].rect, Rect::new(1.0, 1.0, 46.0, 46.0));
    }

    #[test]
    fn rounded_images_are_clipped_to_their_radius() {
        let node = Node::image("w-12 h-12 rounded-full", image("avatar"));
        let list = lay_out(&node, 100.0, &Mono::default());
        let square = Rect::new(0.0, 0.0, 48.0, 48.0);
        assert_eq!(list.commands.len(), 3);
        assert_eq!(
            list.commands[0],
            PaintCommand::PushClip {
                rect: square,
                radius: 24.0,
            }
        );
        assert!(matches!(&list.commands[1], PaintCommand::Image { rect, .. } if *rect == square));
        assert_eq!(list.commands[2], PaintCommand::PopClip);
    }

    #[test]
    fn icons_take_their_class_size_and_color() {
        let node = Node::div("text-gray-500").child(Node::icon("w-5 h-5", Icon::Send));
        let list = lay_out(&node, 100.0, &Mono::default());
        let icon = list
            .commands
            .iter()
            .find_map(|c| match c {
                PaintCommand::Icon { rect, color, .. } => Some((*rect, *color)),
                _ => None,
            })
            .unwrap();
        assert_eq!(icon.0, Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(icon.1, Color::rgb(0x6b, 0x72, 0x80));
    }

    #[test]
    fn overflow_hidden_clips_children() {
        let node = Node::div("rounded-lg overflow-hidden bg-white")
            .child(Node::div("h-4 bg-gray-100"));
        let list = lay_out(&node, 100.0, &Mono::default());
        assert!(matches!(list.commands[0], PaintCommand::FillRect { radius, .. } if radius == 8.0));
        assert!(matches!(list.commands[1], PaintCommand::PushClip { .. }));
        assert!(matches!(list.commands.last(), Some(PaintCommand::PopClip)));
    }

    #[test]
    fn invisible_and_hidden_nodes_are_not_painted() {
        let node = Node::div("")
            .child(Node::span("opacity-0").child(Node::text("ghost")))
            .child(Node::div("hidden").child(Node::text("gone")))
            .child(Node::span("").child(Node::text("seen")));
        let list = lay_out(&node, 500.0, &Mono::default());
        assert_eq!(list.joined_text(), "seen");
    }

    #[test]
    fn single_side_borders_are_strips() {
        let node = Node::div("border-t border-gray-200 h-4");
        let list = lay_out(&node, 100.0, &Mono::default());
        assert_eq!(
            list.commands,
            [PaintCommand::FillRect {
                rect: Rect::new(0.0, 0.0, 100.0, 1.0),
                radius: 0.0,
                color: Color::rgb(0xe5, 0xe7, 0xeb),
            }]
        );
    }

    #[test]
    fn negative_spacing_overlaps_flex_items() {
        let node = Node::div("flex -space-x-1").with_children((0..3).map(|_| Node::div("w-4 h-4")));
        let styled = style_tree(&node, DESKTOP);
        let root = layout_tree(&styled, 100.0, &Mono::default()).unwrap();
        let xs: Vec<f32> = root.children.iter().map(|c| c.rect.x).collect();
        assert_eq!(xs, [0.0, 12.0, 24.0]);
    }

    #[test]
    fn flex_items_shrink_to_their_text() {
        // "Like" at 12px is 24px wide; the icon and its margin add 24.
        let node = Node::div("flex items-center")
            .child(Node::icon("w-5 h-5 mr-1", Icon::Send))
            .child(Node::span("text-xs").child(Node::text("Like")));
        let styled = style_tree(&node, DESKTOP);
        let root = layout_tree(&styled, 300.0, &Mono::default()).unwrap();
        let label = root.find_class("text-xs").unwrap();
        assert_eq!(label.rect, Rect::new(24.0, 2.0, 24.0, 16.0));
        assert_eq!(label.runs[0].text, "Like");
        assert_eq!(root.rect.height, 20.0);
    }

    #[test]
    fn atomic_inlines_wrap_like_words() {
        // Each button is 5 chars at 8px plus 4px of padding a side.
        let node = Node::paragraph("").with_children(
            ["#aaaa", "#bbbb", "#cccc"]
                .map(|tag| Node::button("px-1").child(Node::text(tag))),
        );
        let styled = style_tree(&node, DESKTOP);
        let root = layout_tree(&styled, 100.0, &Mono::default()).unwrap();
        let spots: Vec<(f32, f32)> = root.children.iter().map(|c| (c.rect.x, c.rect.y)).collect();
        assert_eq!(spots, [(0.0, 0.0), (48.0, 0.0), (0.0, 24.0)]);
        assert_eq!(root.rect.height, 48.0);
    }

    #[test]
    fn higher_z_paints_later() {
        let node = Node::div("flex")
            .child(Node::span("w-4 h-4 bg-blue-600 z-30"))
            .child(Node::span("w-4 h-4 bg-red-500 z-20"));
        let list = lay_out(&node, 100.0, &Mono::default());
        let colors: Vec<Color> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                PaintCommand::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, [Color::rgb(0xef, 0x44, 0x44), Color::rgb(0x25, 0x63, 0xeb)]);
    }
}
