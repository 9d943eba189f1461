//! Capture planning: which tree gets rasterized, and how.
//!
//! The `Reactions` card carries a hover-revealed reaction picker that must
//! never appear in an export, so it is captured from an isolated copy with
//! hover-only nodes removed and the normalization pass applied.  The
//! `Expandable` card has nothing hover-only and is captured as-is.

use std::borrow::Cow;

use postcraft_core::{Kind, Node, PreviewVariant};

use crate::config::ExportConfig;
use crate::layout::{LayoutError, Measure, layout_tree, paint};
use crate::normalize::normalize;
use crate::paint::DisplayList;
use crate::style::{Viewport, style_tree};

/// How a card is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureMode {
    /// Offscreen copy without hover-only nodes, images given time to
    /// settle, styles normalized.
    Isolated,
    /// The live tree, immediately, without corrections.
    Direct,
}

impl CaptureMode {
    #[must_use]
    pub const fn for_variant(variant: PreviewVariant) -> Self {
        match variant {
            PreviewVariant::Reactions => Self::Isolated,
            PreviewVariant::Expandable => Self::Direct,
        }
    }

    /// Whether the normalization pass runs before layout.
    #[must_use]
    pub const fn normalizes(self) -> bool {
        matches!(self, Self::Isolated)
    }

    /// Milliseconds to wait for images before rasterizing.
    #[must_use]
    pub const fn settle_delay_ms(self, config: &ExportConfig) -> u32 {
        match self {
            Self::Isolated => config.settle_delay_ms,
            Self::Direct => 0,
        }
    }
}

/// Whether `variant` (the part before `:`) only applies during
/// interaction.
fn is_state_variant(variant: &str) -> bool {
    matches!(variant, "hover" | "focus" | "active") || variant.starts_with("group-hover")
}

fn is_state_class(class: &str) -> bool {
    class
        .rsplit_once(':')
        .is_some_and(|(variant, _)| is_state_variant(variant))
}

/// A node that is hidden until hovered (`hidden group-hover:flex`).
#[must_use]
pub fn is_hover_only(node: &Node) -> bool {
    node.has_class("hidden") && node.classes().any(is_state_class)
}

/// Deep copy of `node` without hover-only subtrees or state variants.
#[must_use]
pub fn isolate(node: &Node) -> Node {
    let class = if node.classes().any(is_state_class) {
        Cow::Owned(
            node.classes()
                .filter(|c| !is_state_class(c))
                .collect::<Vec<_>>()
                .join(" "),
        )
    } else {
        node.class.clone()
    };
    Node {
        kind: node.kind.clone(),
        class,
        children: node
            .children
            .iter()
            .filter(|c| !is_hover_only(c))
            .map(isolate)
            .collect(),
    }
}

/// The tree a capture in `mode` rasterizes.
#[must_use]
pub fn prepare(tree: &Node, mode: CaptureMode) -> Cow<'_, Node> {
    match mode {
        CaptureMode::Isolated => Cow::Owned(isolate(tree)),
        CaptureMode::Direct => Cow::Borrowed(tree),
    }
}

/// Every image source (including fallbacks) in `tree`, first occurrence
/// order, without duplicates.  These must be loaded before layout.
#[must_use]
pub fn image_sources(tree: &Node) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    tree.walk(&mut |node| {
        if let Kind::Image(image) = &node.kind {
            let candidates = std::iter::once(image.src.as_str()).chain(image.fallback);
            for src in candidates {
                if !src.is_empty() && !sources.iter().any(|s| s == src) {
                    sources.push(src.to_owned());
                }
            }
        }
    });
    sources
}

/// Style, lay out, and paint `tree` for a capture in `mode`.
///
/// # Errors
///
/// Returns [`LayoutError`] if the layout engine rejects the tree.
pub fn build_display_list<M: Measure + ?Sized>(
    tree: &Node,
    mode: CaptureMode,
    config: &ExportConfig,
    measure: &M,
) -> Result<DisplayList, LayoutError> {
    let tree = prepare(tree, mode);
    let mut styled = style_tree(
        &tree,
        Viewport {
            width: config.viewport_width,
        },
    );
    if mode.normalizes() {
        normalize(&mut styled);
    }
    Ok(paint(&layout_tree(&styled, config.capture_width, measure)?))
}
