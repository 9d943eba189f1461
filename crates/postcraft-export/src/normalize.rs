//! Style corrections applied to the isolated capture tree.
//!
//! The live card relies on browser behaviour that a static capture does
//! not reproduce faithfully: default flex alignment, sibling spacing
//! utilities, icon margins, and responsive text sizes.  This pass pins
//! those down explicitly before layout.  Each rule is keyed by a class
//! the renderer emits; nothing else is touched.

use crate::style::{Align, Display, Justify, REM, StyledNode};

/// Gap and icon margin forced by the pass.
const HALF_REM: f32 = 0.5 * REM;

/// Apply the corrections to `node` and its whole subtree.
pub fn normalize(node: &mut StyledNode<'_>) {
    let style = &mut node.style;

    // Flex containers centre their items on the cross axis.
    if style.display == Display::Flex {
        style.align_items = Align::Center;
    }

    // Action buttons become centred flex boxes.
    if node.node.has_class("flex-1") {
        style.display = Display::Flex;
        style.align_items = Align::Center;
        style.justify = Justify::Center;
    }

    // Icons keep a half-rem gap to their label.
    if node.node.has_class("mr-1") || node.node.has_class("mr-2") {
        style.margin.right = HALF_REM;
    }

    // Small text is pinned to 0.75rem / 1rem even where a responsive
    // variant would enlarge it.
    if node.node.has_class("text-xs") {
        style.font_size = Some(0.75 * REM);
        style.line_height = Some(REM);
        style.line_height_factor = None;
    }

    if node.node.has_class("space-x-2") {
        style.gap = HALF_REM;
    }

    for child in &mut node.children {
        normalize(child);
    }
}
