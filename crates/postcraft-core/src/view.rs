//! The visual tree produced by the preview renderer.
//!
//! A [`Node`] tree is a framework-neutral description of the post card.
//! Every node carries a Tailwind class list: the browser view turns the
//! tree into DOM elements with those classes, and the exporter resolves
//! the same classes into layout styles for rasterization.

use std::borrow::Cow;

use crate::icons::Icon;

/// Interactive behaviour attached to a button node.
///
/// Buttons without an action are purely decorative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Reveal the full post content ("show more").
    ExpandContent,
}

/// An image element with an optional fallback source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageNode {
    /// Primary source (URL or data URL).
    pub src: String,
    /// Source to swap in when `src` fails to load.
    pub fallback: Option<&'static str>,
    /// Alternative text.
    pub alt: &'static str,
}

/// What a node is.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// Block container (`<div>`).
    Div,
    /// Paragraph; children flow inline (`<p>`).
    Paragraph,
    /// Heading (`<h3>`).
    Heading,
    /// Inline container (`<span>`).
    Span,
    /// Button, optionally bound to an [`Action`].
    Button(Option<Action>),
    /// Bare text.  Whitespace is significant.
    Text(String),
    /// Image element.
    Image(ImageNode),
    /// Inline vector icon.
    Icon(Icon),
}

/// One element of the visual tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: Kind,
    /// Space-separated Tailwind utility classes.
    pub class: Cow<'static, str>,
    pub children: Vec<Self>,
}

impl Node {
    fn new(kind: Kind, class: &'static str) -> Self {
        Self {
            kind,
            class: Cow::Borrowed(class),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn div(class: &'static str) -> Self {
        Self::new(Kind::Div, class)
    }

    #[must_use]
    pub fn paragraph(class: &'static str) -> Self {
        Self::new(Kind::Paragraph, class)
    }

    #[must_use]
    pub fn heading(class: &'static str) -> Self {
        Self::new(Kind::Heading, class)
    }

    #[must_use]
    pub fn span(class: &'static str) -> Self {
        Self::new(Kind::Span, class)
    }

    #[must_use]
    pub fn button(class: &'static str) -> Self {
        Self::new(Kind::Button(None), class)
    }

    /// A button that triggers `action` when activated.
    #[must_use]
    pub fn action_button(class: &'static str, action: Action) -> Self {
        Self::new(Kind::Button(Some(action)), class)
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Kind::Text(text.into()), "")
    }

    #[must_use]
    pub fn image(class: &'static str, image: ImageNode) -> Self {
        Self::new(Kind::Image(image), class)
    }

    #[must_use]
    pub fn icon(class: &'static str, icon: Icon) -> Self {
        Self::new(Kind::Icon(icon), class)
    }

    /// Append a child and return `self`, for building trees inline.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children and return `self`.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Iterate over the class tokens.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.class.split_whitespace()
    }

    /// Returns `true` if the class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Concatenated text of this node and all descendants, in order.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Kind::Text(t) = &self.kind {
            out.push_str(t);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Depth-first pre-order traversal, including `self`.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Collect every node in the subtree matching `pred`.
    #[must_use]
    pub fn find_all(&self, pred: impl Fn(&Self) -> bool) -> Vec<&Self> {
        let mut found = Vec::new();
        self.walk(&mut |n| {
            if pred(n) {
                found.push(n);
            }
        });
        found
    }

    /// First node in the subtree matching `pred`.
    #[must_use]
    pub fn find(&self, pred: impl Fn(&Self) -> bool) -> Option<&Self> {
        self.find_all(pred).into_iter().next()
    }
}
