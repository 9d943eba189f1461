//! DOM rendering of the post card.

use dioxus::prelude::*;
use postcraft_core::{Action, Icon, IconPaint, ImageNode, Kind, Node};

/// Props for the [`PostPreview`] component.
#[derive(Props, Clone, PartialEq)]
pub struct PostPreviewProps {
    /// The rendered card.
    tree: Node,
    /// Called when the reader activates a button bound to an [`Action`].
    on_action: EventHandler<Action>,
}

/// Props for the [`FallbackImage`] component.
#[derive(Props, Clone, PartialEq)]
struct FallbackImageProps {
    class: String,
    image: ImageNode,
}

/// An `<img>` that swaps to its fallback source after a load error.
///
/// The failure is remembered per source, so editing the URL to a new
/// value tries it again instead of staying on the fallback.
#[component]
fn FallbackImage(props: FallbackImageProps) -> Element {
    let mut failed_src = use_signal(|| Option::<String>::None);
    let src = match props.image.fallback {
        Some(fallback) if failed_src.read().as_deref() == Some(props.image.src.as_str()) => {
            fallback.to_owned()
        }
        _ => props.image.src.clone(),
    };
    let primary = props.image.src.clone();

    rsx! {
        img {
            class: "{props.class}",
            src,
            alt: props.image.alt,
            onerror: move |_| {
                if failed_src.peek().as_deref() != Some(primary.as_str()) {
                    failed_src.set(Some(primary.clone()));
                }
            },
        }
    }
}

fn render_icon(class: &str, icon: Icon) -> Element {
    let view_box = icon.view_box_attr();
    match icon.paint() {
        IconPaint::Fill => rsx! {
            svg {
                class: "{class}",
                view_box,
                fill: "currentColor",
                for d in icon.paths() {
                    path { d: *d }
                }
            }
        },
        IconPaint::Stroke(width) => rsx! {
            svg {
                class: "{class}",
                view_box,
                fill: "none",
                stroke: "currentColor",
                stroke_width: "{width}",
                stroke_linecap: "round",
                stroke_linejoin: "round",
                for d in icon.paths() {
                    path { d: *d }
                }
            }
        },
    }
}

fn render_node(node: &Node, on_action: EventHandler<Action>) -> Element {
    let class = node.class.as_ref();
    let children = node.children.iter().map(|c| render_node(c, on_action));
    match &node.kind {
        Kind::Div => rsx! {
            div { class: "{class}", {children} }
        },
        Kind::Paragraph => rsx! {
            p { class: "{class}", {children} }
        },
        Kind::Heading => rsx! {
            h3 { class: "{class}", {children} }
        },
        Kind::Span => rsx! {
            span { class: "{class}", {children} }
        },
        Kind::Button(Some(action)) => {
            let action = *action;
            rsx! {
                button {
                    class: "{class}",
                    onclick: move |_| on_action.call(action),
                    {children}
                }
            }
        }
        Kind::Button(None) => rsx! {
            button { class: "{class}", {children} }
        },
        Kind::Text(text) => rsx! { "{text}" },
        Kind::Image(image) => rsx! {
            FallbackImage { class: class.to_owned(), image: image.clone() }
        },
        Kind::Icon(icon) => render_icon(class, *icon),
    }
}

/// The post card as it appears on the page.
#[component]
pub fn PostPreview(props: PostPreviewProps) -> Element {
    render_node(&props.tree, props.on_action)
}
