//! Post card renderer.
//!
//! [`render_preview`] is a pure function of the record and the display
//! options.  It produces the whole card as a [`Node`] tree; re-running it
//! after every record change is cheap.

use serde::{Deserialize, Serialize};

use crate::icons::Icon;
use crate::text::{Segment, TRUNCATE_WORDS, format_count, split_hashtags, truncate_words};
use crate::types::PostRecord;
use crate::view::{Action, ImageNode, Node};

/// Avatar shown when the record has none or the image fails to load.
pub const DEFAULT_PROFILE_PICTURE: &str =
    "https://cdn.pixabay.com/photo/2015/10/05/22/37/blank-profile-picture-973460_1280.png";

/// Shown in place of an empty name.
pub const NAME_PLACEHOLDER: &str = "LinkedIn User";
/// Shown in place of an empty position.
pub const POSITION_PLACEHOLDER: &str = "Position";
/// Shown in place of an empty post time.
pub const TIME_PLACEHOLDER: &str = "Just now";
/// Shown in place of empty post content.
pub const CONTENT_PLACEHOLDER: &str = "Write your post content here...";
/// Label of the content expansion control.
pub const SHOW_MORE_LABEL: &str = "show more";

/// Which flavour of the post card to draw.
///
/// Exactly one variant is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PreviewVariant {
    /// Full content, and a Like button with a hover-revealed reaction
    /// picker.  Exported through the isolated capture path so the picker
    /// never shows up in the image.
    #[default]
    Reactions,
    /// Long content is cut after [`TRUNCATE_WORDS`] words behind a
    /// "show more" control.  Has no hover-only elements.
    Expandable,
}

impl PreviewVariant {
    pub const ALL: [Self; 2] = [Self::Reactions, Self::Expandable];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reactions => "Reactions",
            Self::Expandable => "Expandable",
        }
    }
}

/// Options for [`render_preview`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreviewOptions {
    pub variant: PreviewVariant,
    /// Whether the reader has expanded truncated content.  Only used by
    /// [`PreviewVariant::Expandable`].
    pub expanded: bool,
}

/// Render `record` as a post card.
#[must_use]
pub fn render_preview(record: &PostRecord, options: &PreviewOptions) -> Node {
    let mut card = Node::div("bg-white rounded-lg shadow-md max-w-lg w-full overflow-hidden")
        .child(render_header(record))
        .child(render_body(record, options));
    if let Some(counts) = render_counts(record) {
        card = card.child(counts);
    }
    card.child(render_actions(options.variant))
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

fn render_header(record: &PostRecord) -> Node {
    let src = record
        .profile_picture
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_PROFILE_PICTURE);

    let avatar = Node::div("w-12 h-12 overflow-hidden rounded-full border border-gray-200").child(
        Node::image(
            "w-full h-full object-cover",
            ImageNode {
                src: src.to_owned(),
                fallback: Some(DEFAULT_PROFILE_PICTURE),
                alt: "Profile",
            },
        ),
    );

    let time = format!("{} ", or_placeholder(&record.post_time, TIME_PLACEHOLDER));
    let identity = Node::div("")
        .child(
            Node::heading("font-semibold text-gray-900")
                .child(Node::text(or_placeholder(&record.full_name, NAME_PLACEHOLDER))),
        )
        .child(
            Node::paragraph("text-xs text-gray-500 leading-tight")
                .child(Node::text(or_placeholder(&record.position, POSITION_PLACEHOLDER))),
        )
        .child(
            Node::paragraph("text-xs text-gray-500 flex items-center")
                .child(Node::text(time))
                .child(
                    Node::span("inline-block ml-1")
                        .child(Node::icon("w-3 h-3 inline", Icon::Audience)),
                ),
        );

    Node::div("bg-white px-4 py-3 border-b border-gray-200")
        .child(Node::div("flex items-center space-x-3").child(avatar).child(identity))
}

/// Text and hashtag nodes for a run of post content.
fn content_nodes(content: &str) -> impl Iterator<Item = Node> + '_ {
    split_hashtags(content).into_iter().map(|segment| match segment {
        Segment::Text(t) => Node::text(t),
        Segment::Hashtag(tag) => {
            Node::button("text-[#0A66C2] hover:text-[#004182] hover:underline hover:decoration-[#004182] font-medium")
                .child(Node::text(tag))
        }
    })
}

fn render_body(record: &PostRecord, options: &PreviewOptions) -> Node {
    let content = or_placeholder(&record.post_content, CONTENT_PLACEHOLDER);
    let mut paragraph = Node::paragraph("text-gray-800 whitespace-pre-wrap mb-4");

    let truncated = truncate_words(content, TRUNCATE_WORDS);
    if options.variant == PreviewVariant::Expandable
        && truncated.is_truncated
        && !options.expanded
    {
        paragraph = paragraph
            .with_children(content_nodes(truncated.text))
            .child(Node::text(" "))
            .child(
                Node::action_button(
                    "text-gray-500 hover:text-[#0A66C2] hover:underline font-medium",
                    Action::ExpandContent,
                )
                .child(Node::text(SHOW_MORE_LABEL)),
            );
    } else {
        paragraph = paragraph.with_children(content_nodes(content));
    }

    let mut body = Node::div("p-4").child(paragraph);
    if let Some(src) = record.post_image.as_deref().filter(|s| !s.is_empty()) {
        body = body.child(Node::div("mb-4 -mx-4").child(Node::image(
            "w-full object-cover max-h-[400px]",
            ImageNode {
                src: src.to_owned(),
                fallback: None,
                alt: "Post",
            },
        )));
    }
    body
}

fn count_button(label: String) -> Node {
    Node::button("hover:underline hover:text-blue-600 transition-colors").child(Node::text(label))
}

/// Engagement counts, or `None` when there are no likes.
fn render_counts(record: &PostRecord) -> Option<Node> {
    if record.likes_count == 0 {
        return None;
    }

    let badges = Node::div("flex -space-x-1 mr-1")
        .child(
            Node::span("flex justify-center items-center bg-blue-600 text-white rounded-full w-4 h-4 border-2 border-white z-30")
                .child(Node::icon("w-2 h-2", Icon::ThumbsUp)),
        )
        .child(
            Node::span("flex justify-center items-center bg-red-500 text-white rounded-full w-4 h-4 border-2 border-white z-20")
                .child(Node::icon("w-2 h-2", Icon::Heart)),
        );

    let likes = Node::div("flex items-center")
        .child(badges)
        .child(count_button(format_count(record.likes_count)));

    let mut row = Node::div("flex items-center justify-between text-xs text-gray-500").child(likes);

    let (comments, shares) = (record.comments_count, record.shares_count);
    if comments > 0 || shares > 0 {
        let mut group = Node::div("flex items-center space-x-2 text-gray-500");
        if comments > 0 {
            group = group.child(count_button(format!("{} comments", format_count(comments))));
        }
        if comments > 0 && shares > 0 {
            group = group.child(Node::span("").child(Node::text("•")));
        }
        if shares > 0 {
            group = group.child(count_button(format!("{} shares", format_count(shares))));
        }
        row = row.child(group);
    }

    Some(Node::div("px-4 py-2 border-t border-gray-200").child(row))
}

fn action_button(icon: Icon, label: &'static str) -> Node {
    Node::button("flex items-center justify-center px-2 py-2 hover:bg-gray-100 rounded-md transition text-gray-500 flex-1")
        .child(Node::icon("w-5 h-5 mr-1", icon))
        .child(Node::span("text-xs sm:text-sm").child(Node::text(label)))
}

fn reaction_option(icon: Icon, icon_class: &'static str, label: &'static str) -> Node {
    Node::button("p-2 hover:bg-gray-100 rounded-full flex flex-col items-center group/reaction")
        .child(Node::icon(icon_class, icon))
        .child(
            Node::span("text-xs opacity-0 group-hover/reaction:opacity-100 absolute bottom-full bg-black text-white px-2 py-1 rounded whitespace-nowrap")
                .child(Node::text(label)),
        )
}

fn render_actions(variant: PreviewVariant) -> Node {
    let like = match variant {
        PreviewVariant::Reactions => Node::div("group relative flex-1")
            .child(
                Node::button("w-full flex items-center justify-center px-2 py-2 hover:bg-gray-100 rounded-md transition text-gray-500")
                    .child(Node::icon("w-5 h-5 mr-1", Icon::ThumbsUp))
                    .child(Node::span("text-xs sm:text-sm").child(Node::text("Like"))),
            )
            .child(
                Node::div("hidden group-hover:flex absolute bottom-full left-0 bg-white shadow-lg rounded-full p-1 border border-gray-200 z-50")
                    .child(reaction_option(Icon::ThumbsUp, "w-6 h-6 text-blue-600 mb-1", "Like"))
                    .child(reaction_option(Icon::Heart, "w-6 h-6 text-red-500 mb-1", "Love")),
            ),
        PreviewVariant::Expandable => action_button(Icon::ThumbsUp, "Like"),
    };

    Node::div("px-2 py-2 border-t border-gray-200").child(
        Node::div("flex justify-between")
            .child(like)
            .child(action_button(Icon::MessageSquare, "Comment"))
            .child(action_button(Icon::Repeat, "Share"))
            .child(action_button(Icon::Send, "Send")),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::view::Kind;

    fn reactions() -> PreviewOptions {
        PreviewOptions::default()
    }

    fn expandable(expanded: bool) -> PreviewOptions {
        PreviewOptions {
            variant: PreviewVariant::Expandable,
            expanded,
        }
    }

    fn hashtag_buttons(tree: &Node) -> Vec<String> {
        tree.find_all(|n| matches!(n.kind, Kind::Button(None)) && n.has_class("text-[#0A66C2]"))
            .into_iter()
            .map(Node::text_content)
            .collect()
    }

    fn has_text(tree: &Node, text: &str) -> bool {
        tree.find(|n| matches!(&n.kind, Kind::Text(t) if t == text)).is_some()
    }

    fn show_more(tree: &Node) -> Option<&Node> {
        tree.find(|n| n.kind == Kind::Button(Some(Action::ExpandContent)))
    }

    fn content_paragraph(tree: &Node) -> &Node {
        tree.find(|n| n.kind == Kind::Paragraph && n.has_class("whitespace-pre-wrap"))
            .unwrap()
    }

    #[test]
    fn demo_record_shows_likes_and_counts() {
        let tree = render_preview(&PostRecord::demo(), &reactions());
        assert!(has_text(&tree, "142"));
        assert!(has_text(&tree, "23 comments"));
        assert!(has_text(&tree, "7 shares"));
        assert!(has_text(&tree, "•"));
        assert!(has_text(&tree, "John Doe"));
    }

    #[test]
    fn zero_likes_removes_counts_region() {
        let mut record = PostRecord::demo();
        record.likes_count = 0;
        record.comments_count = 5000;
        record.shares_count = 12;
        let tree = render_preview(&record, &reactions());
        assert!(!has_text(&tree, "5.0k comments"));
        assert!(!has_text(&tree, "12 shares"));
        assert!(tree.find(|n| n.has_class("-space-x-1")).is_none());
    }

    #[test]
    fn separator_needs_both_comments_and_shares() {
        let mut record = PostRecord::demo();
        record.shares_count = 0;
        let tree = render_preview(&record, &reactions());
        assert!(has_text(&tree, "23 comments"));
        assert!(!has_text(&tree, "•"));

        record.comments_count = 0;
        let tree = render_preview(&record, &reactions());
        assert!(tree.find(|n| n.has_class("space-x-2")).is_none());
        assert!(has_text(&tree, "142"));
    }

    #[test]
    fn large_counts_are_abbreviated() {
        let mut record = PostRecord::demo();
        record.likes_count = 1500;
        record.comments_count = 23000;
        let tree = render_preview(&record, &reactions());
        assert!(has_text(&tree, "1.5k"));
        assert!(has_text(&tree, "23.0k comments"));
    }

    #[test]
    fn empty_fields_render_placeholders() {
        let record = PostRecord {
            likes_count: 1,
            ..PostRecord::default()
        };
        let tree = render_preview(&record, &reactions());
        assert!(has_text(&tree, NAME_PLACEHOLDER));
        assert!(has_text(&tree, POSITION_PLACEHOLDER));
        assert!(has_text(&tree, "Just now "));
        assert!(has_text(&tree, CONTENT_PLACEHOLDER));

        let avatar = tree
            .find(|n| matches!(&n.kind, Kind::Image(img) if img.alt == "Profile"))
            .unwrap();
        let Kind::Image(img) = &avatar.kind else {
            unreachable!()
        };
        assert_eq!(img.src, DEFAULT_PROFILE_PICTURE);
        assert_eq!(img.fallback, Some(DEFAULT_PROFILE_PICTURE));
    }

    #[test]
    fn hashtags_become_buttons_and_text_is_preserved() {
        let mut record = PostRecord::demo();
        record.post_content = "Shipped!\n\n  #Rust   and\t#Wasm\n".into();
        let tree = render_preview(&record, &reactions());
        assert_eq!(hashtag_buttons(&tree), vec!["#Rust", "#Wasm"]);
        assert_eq!(content_paragraph(&tree).text_content(), record.post_content);
    }

    #[test]
    fn post_image_is_optional() {
        let mut record = PostRecord::demo();
        let tree = render_preview(&record, &reactions());
        assert!(tree.find(|n| matches!(&n.kind, Kind::Image(img) if img.alt == "Post")).is_some());

        record.post_image = None;
        let tree = render_preview(&record, &reactions());
        assert!(tree.find(|n| matches!(&n.kind, Kind::Image(img) if img.alt == "Post")).is_none());
    }

    #[test]
    fn reactions_variant_has_hover_panel_and_no_truncation() {
        let mut record = PostRecord::demo();
        record.post_content = (1..=20).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let tree = render_preview(&record, &reactions());
        assert!(tree.find(|n| n.has_class("group-hover:flex")).is_some());
        assert!(has_text(&tree, "Love"));
        assert!(show_more(&tree).is_none());
        assert_eq!(content_paragraph(&tree).text_content(), record.post_content);
    }

    #[test]
    fn expandable_variant_truncates_until_expanded() {
        let mut record = PostRecord::demo();
        let words: Vec<String> = (1..=20).map(|i| format!("w{i}")).collect();
        record.post_content = words.join(" ");

        let collapsed = render_preview(&record, &expandable(false));
        let control = show_more(&collapsed).unwrap();
        assert_eq!(control.text_content(), SHOW_MORE_LABEL);
        let shown = content_paragraph(&collapsed).text_content();
        let shown_words: Vec<&str> = shown.split_whitespace().collect();
        assert_eq!(shown_words[..15], words[..15]);
        assert_eq!(shown_words[15..], ["show", "more"]);
        assert!(collapsed.find(|n| n.has_class("group-hover:flex")).is_none());

        let expanded = render_preview(&record, &expandable(true));
        assert!(show_more(&expanded).is_none());
        assert_eq!(content_paragraph(&expanded).text_content(), record.post_content);
    }

    #[test]
    fn expandable_variant_leaves_short_content_alone() {
        let tree = render_preview(&PostRecord::demo(), &expandable(false));
        // The demo post is longer than the cut-off.
        assert!(show_more(&tree).is_some());

        let mut record = PostRecord::demo();
        record.post_content = "Short and sweet #ok".into();
        let tree = render_preview(&record, &expandable(false));
        assert!(show_more(&tree).is_none());
        assert_eq!(hashtag_buttons(&tree), vec!["#ok"]);
    }

    #[test]
    fn action_row_has_four_decorative_buttons() {
        for options in [reactions(), expandable(false)] {
            let tree = render_preview(&PostRecord::demo(), &options);
            for label in ["Like", "Comment", "Share", "Send"] {
                assert!(has_text(&tree, label), "{label} missing for {options:?}");
            }
            let actions = tree.find_all(|n| matches!(n.kind, Kind::Button(Some(_))));
            assert!(actions.iter().all(|n| n.text_content() == SHOW_MORE_LABEL));
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let record = PostRecord::demo();
        assert_eq!(
            render_preview(&record, &reactions()),
            render_preview(&record, &reactions())
        );
    }
}
