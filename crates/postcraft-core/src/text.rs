//! Text shaping for the post card: engagement counts, hashtags, and
//! word truncation.

use std::sync::LazyLock;

use regex::Regex;

/// Number of words shown before the "show more" control.
pub const TRUNCATE_WORDS: usize = 15;

/// `#` followed by one or more ASCII word characters.
static HASHTAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"#[A-Za-z0-9_]+").ok());

/// Format an engagement count for display.
///
/// Counts below 1000 are shown as-is.  Larger counts are shown in
/// thousands with one decimal, rounded half up.  Integer arithmetic keeps
/// exact ties exact, so `1150` becomes `1.2k` where a binary float
/// `toFixed(1)` would print `1.1k`.
///
/// ```
/// use postcraft_core::format_count;
///
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1000), "1.0k");
/// assert_eq!(format_count(1500), "1.5k");
/// assert_eq!(format_count(23000), "23.0k");
/// ```
#[must_use]
pub fn format_count(count: u64) -> String {
    if count < 1000 {
        return count.to_string();
    }
    // Tenths of a thousand, rounded half up.
    let tenths = count / 100 + u64::from(count % 100 >= 50);
    format!("{}.{}k", tenths / 10, tenths % 10)
}

/// A run of post text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Ordinary text, rendered verbatim.
    Text(&'a str),
    /// A `#tag` token, including the leading `#`.
    Hashtag(&'a str),
}

impl<'a> Segment<'a> {
    /// The raw text of the segment.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        match self {
            Self::Text(s) | Self::Hashtag(s) => s,
        }
    }
}

/// Split post content into text and hashtag segments.
///
/// Concatenating the segments reproduces `content` exactly; empty text
/// runs between adjacent matches are dropped.
#[must_use]
pub fn split_hashtags(content: &str) -> Vec<Segment<'_>> {
    let Some(re) = HASHTAG.as_ref() else {
        return vec![Segment::Text(content)];
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in re.find_iter(content) {
        if m.start() > last {
            segments.push(Segment::Text(&content[last..m.start()]));
        }
        segments.push(Segment::Hashtag(m.as_str()));
        last = m.end();
    }
    if last < content.len() {
        segments.push(Segment::Text(&content[last..]));
    }
    segments
}

/// Result of [`truncate_words`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncated<'a> {
    /// Text to display.
    pub text: &'a str,
    /// `true` if words were cut and a "show more" control is needed.
    pub is_truncated: bool,
}

/// Keep the first `max_words` whitespace-separated words of `content`.
///
/// The kept prefix is a slice of the original string ending at the last
/// kept word, so line breaks inside it are preserved.  Content with at
/// most `max_words` words is returned unchanged.
#[must_use]
pub fn truncate_words(content: &str, max_words: usize) -> Truncated<'_> {
    let mut words = 0;
    let mut in_word = false;
    for (i, ch) in content.char_indices() {
        if ch.is_whitespace() {
            if in_word && words == max_words {
                if content[i..].split_whitespace().next().is_none() {
                    break;
                }
                return Truncated {
                    text: &content[..i],
                    is_truncated: true,
                };
            }
            in_word = false;
        } else if !in_word {
            in_word = true;
            words += 1;
        }
    }
    Truncated {
        text: content,
        is_truncated: false,
    }
}
