//! The post record and partial updates to it.

use serde::{Deserialize, Serialize};

/// Profile picture shown by [`PostRecord::demo`].
pub const DEMO_PROFILE_PICTURE: &str =
    "https://images.pexels.com/photos/220453/pexels-photo-220453.jpeg?auto=compress&cs=tinysrgb&w=600";

/// Post image shown by [`PostRecord::demo`].
pub const DEMO_POST_IMAGE: &str = "https://images.pexels.com/photos/577585/pexels-photo-577585.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1";

/// Post body shown by [`PostRecord::demo`].
pub const DEMO_POST_CONTENT: &str = "I'm excited to share that I've just launched my new website! Check it out and let me know what you think. #WebDevelopment #NewBeginnings";

/// Everything shown on the post card.
///
/// There is exactly one live record in the application.  It is created
/// from [`PostRecord::demo`] at startup and mutated in place through
/// [`PostRecord::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostRecord {
    /// Display name of the author.
    pub full_name: String,

    /// Subtitle line under the name (job title, company).
    pub position: String,

    /// Free-form relative time label, e.g. `"2h"`.
    pub post_time: String,

    /// Avatar source: an `http(s)://` URL or an image data URL.
    ///
    /// `None` renders the placeholder avatar.
    pub profile_picture: Option<String>,

    /// Post body.  `#word` tokens render as hashtag links.
    pub post_content: String,

    /// Optional image attached to the post.
    pub post_image: Option<String>,

    /// Number of reactions.  Zero hides the whole counts row.
    pub likes_count: u64,

    /// Number of comments.
    pub comments_count: u64,

    /// Number of reposts.
    pub shares_count: u64,
}

impl PostRecord {
    /// The record the application starts with.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            full_name: "John Doe".to_owned(),
            position: String::new(),
            post_time: String::new(),
            profile_picture: Some(DEMO_PROFILE_PICTURE.to_owned()),
            post_content: DEMO_POST_CONTENT.to_owned(),
            post_image: Some(DEMO_POST_IMAGE.to_owned()),
            likes_count: 142,
            comments_count: 23,
            shares_count: 7,
        }
    }

    /// Merge `patch` into this record, replacing only the supplied fields.
    pub fn apply(&mut self, patch: PostPatch) {
        let PostPatch {
            full_name,
            position,
            post_time,
            profile_picture,
            post_content,
            post_image,
            likes_count,
            comments_count,
            shares_count,
        } = patch;

        if let Some(v) = full_name {
            self.full_name = v;
        }
        if let Some(v) = position {
            self.position = v;
        }
        if let Some(v) = post_time {
            self.post_time = v;
        }
        if let Some(v) = profile_picture {
            self.profile_picture = v;
        }
        if let Some(v) = post_content {
            self.post_content = v;
        }
        if let Some(v) = post_image {
            self.post_image = v;
        }
        if let Some(v) = likes_count {
            self.likes_count = v;
        }
        if let Some(v) = comments_count {
            self.comments_count = v;
        }
        if let Some(v) = shares_count {
            self.shares_count = v;
        }
    }
}

/// A partial [`PostRecord`].
///
/// `None` leaves the field untouched.  The optional image fields are
/// doubly wrapped so a patch can clear them: `Some(None)` removes the
/// image, `Some(Some(src))` replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostPatch {
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub post_time: Option<String>,
    pub profile_picture: Option<Option<String>>,
    pub post_content: Option<String>,
    pub post_image: Option<Option<String>>,
    pub likes_count: Option<u64>,
    pub comments_count: Option<u64>,
    pub shares_count: Option<u64>,
}

impl PostPatch {
    /// Returns `true` if the patch would not change any field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.position.is_none()
            && self.post_time.is_none()
            && self.profile_picture.is_none()
            && self.post_content.is_none()
            && self.post_image.is_none()
            && self.likes_count.is_none()
            && self.comments_count.is_none()
            && self.shares_count.is_none()
    }

    /// Patch that sets the profile picture.
    #[must_use]
    pub fn profile_picture(src: String) -> Self {
        Self {
            profile_picture: Some(Some(src)),
            ..Self::default()
        }
    }

    /// Patch that sets the post image.
    #[must_use]
    pub fn post_image(src: String) -> Self {
        Self {
            post_image: Some(Some(src)),
            ..Self::default()
        }
    }

    /// Patch that removes the post image.
    #[must_use]
    pub fn clear_post_image() -> Self {
        Self {
            post_image: Some(None),
            ..Self::default()
        }
    }
}

/// Image slots of the record that accept uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageField {
    ProfilePicture,
    PostImage,
}

impl ImageField {
    /// Patch that sets this image to `src`.
    #[must_use]
    pub fn patch(self, src: String) -> PostPatch {
        match self {
            Self::ProfilePicture => PostPatch::profile_picture(src),
            Self::PostImage => PostPatch::post_image(src),
        }
    }
}

/// Text fields of the record, addressed by form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    FullName,
    Position,
    PostTime,
    PostContent,
}

impl TextField {
    /// Patch that sets this field to `value`.
    #[must_use]
    pub fn patch(self, value: String) -> PostPatch {
        let mut patch = PostPatch::default();
        match self {
            Self::FullName => patch.full_name = Some(value),
            Self::Position => patch.position = Some(value),
            Self::PostTime => patch.post_time = Some(value),
            Self::PostContent => patch.post_content = Some(value),
        }
        patch
    }

    /// Current value of this field in `record`.
    #[must_use]
    pub fn get(self, record: &PostRecord) -> &str {
        match self {
            Self::FullName => &record.full_name,
            Self::Position => &record.position,
            Self::PostTime => &record.post_time,
            Self::PostContent => &record.post_content,
        }
    }
}

/// Engagement counters, addressed by the numeric form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountField {
    Likes,
    Comments,
    Shares,
}

impl CountField {
    /// All counters in form order.
    pub const ALL: [Self; 3] = [Self::Likes, Self::Comments, Self::Shares];

    /// Input label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Likes => "Likes",
            Self::Comments => "Comments",
            Self::Shares => "Shares",
        }
    }

    /// Input element id.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Likes => "likesCount",
            Self::Comments => "commentsCount",
            Self::Shares => "sharesCount",
        }
    }

    /// Patch that sets this counter to `value`.
    #[must_use]
    pub fn patch(self, value: u64) -> PostPatch {
        let mut patch = PostPatch::default();
        match self {
            Self::Likes => patch.likes_count = Some(value),
            Self::Comments => patch.comments_count = Some(value),
            Self::Shares => patch.shares_count = Some(value),
        }
        patch
    }

    /// Current value of this counter in `record`.
    #[must_use]
    pub const fn get(self, record: &PostRecord) -> u64 {
        match self {
            Self::Likes => record.likes_count,
            Self::Comments => record.comments_count,
            Self::Shares => record.shares_count,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn demo_matches_startup_values() {
        let record = PostRecord::demo();
        assert_eq!(record.full_name, "John Doe");
        assert_eq!(record.likes_count, 142);
        assert_eq!(record.comments_count, 23);
        assert_eq!(record.shares_count, 7);
        assert!(record.position.is_empty());
        assert!(record.post_image.is_some());
    }

    #[test]
    fn apply_replaces_only_supplied_fields() {
        let mut record = PostRecord::demo();
        record.apply(PostPatch {
            full_name: Some("Ada".into()),
            shares_count: Some(0),
            ..PostPatch::default()
        });
        assert_eq!(record.full_name, "Ada");
        assert_eq!(record.shares_count, 0);
        assert_eq!(record.likes_count, 142);
        assert_eq!(record.post_content, DEMO_POST_CONTENT);
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut record = PostRecord::demo();
        let patch = PostPatch::default();
        assert!(patch.is_empty());
        record.apply(patch);
        assert_eq!(record, PostRecord::demo());
    }

    #[test]
    fn clear_post_image_removes_it() {
        let mut record = PostRecord::demo();
        record.apply(PostPatch::clear_post_image());
        assert_eq!(record.post_image, None);
        // The avatar is a separate field and stays.
        assert!(record.profile_picture.is_some());
    }

    #[test]
    fn field_patches_round_trip_through_get() {
        let mut record = PostRecord::default();
        record.apply(TextField::PostTime.patch("3d".into()));
        record.apply(CountField::Comments.patch(12));
        assert_eq!(TextField::PostTime.get(&record), "3d");
        assert_eq!(CountField::Comments.get(&record), 12);
    }

    #[test]
    fn record_serializes_with_snake_case_fields() {
        let json = serde_json::to_value(PostRecord::demo()).unwrap();
        assert_eq!(json["likes_count"], 142);
        assert_eq!(json["full_name"], "John Doe");
    }
}
