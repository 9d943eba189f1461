//! Validation of raw form input.
//!
//! The editor form turns image input into a [`PostPatch`] only through
//! [`profile_picture_from_url`] and [`image_from_upload`].  A rejected
//! value yields an error and no patch, so it never reaches the record.

use crate::data_url;
use crate::types::{ImageField, PostPatch};

/// Errors reported next to the offending form field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The profile picture URL does not use an http(s) scheme.
    #[error("Please enter a valid URL starting with http:// or https://")]
    InvalidUrl,

    /// The uploaded file is not declared as an image.
    #[error("Please upload an image file")]
    NotAnImage {
        /// The media type the file declared (or that was inferred).
        media_type: String,
    },

    /// The file could not be read.
    #[error("Failed to read file: {0}")]
    Read(String),
}

/// Parse a counter field the way a browser's `parseInt` does.
///
/// Leading whitespace and an optional sign are skipped, then the longest
/// run of ASCII digits is taken; anything after it is ignored.  Input
/// with no leading digits yields `0`, negative input clamps to `0`, and
/// values past `u64::MAX` saturate.
///
/// ```
/// use postcraft_core::parse_count;
///
/// assert_eq!(parse_count("142"), 142);
/// assert_eq!(parse_count("12abc"), 12);
/// assert_eq!(parse_count(""), 0);
/// assert_eq!(parse_count("-4"), 0);
/// ```
#[must_use]
pub fn parse_count(input: &str) -> u64 {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: u64 = 0;
    let mut seen_digit = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(u64::from(b - b'0'));
    }

    if !seen_digit || negative { 0 } else { value }
}

/// Accept a profile picture URL only if it uses an http(s) scheme.
///
/// # Errors
///
/// Returns [`InputError::InvalidUrl`] for anything else, including the
/// empty string.
pub fn validate_image_url(input: &str) -> Result<String, InputError> {
    if input.starts_with("http://") || input.starts_with("https://") {
        Ok(input.to_owned())
    } else {
        Err(InputError::InvalidUrl)
    }
}

/// Accept an uploaded file only if its media type is `image/*`.
///
/// # Errors
///
/// Returns [`InputError::NotAnImage`] when the type does not start with
/// `image/`.
pub fn validate_image_media_type(media_type: &str) -> Result<(), InputError> {
    if media_type.starts_with("image/") {
        Ok(())
    } else {
        Err(InputError::NotAnImage {
            media_type: media_type.to_owned(),
        })
    }
}

/// Patch for a profile picture URL typed into the form.
///
/// # Errors
///
/// Returns [`InputError::InvalidUrl`] unless the input is an http(s) URL.
pub fn profile_picture_from_url(input: &str) -> Result<PostPatch, InputError> {
    validate_image_url(input).map(PostPatch::profile_picture)
}

/// Patch for an uploaded file: `bytes` become a data URL stored in
/// `field`.
///
/// # Errors
///
/// Returns [`InputError::NotAnImage`] unless `media_type` is `image/*`.
pub fn image_from_upload(
    field: ImageField,
    media_type: &str,
    bytes: &[u8],
) -> Result<PostPatch, InputError> {
    validate_image_media_type(media_type)?;
    Ok(field.patch(data_url::encode(media_type, bytes)))
}

/// Infer a media type from a filename extension.
///
/// Used when the browser does not declare a type for a selected file.
/// Unknown extensions map to `application/octet-stream`.
#[must_use]
pub fn media_type_from_name(name: &str) -> &'static str {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return "application/octet-stream";
    };
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PostRecord;

    #[test]
    fn rejected_url_builds_no_patch() {
        let mut record = PostRecord::demo();
        let before = record.clone();
        let result = profile_picture_from_url("javascript:alert(1)");
        assert_eq!(result, Err(InputError::InvalidUrl));
        if let Ok(patch) = result {
            record.apply(patch);
        }
        assert_eq!(record, before);
    }

    #[test]
    fn accepted_url_patches_only_the_profile_picture() {
        let patch = profile_picture_from_url("https://example.com/me.png");
        assert_eq!(
            patch,
            Ok(PostPatch::profile_picture("https://example.com/me.png".to_owned()))
        );
    }

    #[test]
    fn upload_is_checked_before_encoding() {
        let err = image_from_upload(ImageField::PostImage, "text/plain", b"hello");
        assert!(matches!(err, Err(InputError::NotAnImage { .. })));

        let mut record = PostRecord::demo();
        let patch = image_from_upload(ImageField::PostImage, "image/png", &[1, 2, 3]);
        record.apply(patch.unwrap_or_default());
        assert_eq!(record.post_image.as_deref(), Some("data:image/png;base64,AQID"));
        assert_eq!(record.profile_picture, PostRecord::demo().profile_picture);
    }

    #[test]
    fn parse_count_defaults_to_zero_on_garbage() {
        for input in ["", "abc", "   ", "-", "+", "k12", "٣"] {
            assert_eq!(parse_count(input), 0, "input {input:?}");
        }
    }

    #[test]
    fn parse_count_takes_leading_integer() {
        assert_eq!(parse_count("  7"), 7);
        assert_eq!(parse_count("+15"), 15);
        assert_eq!(parse_count("3.9"), 3);
        assert_eq!(parse_count("1e3"), 1);
        assert_eq!(parse_count("0042"), 42);
    }

    #[test]
    fn parse_count_clamps_negative_and_saturates() {
        assert_eq!(parse_count("-250"), 0);
        assert_eq!(parse_count("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn url_requires_http_scheme() {
        assert!(validate_image_url("https://example.com/a.png").is_ok());
        assert!(validate_image_url("http://example.com/a.png").is_ok());
        let bad_urls = [
            "",
            "ftp://x/a.png",
            "example.com/a.png",
            "httpx://a",
            "data:image/png;base64,AA",
        ];
        for bad in bad_urls {
            assert_eq!(validate_image_url(bad), Err(InputError::InvalidUrl), "{bad:?}");
        }
    }

    #[test]
    fn media_type_must_be_image() {
        assert!(validate_image_media_type("image/png").is_ok());
        assert!(validate_image_media_type("image/svg+xml").is_ok());
        let err = validate_image_media_type("text/plain");
        assert!(matches!(
            err,
            Err(InputError::NotAnImage { ref media_type }) if media_type == "text/plain"
        ));
        assert!(validate_image_media_type("").is_err());
    }

    #[test]
    fn error_messages_match_form_copy() {
        assert_eq!(
            InputError::InvalidUrl.to_string(),
            "Please enter a valid URL starting with http:// or https://"
        );
        assert_eq!(
            InputError::NotAnImage {
                media_type: "text/plain".into()
            }
            .to_string(),
            "Please upload an image file"
        );
    }

    #[test]
    fn media_type_inferred_from_extension() {
        assert_eq!(media_type_from_name("me.JPG"), "image/jpeg");
        assert_eq!(media_type_from_name("notes.txt"), "text/plain");
        assert_eq!(media_type_from_name("README"), "application/octet-stream");
    }
}
