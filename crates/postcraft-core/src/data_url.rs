//! Base64 data URLs for embedded images.
//!
//! Uploaded files are stored in the record as `data:<type>;base64,<payload>`
//! so the preview and the exported PNG never depend on the original file.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Errors from [`decode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataUrlError {
    /// The string does not start with `data:`.
    #[error("not a data URL")]
    NotDataUrl,

    /// The header is not terminated by a comma.
    #[error("data URL has no payload separator")]
    MissingComma,

    /// Only base64 payloads are produced and consumed here.
    #[error("data URL payload is not base64")]
    NotBase64,

    /// The payload contains invalid base64.
    #[error("invalid base64 payload: {0}")]
    Base64(String),
}

/// A decoded data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// Declared media type, e.g. `image/png`.
    pub media_type: String,
    /// Raw payload bytes.
    pub bytes: Vec<u8>,
}

/// Build a base64 data URL from raw bytes.
///
/// ```
/// let url = postcraft_core::data_url::encode("image/png", &[1, 2, 3]);
/// assert_eq!(url, "data:image/png;base64,AQID");
/// ```
#[must_use]
pub fn encode(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{media_type};base64,{}", STANDARD.encode(bytes))
}

/// Returns `true` if `src` is an inline `data:` URL.
#[must_use]
pub fn is_data_url(src: &str) -> bool {
    src.starts_with("data:")
}

/// Parse a base64 data URL.
///
/// # Errors
///
/// Returns a [`DataUrlError`] describing why `src` is not a base64
/// data URL.
pub fn decode(src: &str) -> Result<DataUrl, DataUrlError> {
    let rest = src.strip_prefix("data:").ok_or(DataUrlError::NotDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(DataUrlError::MissingComma)?;
    let media_type = header
        .strip_suffix(";base64")
        .ok_or(DataUrlError::NotBase64)?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| DataUrlError::Base64(e.to_string()))?;
    Ok(DataUrl {
        media_type: media_type.to_owned(),
        bytes,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decode_reverses_encode() {
        let url = encode("image/jpeg", b"\xff\xd8\xff");
        let parsed = decode(&url).unwrap();
        assert_eq!(parsed.media_type, "image/jpeg");
        assert_eq!(parsed.bytes, b"\xff\xd8\xff");
    }

    #[test]
    fn decode_rejects_remote_and_plain_payloads() {
        assert_eq!(
            decode("https://example.com/a.png"),
            Err(DataUrlError::NotDataUrl)
        );
        assert_eq!(decode("data:image/png"), Err(DataUrlError::MissingComma));
        assert_eq!(
            decode("data:text/plain,hello"),
            Err(DataUrlError::NotBase64)
        );
        assert!(matches!(
            decode("data:image/png;base64,@@@"),
            Err(DataUrlError::Base64(_))
        ));
    }

    #[test]
    fn detects_inline_sources() {
        assert!(is_data_url("data:image/png;base64,AA=="));
        assert!(!is_data_url("http://example.com/data:"));
    }
}
