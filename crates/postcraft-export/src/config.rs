use serde::{Deserialize, Serialize};

use crate::capture::CaptureMode;

/// Tunables for the image exporter.
///
/// All fields have defaults matching the live page, so a partially
/// specified JSON object deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Device pixels per CSS pixel in the exported image.
    pub scale: f32,

    /// Time given to images of an isolated capture to finish loading
    /// before rasterization, in milliseconds.
    pub settle_delay_ms: u32,

    /// Longest wait for one image to decode, in milliseconds.  An image
    /// still pending after this is captured as its fallback.
    pub image_timeout_ms: u32,

    /// Width of the container the card is captured in, in CSS pixels.
    /// The card's own `max-w-lg` still caps it at 512.
    pub capture_width: f32,

    /// Width of the page used to decide responsive (`sm:`, `md:`)
    /// variants.
    pub viewport_width: f32,

    /// Stem of isolated-capture filenames; a timestamp is appended.
    pub filename_prefix: String,

    /// Fixed filename of direct captures.
    pub direct_filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            settle_delay_ms: 500,
            image_timeout_ms: 10_000,
            capture_width: 550.0,
            viewport_width: 1280.0,
            filename_prefix: "linkedin-post".to_owned(),
            direct_filename: "linkedin-post.png".to_owned(),
        }
    }
}

impl ExportConfig {
    /// Download filename for a capture taken at `unix_millis`.
    #[must_use]
    pub fn download_filename(&self, mode: CaptureMode, unix_millis: u64) -> String {
        match mode {
            CaptureMode::Isolated => format!("{}-{unix_millis}.png", self.filename_prefix),
            CaptureMode::Direct => self.direct_filename.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn filenames_depend_on_mode() {
        let config = ExportConfig::default();
        assert_eq!(
            config.download_filename(CaptureMode::Isolated, 1_700_000_000_123),
            "linkedin-post-1700000000123.png"
        );
        assert_eq!(config.download_filename(CaptureMode::Direct, 42), "linkedin-post.png");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: ExportConfig = serde_json::from_str(r#"{"scale": 3.0}"#).unwrap();
        assert_eq!(config.scale, 3.0);
        assert_eq!(config.settle_delay_ms, 500);
        assert_eq!(config.image_timeout_ms, 10_000);
        assert_eq!(config.direct_filename, "linkedin-post.png");
    }

    #[test]
    fn serde_round_trip() {
        let config = ExportConfig {
            settle_delay_ms: 0,
            ..ExportConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ExportConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
