//! PNG encoding of captured pixels.

use image::ImageEncoder;
use postcraft_core::data_url;

/// Errors that can occur while encoding a capture.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The pixel buffer does not match the stated dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// The capture has no pixels.
    #[error("cannot encode an empty {width}x{height} image")]
    Empty { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Png(String),
}

impl From<image::ImageError> for EncodeError {
    fn from(err: image::ImageError) -> Self {
        Self::Png(err.to_string())
    }
}

/// Composite straight-alpha RGBA pixels over white, dropping alpha.
#[must_use]
pub fn flatten_onto_white(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let alpha = u16::from(px[3]);
        for &c in &px[..3] {
            let blended = (u16::from(c) * alpha + 255 * (255 - alpha) + 127) / 255;
            #[expect(clippy::cast_possible_truncation)]
            rgb.push(blended as u8);
        }
    }
    rgb
}

/// Encode `width`×`height` RGBA pixels as an opaque RGB PNG.
///
/// # Errors
///
/// Returns [`EncodeError::SizeMismatch`] if `rgba` is not exactly
/// `width * height * 4` bytes, [`EncodeError::Empty`] for a zero-sized
/// image, and [`EncodeError::Png`] if the encoder fails.
pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::Empty { width, height });
    }
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(EncodeError::SizeMismatch {
            width,
            height,
            expected,
            actual: rgba.len(),
        });
    }

    let rgb = flatten_onto_white(rgba);
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder.write_image(&rgb, width, height, image::ExtendedColorType::Rgb8)?;
    Ok(png_bytes)
}

/// `data:image/png;base64,...` URL for encoded PNG bytes.
#[must_use]
pub fn png_data_url(png: &[u8]) -> String {
    data_url::encode("image/png", png)
}
