//! Reading uploaded image files into data URLs.

use dioxus::html::FileData;
use postcraft_core::{
    ImageField, InputError, PostPatch, image_from_upload, media_type_from_name,
    validate_image_media_type,
};

/// The media type a file claims, falling back to its extension when the
/// browser declares none.
fn declared_media_type(file: &FileData) -> String {
    file.content_type()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| media_type_from_name(&file.name()).to_owned())
}

/// Read `file` into a patch that stores it, as a data URL, in `field`.
///
/// The media type is checked before anything is read, so a non-image
/// file costs nothing.
///
/// # Errors
///
/// Returns [`InputError::NotAnImage`] when the file is not declared as an
/// image and [`InputError::Read`] when the browser fails to read it.
pub async fn read_image_upload(
    file: &FileData,
    field: ImageField,
) -> Result<PostPatch, InputError> {
    let media_type = declared_media_type(file);
    validate_image_media_type(&media_type)?;
    let bytes = file
        .read_bytes()
        .await
        .map_err(|e| InputError::Read(e.to_string()))?;
    image_from_upload(field, &media_type, &bytes)
}
