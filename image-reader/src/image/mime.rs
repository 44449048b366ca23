//! MIME type selection for data URLs.

use std::path::Path;

use base64::{Engine, prelude::BASE64_STANDARD};

/// MIME type used whenever nothing better is known.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Recognized file extensions (lowercase, without the dot).
const EXTENSION_MIME: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

/// Guess the MIME type of an image file from its extension.
///
/// Unknown or missing extensions map to [`DEFAULT_IMAGE_MIME`].
#[must_use]
pub fn mime_from_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| {
            EXTENSION_MIME
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        })
        .map_or(DEFAULT_IMAGE_MIME, |&(_, mime)| mime)
}

/// Pick the MIME type from a `Content-Type` header value.
///
/// Parameters after `;` are dropped. Anything that is not `image/*` maps to
/// [`DEFAULT_IMAGE_MIME`].
#[must_use]
pub fn mime_from_content_type(content_type: Option<&str>) -> &str {
    content_type
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .filter(|essence| essence.starts_with("image/"))
        .unwrap_or(DEFAULT_IMAGE_MIME)
}

/// Encode bytes as a `data:<mime>;base64,<payload>` URL.
#[must_use]
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64_STANDARD.encode(bytes))
}
