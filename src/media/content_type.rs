//! Content-type resolution for remote media
//!
//! Resolution order:
//! 1. the server-reported `Content-Type`, accepted only for `image/*`, `video/*`, `audio/*`
//! 2. otherwise the extension table, keyed on the lower-cased URL path suffix
//!    (query string and fragment ignored)
//! 3. otherwise `UnsupportedMediaType`

use crate::errors::{AnalysisError, AnalysisResultOf};
use crate::types::{is_media_mime, normalise_mime};
use tracing::debug;

/// Static extension -> MIME table
pub const EXTENSION_MIME_TABLE: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("mkv", "video/x-matroska"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
];

/// Look up a MIME type by file extension (case-insensitive, without the dot)
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    let extension = extension.to_ascii_lowercase();
    EXTENSION_MIME_TABLE
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// Extension of the last path segment of a file name or path ("clip.MP4" -> "mp4")
pub fn extension_of(name: &str) -> Option<String> {
    let last_segment = name.rsplit(['/', '\\']).next()?;
    let (stem, extension) = last_segment.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}

/// Infer a MIME type from the path of a URL, ignoring query string and fragment
pub fn mime_from_url(url: &str) -> Option<&'static str> {
    let path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    extension_of(&path).and_then(|ext| mime_for_extension(&ext))
}

/// Resolve the media MIME type of a fetched URL from its header and path
pub fn resolve_content_type(url: &str, header: Option<&str>) -> AnalysisResultOf<String> {
    let header = header.map(normalise_mime).filter(|h| !h.is_empty());

    if let Some(ref content_type) = header {
        if is_media_mime(content_type) {
            return Ok(content_type.clone());
        }
    }

    if let Some(inferred) = mime_from_url(url) {
        debug!(
            "Content-Type {:?} unusable for {}, inferred {} from extension",
            header, url, inferred
        );
        return Ok(inferred.to_string());
    }

    Err(AnalysisError::UnsupportedMediaType(
        header.unwrap_or_else(|| "none".to_string()),
    ))
}
