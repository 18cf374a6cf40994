//! Media encoder: user files and fetched URLs -> `EncodedMedia`

use crate::errors::{AnalysisError, AnalysisResultOf};
use crate::media::content_type::{extension_of, mime_for_extension, resolve_content_type};
use crate::media::sniff::sniff_media_mime;
use crate::types::{is_media_mime, EncodedMedia};
use tracing::debug;

/// A file supplied directly by the user
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: Option<String>,
    /// MIME type reported by the uploader, if any
    pub declared_mime: Option<String>,
    pub bytes: Vec<u8>,
}

/// Bytes downloaded from a remote URL together with the reported content type
#[derive(Debug, Clone)]
pub struct FetchedMedia {
    pub url: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Where the bytes to encode came from
#[derive(Debug, Clone)]
pub enum MediaSource {
    File(FileUpload),
    Remote(FetchedMedia),
}

/// True for `http://` and `https://` URLs
pub fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Encode a media source into its MIME-tagged form
pub fn encode(source: MediaSource) -> AnalysisResultOf<EncodedMedia> {
    match source {
        MediaSource::File(upload) => encode_file(upload),
        MediaSource::Remote(fetched) => encode_remote(fetched),
    }
}

fn encode_file(upload: FileUpload) -> AnalysisResultOf<EncodedMedia> {
    if upload.bytes.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "The selected file is empty.".to_string(),
        ));
    }

    let declared = upload
        .declared_mime
        .as_deref()
        .filter(|mime| is_media_mime(mime))
        .map(str::to_string);

    let mime_type = declared
        .or_else(|| {
            upload
                .name
                .as_deref()
                .and_then(extension_of)
                .and_then(|ext| mime_for_extension(&ext))
                .map(str::to_string)
        })
        .or_else(|| sniff_media_mime(&upload.bytes).map(str::to_string))
        .ok_or_else(|| {
            AnalysisError::UnsupportedMediaType(
                upload
                    .declared_mime
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            )
        })?;

    debug!(
        "Encoding file {:?} ({} bytes) as {}",
        upload.name,
        upload.bytes.len(),
        mime_type
    );
    EncodedMedia::new(&mime_type, upload.bytes)
}

fn encode_remote(fetched: FetchedMedia) -> AnalysisResultOf<EncodedMedia> {
    if !is_http_url(&fetched.url) {
        return Err(AnalysisError::InvalidInput("Invalid URL format.".to_string()));
    }
    if fetched.bytes.is_empty() {
        return Err(AnalysisError::InvalidInput(format!(
            "The URL returned an empty body: {}",
            fetched.url
        )));
    }

    let mime_type = resolve_content_type(&fetched.url, fetched.content_type.as_deref())?;
    debug!(
        "Encoding {} ({} bytes) as {}",
        fetched.url,
        fetched.bytes.len(),
        mime_type
    );
    EncodedMedia::new(&mime_type, fetched.bytes)
}
