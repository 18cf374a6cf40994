//! Media intake
//!
//! - **content_type** - header/extension MIME resolution for remote media
//! - **encoder** - files and fetched bytes -> `EncodedMedia`
//! - **fetch** - HTTP download with timeout and byte ceiling
//! - **sniff** - magic-byte fallback for uploaded files

pub mod content_type;
pub mod encoder;
pub mod fetch;
pub mod sniff;

pub use content_type::{mime_for_extension, mime_from_url, resolve_content_type};
pub use encoder::{encode, is_http_url, FetchedMedia, FileUpload, MediaSource};
pub use fetch::MediaFetcher;

use crate::errors::AppResult;
use std::path::Path;

/// Read a local file into a [`FileUpload`] named after its file name
pub async fn read_upload(path: &Path) -> AppResult<FileUpload> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string());

    Ok(FileUpload {
        name,
        declared_mime: None,
        bytes,
    })
}
