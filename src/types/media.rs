//! Encoded media: a MIME-tagged payload and its `data:` URI wire form

use crate::errors::{AnalysisError, AnalysisResultOf};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use std::fmt;

/// Bytes of payload hashed by [`EncodedMedia::fingerprint`]
pub const FINGERPRINT_PREFIX_LEN: usize = 64 * 1024;

/// Broad media category derived from the MIME top-level type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCategory {
    Image,
    Video,
    Audio,
}

impl MediaCategory {
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        let top_level = mime_type.split('/').next()?;
        match top_level {
            "image" => Some(MediaCategory::Image),
            "video" => Some(MediaCategory::Video),
            "audio" => Some(MediaCategory::Audio),
            _ => None,
        }
    }

    /// Image and video media can be snapshotted; audio cannot
    pub fn is_visual(&self) -> bool {
        !matches!(self, MediaCategory::Audio)
    }
}

/// Strip MIME parameters and normalise case ("Image/PNG; charset=x" -> "image/png")
pub fn normalise_mime(raw: &str) -> String {
    raw.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// True for `image/*`, `video/*` and `audio/*` with a non-empty subtype
pub fn is_media_mime(mime_type: &str) -> bool {
    let normalised = normalise_mime(mime_type);
    match normalised.split_once('/') {
        Some((_, subtype)) if !subtype.is_empty() => {
            MediaCategory::from_mime(&normalised).is_some()
        }
        _ => false,
    }
}

/// A MIME-type-tagged byte payload, the unit of transmission between intake and analysis
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedMedia {
    mime_type: String,
    payload: Vec<u8>,
}

impl EncodedMedia {
    /// Build from a MIME type and payload; the MIME type must be image/video/audio
    pub fn new(mime_type: &str, payload: Vec<u8>) -> AnalysisResultOf<Self> {
        let mime_type = normalise_mime(mime_type);
        if !is_media_mime(&mime_type) {
            return Err(AnalysisError::UnsupportedMediaType(mime_type));
        }
        Ok(Self { mime_type, payload })
    }

    /// Decode a `data:<mime>;base64,<payload>` string
    pub fn from_data_uri(uri: &str) -> AnalysisResultOf<Self> {
        let invalid = || AnalysisError::InvalidInput("Invalid media data URI provided.".to_string());

        let rest = uri.trim().strip_prefix("data:").ok_or_else(invalid)?;
        let (header, data) = rest.split_once(',').ok_or_else(invalid)?;
        let mime_type = header.strip_suffix(";base64").ok_or_else(invalid)?;

        let payload = STANDARD.decode(data.trim()).map_err(|e| {
            AnalysisError::InvalidInput(format!("Invalid base64 payload in data URI: {}", e))
        })?;

        Self::new(mime_type, payload)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn category(&self) -> MediaCategory {
        // Construction guarantees a media MIME type
        MediaCategory::from_mime(&self.mime_type).unwrap_or(MediaCategory::Image)
    }

    pub fn base64_payload(&self) -> String {
        STANDARD.encode(&self.payload)
    }

    /// Canonical wire form: `data:<mime>;base64,<payload>`
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_payload())
    }

    /// Short hex id for log correlation
    ///
    /// SHA-256 over the payload length and at most the first
    /// [`FINGERPRINT_PREFIX_LEN`] bytes, so the cost is bounded for large media.
    pub fn fingerprint(&self) -> String {
        let prefix = &self.payload[..self.payload.len().min(FINGERPRINT_PREFIX_LEN)];
        let mut hasher = Sha256::new();
        hasher.update((self.payload.len() as u64).to_le_bytes());
        hasher.update(prefix);
        let mut id = hex::encode(hasher.finalize());
        id.truncate(12);
        id
    }
}

impl fmt::Debug for EncodedMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedMedia")
            .field("mime_type", &self.mime_type)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}
