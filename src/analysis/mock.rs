//! Offline capability for demos and tests
//!
//! The score is derived from the payload digest, so the same media always gets
//! the same answer. The reply deliberately omits `verdict` so the gateway
//! assigns one through confidence banding.

use super::capability::{AnalysisCapability, CapabilityError};
use crate::types::{EncodedMedia, MediaCategory};
use async_trait::async_trait;
use sha2::{Digest, Sha256};

/// 5x5 placeholder heatmap
pub const PLACEHOLDER_HEATMAP: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAUAAAAFCAYAAACNbyblAAAAHElEQVQI12P4//8/w+r8jAwODQQ4AAABwBF6LJy9AAAAAElFTkSuQmCC";

#[derive(Debug, Default)]
pub struct MockCapability;

impl MockCapability {
    pub fn new() -> Self {
        Self
    }
}

/// Map the first eight digest bytes onto [0, 1]
pub fn mock_score(payload: &[u8]) -> f64 {
    let digest = Sha256::digest(payload);
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let value = u64::from_be_bytes(prefix) as f64 / u64::MAX as f64;
    (value * 100.0).round() / 100.0
}

fn mock_report(category: MediaCategory, score: f64) -> String {
    let subject = match category {
        MediaCategory::Image => "image",
        MediaCategory::Video => "video",
        MediaCategory::Audio => "audio track",
    };
    format!(
        "### Overview\n\
         This {} was scored offline by the mock analysis provider. The score of {:.2} is derived from the file contents and carries no forensic meaning.\n\
         ### Signals Checked\n\
         * Compression consistency\n\
         * Lighting and shadow coherence\n\
         * Temporal and spectral continuity\n",
        subject, score
    )
}

#[async_trait]
impl AnalysisCapability for MockCapability {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        media: &EncodedMedia,
        _instruction: &str,
    ) -> Result<String, CapabilityError> {
        let score = mock_score(media.payload());
        let category = media.category();

        let (frames, audio_anomalies) = if category.is_visual() {
            (
                serde_json::json!([
                    { "frameIndex": 0, "score": score, "heatmapRef": PLACEHOLDER_HEATMAP }
                ]),
                serde_json::json!([]),
            )
        } else {
            (
                serde_json::json!([]),
                serde_json::json!([
                    { "kind": "voice_clone", "description": "Synthetic voice likelihood", "score": score }
                ]),
            )
        };

        let reply = serde_json::json!({
            "confidenceScore": score,
            "report": mock_report(category, score),
            "evidenceFrames": frames,
            "documentAnomalies": [],
            "audioAnomalies": audio_anomalies,
        });

        Ok(reply.to_string())
    }
}
