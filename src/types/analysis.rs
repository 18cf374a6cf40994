//! Analysis request, result and failure types

use crate::errors::{AnalysisError, FailureKind};
use crate::types::media::EncodedMedia;
use crate::types::verdict::Verdict;
use serde::{Deserialize, Serialize};

/// One unit of work for the analysis gateway
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub media: EncodedMedia,
    /// Webhook notified with the outcome, if any
    pub callback_url: Option<String>,
    /// Free-form caller reference echoed back in API responses
    pub reference: Option<String>,
}

impl AnalysisRequest {
    pub fn new(media: EncodedMedia) -> Self {
        Self {
            media,
            callback_url: None,
            reference: None,
        }
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// A frame (or still image) the capability flagged as evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceFrame {
    pub frame_index: u32,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap_ref: Option<String>,
}

/// A document- or audio-level irregularity reported by the capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Normalised outcome of a successful analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub verdict: Verdict,
    pub confidence_score: f64,
    #[serde(default)]
    pub report: String,
    #[serde(default)]
    pub evidence_frames: Vec<EvidenceFrame>,
    #[serde(default)]
    pub document_anomalies: Vec<Anomaly>,
    #[serde(default)]
    pub audio_anomalies: Vec<Anomaly>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_artifact_ref: Option<String>,
}

/// Failure outcome; never carries result fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<AnalysisError> for AnalysisFailure {
    fn from(err: AnalysisError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for AnalysisFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Discriminated outcome of one analysis request
pub type AnalysisOutcome = Result<AnalysisResult, AnalysisFailure>;
