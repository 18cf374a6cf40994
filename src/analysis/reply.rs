//! Interpretation of the capability's free-text reply
//!
//! Models wrap JSON in code fences or surrounding prose and drift between field
//! spellings, so parsing accepts the aliases observed in practice. The result is
//! either a complete `AnalysisResult` or `UpstreamMalformed`.

use crate::errors::{AnalysisError, AnalysisResultOf};
use crate::types::{band, Anomaly, AnalysisResult, EvidenceFrame, Verdict};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

lazy_static! {
    static ref FENCED_JSON: Regex =
        Regex::new(r"(?s)```(?:json|JSON)?\s*(\{.*\})\s*```").expect("valid fenced JSON pattern");
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplyPayload {
    #[serde(alias = "confidence", alias = "confidence_score")]
    confidence_score: Option<f64>,
    verdict: Option<String>,
    report: Option<String>,
    #[serde(alias = "evidence_frames")]
    evidence_frames: Option<Vec<ReplyFrame>>,
    #[serde(alias = "document_anomalies")]
    document_anomalies: Option<Vec<ReplyAnomaly>>,
    #[serde(alias = "audio_anomalies")]
    audio_anomalies: Option<Vec<ReplyAnomaly>>,
    #[serde(alias = "report_artifact_ref", alias = "reportPdf", alias = "report_url")]
    report_artifact_ref: Option<String>,
    /// Single-image heatmap replies
    #[serde(alias = "heatmap_data_uri")]
    heatmap_data_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplyFrame {
    #[serde(alias = "frame_index", alias = "frame", default)]
    frame_index: u32,
    #[serde(default)]
    score: f64,
    #[serde(alias = "heatmap", alias = "heatmap_ref", alias = "heatmap_url")]
    heatmap_ref: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReplyAnomaly {
    #[serde(alias = "type", alias = "name")]
    kind: Option<String>,
    #[serde(alias = "detail", alias = "details")]
    description: Option<String>,
    score: Option<f64>,
}

impl From<ReplyFrame> for EvidenceFrame {
    fn from(frame: ReplyFrame) -> Self {
        EvidenceFrame {
            frame_index: frame.frame_index,
            score: frame.score,
            heatmap_ref: frame.heatmap_ref.filter(|r| !r.is_empty()),
        }
    }
}

impl From<ReplyAnomaly> for Anomaly {
    fn from(anomaly: ReplyAnomaly) -> Self {
        Anomaly {
            kind: anomaly.kind.unwrap_or_else(|| "unspecified".to_string()),
            description: anomaly.description.unwrap_or_default(),
            score: anomaly.score,
        }
    }
}

/// Locate the JSON object inside a reply: fenced block first, then outermost braces
fn extract_json(raw: &str) -> Option<&str> {
    if let Some(captures) = FENCED_JSON.captures(raw) {
        if let Some(body) = captures.get(1) {
            return Some(body.as_str());
        }
    }

    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

/// Parse a raw capability reply into a normalised result
pub fn parse_reply(raw: &str) -> AnalysisResultOf<AnalysisResult> {
    let json = extract_json(raw).ok_or_else(|| {
        AnalysisError::UpstreamMalformed("reply did not contain a JSON object".to_string())
    })?;

    let payload: ReplyPayload = serde_json::from_str(json)
        .map_err(|e| AnalysisError::UpstreamMalformed(format!("reply JSON is invalid: {}", e)))?;

    let confidence_score = payload.confidence_score.ok_or_else(|| {
        AnalysisError::UpstreamMalformed("reply is missing a confidence score".to_string())
    })?;
    if !confidence_score.is_finite() || !(0.0..=1.0).contains(&confidence_score) {
        return Err(AnalysisError::UpstreamMalformed(format!(
            "confidence score {} is outside [0, 1]",
            confidence_score
        )));
    }

    let verdict = match payload.verdict.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => label
            .parse::<Verdict>()
            .map_err(|e| AnalysisError::UpstreamMalformed(e.to_string()))?,
        _ => {
            let banded = band(confidence_score);
            debug!(
                "Reply carried no verdict, banded {:.2} to {}",
                confidence_score, banded
            );
            banded
        }
    };

    let mut evidence_frames: Vec<EvidenceFrame> = payload
        .evidence_frames
        .unwrap_or_default()
        .into_iter()
        .map(EvidenceFrame::from)
        .collect();

    if evidence_frames.is_empty() {
        if let Some(heatmap) = payload.heatmap_data_uri.filter(|h| !h.is_empty()) {
            evidence_frames.push(EvidenceFrame {
                frame_index: 0,
                score: confidence_score,
                heatmap_ref: Some(heatmap),
            });
        }
    }

    Ok(AnalysisResult {
        verdict,
        confidence_score,
        report: payload.report.unwrap_or_default(),
        evidence_frames,
        document_anomalies: payload
            .document_anomalies
            .unwrap_or_default()
            .into_iter()
            .map(Anomaly::from)
            .collect(),
        audio_anomalies: payload
            .audio_anomalies
            .unwrap_or_default()
            .into_iter()
            .map(Anomaly::from)
            .collect(),
        report_artifact_ref: payload.report_artifact_ref.filter(|r| !r.is_empty()),
    })
}
