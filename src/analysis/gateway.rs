//! The single choke point between intake and the external analysis capability

use super::capability::{build_capability, AnalysisCapability};
use super::prompt::build_instruction;
use super::reply::parse_reply;
use crate::config::AnalysisConfig;
use crate::errors::{AnalysisError, AnalysisResultOf};
use crate::types::{is_media_mime, AnalysisFailure, AnalysisOutcome, AnalysisRequest, AnalysisResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Turns one `AnalysisRequest` into exactly one discriminated outcome
#[derive(Clone)]
pub struct AnalysisGateway {
    capability: Arc<dyn AnalysisCapability>,
}

impl AnalysisGateway {
    pub fn new(capability: Arc<dyn AnalysisCapability>) -> Self {
        Self { capability }
    }

    pub fn from_config(config: &AnalysisConfig) -> AnalysisResultOf<Self> {
        Ok(Self::new(build_capability(config)?))
    }

    pub fn capability_name(&self) -> &str {
        self.capability.name()
    }

    /// Analyse one request. Never panics past this boundary; every failure is returned as data.
    pub async fn analyze(&self, request: AnalysisRequest) -> AnalysisOutcome {
        let started = Instant::now();
        let fingerprint = request.media.fingerprint();

        info!(
            "Analysing {} ({} bytes, id {}) with {}",
            request.media.mime_type(),
            request.media.len(),
            fingerprint,
            self.capability.name()
        );

        match self.run(request).await {
            Ok(result) => {
                info!(
                    "Analysis of {} complete: {} ({:.2}) in {:.2?}",
                    fingerprint,
                    result.verdict,
                    result.confidence_score,
                    started.elapsed()
                );
                Ok(result)
            }
            Err(err) => {
                match &err {
                    AnalysisError::InvalidInput(_) => warn!("Analysis rejected: {}", err),
                    _ => error!("Analysis of {} failed: {}", fingerprint, err),
                }
                Err(AnalysisFailure::from(err))
            }
        }
    }

    async fn run(&self, request: AnalysisRequest) -> AnalysisResultOf<AnalysisResult> {
        let media = request.media;
        if media.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "The media payload is empty.".to_string(),
            ));
        }
        if !is_media_mime(media.mime_type()) {
            return Err(AnalysisError::InvalidInput(format!(
                "Unsupported media type: {}",
                media.mime_type()
            )));
        }

        let instruction = build_instruction(&media);
        debug!("Instruction: {} chars", instruction.len());

        // The call runs on its own task so a provider panic surfaces as a JoinError
        let capability = Arc::clone(&self.capability);
        let handle = tokio::spawn(async move { capability.complete(&media, &instruction).await });

        let raw = match handle.await {
            Ok(reply) => reply?,
            Err(join_err) => {
                return Err(AnalysisError::AnalysisInternal(format!(
                    "analysis task aborted: {}",
                    join_err
                )))
            }
        };

        debug!("Capability reply: {} chars", raw.len());
        parse_reply(&raw)
    }
}
