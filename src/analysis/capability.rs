//! The seam between the gateway and the external analysis service

use crate::config::{AnalysisConfig, AnalysisProvider};
use crate::errors::{AnalysisError, AnalysisResultOf};
use crate::types::EncodedMedia;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// An external service that answers a structured instruction about one media object
#[async_trait]
pub trait AnalysisCapability: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Issue exactly one call and return the raw reply text
    async fn complete(
        &self,
        media: &EncodedMedia,
        instruction: &str,
    ) -> Result<String, CapabilityError>;
}

/// Failures raised by capability providers before the reply is interpreted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapabilityError {
    /// Network failure or timeout
    #[error("{0}")]
    Transport(String),

    /// Provider answered with a non-success status
    #[error("provider responded with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Provider envelope could not be read or contained no text
    #[error("{0}")]
    Malformed(String),

    /// Provider cannot handle this media; no call was made
    #[error("{0}")]
    Unsupported(String),
}

impl From<CapabilityError> for AnalysisError {
    fn from(err: CapabilityError) -> Self {
        match err {
            CapabilityError::Transport(message) => AnalysisError::UpstreamUnreachable(format!(
                "The analysis service could not be reached: {}",
                message
            )),
            CapabilityError::Rejected { status, body } => AnalysisError::AnalysisInternal(
                format!("provider responded with HTTP {}: {}", status, body),
            ),
            CapabilityError::Malformed(message) => AnalysisError::UpstreamMalformed(message),
            CapabilityError::Unsupported(message) => AnalysisError::InvalidInput(message),
        }
    }
}

/// Map a reqwest failure to a transport error with a readable message
pub(crate) fn transport_error(provider: &str, err: reqwest::Error) -> CapabilityError {
    if err.is_timeout() {
        CapabilityError::Transport(format!("request to {} timed out", provider))
    } else {
        CapabilityError::Transport(format!("request to {} failed: {}", provider, err))
    }
}

/// Read a non-success response into a `Rejected` error, keeping the body short
pub(crate) async fn rejected(response: reqwest::Response) -> CapabilityError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    CapabilityError::Rejected {
        status,
        body: body.chars().take(200).collect(),
    }
}

pub(crate) fn http_client(config: &AnalysisConfig) -> AnalysisResultOf<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
        .map_err(|e| AnalysisError::AnalysisInternal(format!("Failed to build HTTP client: {}", e)))
}

/// Build the configured capability provider
pub fn build_capability(config: &AnalysisConfig) -> AnalysisResultOf<Arc<dyn AnalysisCapability>> {
    if config.provider != AnalysisProvider::Mock && config.api_key.is_empty() {
        warn!(
            "No API key configured for the {:?} analysis provider - set FAKECHECK__ANALYSIS__API_KEY \
             or the provider's conventional key variable",
            config.provider
        );
    }

    let capability: Arc<dyn AnalysisCapability> = match config.provider {
        AnalysisProvider::Gemini => Arc::new(super::gemini::GeminiCapability::new(config)?),
        AnalysisProvider::OpenAi => Arc::new(super::openai::OpenAiCapability::new(config)?),
        AnalysisProvider::Mock => Arc::new(super::mock::MockCapability::new()),
    };

    info!(
        "Analysis capability initialised: {} (model {})",
        capability.name(),
        config.model
    );
    Ok(capability)
}
