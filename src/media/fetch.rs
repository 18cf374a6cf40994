//! Remote media download with timeout and byte ceiling

use crate::config::FetchConfig;
use crate::errors::{AnalysisError, AnalysisResultOf};
use crate::media::encoder::{encode, is_http_url, FetchedMedia, MediaSource};
use crate::types::EncodedMedia;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, info, warn};

const NO_RESPONSE_MESSAGE: &str =
    "Failed to fetch from URL. The request was made but no response was received.";

/// Downloads remote media, enforcing the configured byte ceiling
#[derive(Debug, Clone)]
pub struct MediaFetcher {
    client: reqwest::Client,
    max_bytes: u64,
}

impl MediaFetcher {
    pub fn new(config: &FetchConfig) -> AnalysisResultOf<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AnalysisError::AnalysisInternal(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            max_bytes: config.max_bytes,
        })
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// GET the URL and collect its body, aborting once the ceiling is crossed
    pub async fn fetch(&self, url: &str) -> AnalysisResultOf<FetchedMedia> {
        if !is_http_url(url) {
            return Err(AnalysisError::InvalidInput("Invalid URL format.".to_string()));
        }

        info!("Fetching media from {}", url);
        let mut response = self.client.get(url).send().await.map_err(|e| {
            warn!("Fetch of {} failed: {}", url, e);
            AnalysisError::UpstreamUnreachable(NO_RESPONSE_MESSAGE.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Fetch of {} returned HTTP {}", url, status);
            return Err(AnalysisError::UpstreamUnreachable(format!(
                "Failed to fetch from URL. Server responded with status: {}",
                status.as_u16()
            )));
        }

        if let Some(declared) = response.content_length() {
            if declared > self.max_bytes {
                warn!(
                    "Refusing {}: Content-Length {} exceeds limit {}",
                    url, declared, self.max_bytes
                );
                return Err(AnalysisError::PayloadTooLarge {
                    limit: self.max_bytes,
                    actual: declared,
                });
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            warn!("Reading body of {} failed: {}", url, e);
            AnalysisError::UpstreamUnreachable(NO_RESPONSE_MESSAGE.to_string())
        })? {
            let received = (bytes.len() + chunk.len()) as u64;
            if received > self.max_bytes {
                warn!(
                    "Aborting {}: body exceeded limit {} bytes",
                    url, self.max_bytes
                );
                return Err(AnalysisError::PayloadTooLarge {
                    limit: self.max_bytes,
                    actual: received,
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        debug!(
            "Fetched {} bytes from {} (Content-Type: {:?})",
            bytes.len(),
            url,
            content_type
        );

        Ok(FetchedMedia {
            url: url.to_string(),
            bytes,
            content_type,
        })
    }

    /// Fetch, resolve the content type and encode in one step
    pub async fn fetch_encoded(&self, url: &str) -> AnalysisResultOf<EncodedMedia> {
        let fetched = self.fetch(url).await?;
        encode(MediaSource::Remote(fetched))
    }
}
