//! HTTP client for the analyze-url endpoint

use crate::config::RelayConfig;
use crate::errors::{AppError, AppResult};
use crate::types::AnalysisResult;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT_SECONDS: u64 = 120;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RelayClient {
    pub fn new(config: &RelayConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()?;
        let api_key = Some(config.api_key.trim().to_string()).filter(|k| !k.is_empty());

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the API to analyse a media URL
    pub async fn analyze_url(&self, media_url: &str) -> AppResult<AnalysisResult> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Relay("No FakeCheck API key configured.".to_string()))?;

        debug!("POST {} for {}", self.endpoint, media_url);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&serde_json::json!({ "url": media_url }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "Unknown API error".to_string());
            return Err(AppError::Relay(format!(
                "API request failed: {} - {}",
                status.canonical_reason().unwrap_or(status.as_str()),
                error
            )));
        }

        let result: AnalysisResult = response.json().await.map_err(|e| {
            AppError::Relay(format!("API returned an unreadable analysis result: {}", e))
        })?;
        Ok(result)
    }
}
