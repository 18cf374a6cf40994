//! Background delivery of outcomes to caller-supplied callback URLs

use crate::errors::{AppError, AppResult};
use serde_json::Value;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(timeout_seconds: u64) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self { client })
    }

    /// POST the payload once; non-2xx is an error
    pub async fn notify(&self, url: &str, payload: &Value) -> AppResult<()> {
        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Server(format!(
                "callback {} responded with HTTP {}",
                url,
                status.as_u16()
            )));
        }
        info!("Delivered analysis outcome to {}", url);
        Ok(())
    }

    /// Deliver in the background; failures are logged only
    pub fn dispatch(&self, url: String, payload: Value) -> JoinHandle<()> {
        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&url, &payload).await {
                warn!("Callback delivery to {} failed: {}", url, e);
            }
        })
    }
}
