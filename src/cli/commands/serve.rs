use super::{apply_analysis_overrides, load_config};
use crate::api::{serve, AppState};
use crate::errors::AppResult;
use crate::report::ReportFormatter;
use clap::Args;
use std::path::Path;
use tracing::info;

/// Run the HTTP API (analyze-url, verify)
#[derive(Args)]
pub struct ServeCommand {
    /// Address to bind, e.g. 127.0.0.1:9002 (overrides config)
    #[arg(long)]
    bind: Option<String>,

    /// Analysis provider: gemini, openai, mock (overrides config)
    #[arg(long)]
    provider: Option<String>,

    /// Model name (overrides config)
    #[arg(long)]
    model: Option<String>,

    /// Maximum bytes to download per URL (overrides config)
    #[arg(long)]
    max_bytes: Option<u64>,
}

impl ServeCommand {
    pub async fn run(&self, config_path: Option<&Path>) -> AppResult<()> {
        info!("=== FakeCheck API ===");

        let mut config = load_config(config_path)?;
        apply_analysis_overrides(&mut config, self.provider.as_deref(), self.model.as_deref())?;
        if let Some(max_bytes) = self.max_bytes {
            config.fetch.max_bytes = max_bytes;
        }
        let bind = self.bind.clone().unwrap_or_else(|| config.server.bind.clone());

        info!(
            "Fetch limits: {}, {}s timeout",
            ReportFormatter::format_bytes(config.fetch.max_bytes),
            config.fetch.timeout_seconds
        );

        let state = AppState::from_config(&config)?;
        serve(&bind, state).await
    }
}
