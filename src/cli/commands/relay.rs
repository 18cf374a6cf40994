use super::load_config;
use crate::errors::AppResult;
use crate::relay::{LastAnalysisSlot, LogMessenger, Relay, RelayClient, RelayOutcome, RelayState};
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Relay a media URL to the FakeCheck API, as the browser extension does
#[derive(Args)]
pub struct RelayCommand {
    /// Media URL to analyse
    url: String,

    /// analyze-url endpoint (overrides config)
    #[arg(long)]
    endpoint: Option<String>,

    /// API key sent as a bearer token (overrides config and FAKECHECK_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Tab that receives the verified-badge message
    #[arg(long, default_value_t = 0)]
    tab_id: u32,

    /// Do not notify the page overlay
    #[arg(long)]
    no_overlay: bool,

    /// Last-analysis state file (overrides config)
    #[arg(long)]
    state_path: Option<PathBuf>,
}

impl RelayCommand {
    pub async fn run(&self, config_path: Option<&Path>) -> AppResult<()> {
        let mut config = load_config(config_path)?.relay;
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }
        if self.no_overlay {
            config.overlay_enabled = false;
        }
        let state_path = self.state_path.clone().unwrap_or(config.state_path.clone());

        let relay = Relay::new(RelayClient::new(&config)?, config.overlay_enabled);
        let mut state = RelayState::new(Duration::from_secs(config.badge_clear_seconds));
        state.slot = LastAnalysisSlot::load(&state_path)?;

        let outcome = relay
            .analyze_media(&mut state, &mut LogMessenger, self.tab_id, &self.url)
            .await;

        if let Some(badge) = state.badge.current() {
            println!("Badge: {} ({})", badge.text, badge.color);
        }

        match outcome {
            RelayOutcome::Completed(verdict) => println!("Verdict: {}", verdict),
            RelayOutcome::Failed(message) => println!("Error: {}", message),
            RelayOutcome::MissingKey => {
                println!("API Key Required: Please set your FakeCheck API key (--api-key or FAKECHECK_API_KEY).");
                return Ok(());
            }
        }

        state.slot.save(&state_path)?;
        info!("Last analysis saved to {}", state_path.display());
        Ok(())
    }
}
