//! Extension relay
//!
//! The relay forwards a media URL to the analyze-url endpoint and distributes
//! the verdict: the toolbar badge, the single-slot last analysis read by the
//! popup, and (for `Safe` media) a verified-badge message to the page.
//!
//! All UI state lives in [`RelayState`], owned by the caller and passed in
//! explicitly.

pub mod badge;
pub mod client;
pub mod overlay;
pub mod popup;
pub mod state;

pub use badge::{Badge, BadgeIndicator};
pub use client::RelayClient;
pub use overlay::{ContentOverlay, ElementKind, LogMessenger, MediaElement, PageMessage, PageMessenger};
pub use popup::PopupView;
pub use state::{CompletedAnalysis, FailedAnalysis, LastAnalysis, LastAnalysisSlot};

use crate::config::RelayConfig;
use crate::errors::AppResult;
use crate::types::Verdict;
use std::time::Duration;
use tracing::{error, info, warn};

/// Badge and last-analysis state owned by the extension shell
#[derive(Debug, Clone, Default)]
pub struct RelayState {
    pub slot: LastAnalysisSlot,
    pub badge: BadgeIndicator,
}

impl RelayState {
    pub fn new(badge_clear_after: Duration) -> Self {
        Self {
            slot: LastAnalysisSlot::new(),
            badge: BadgeIndicator::new(badge_clear_after),
        }
    }
}

/// What happened to one relayed request
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    Completed(Verdict),
    Failed(String),
    /// No API key; nothing was sent
    MissingKey,
}

pub struct Relay {
    client: RelayClient,
    overlay_enabled: bool,
}

impl Relay {
    pub fn new(client: RelayClient, overlay_enabled: bool) -> Self {
        Self {
            client,
            overlay_enabled,
        }
    }

    pub fn from_config(config: &RelayConfig) -> AppResult<Self> {
        Ok(Self::new(RelayClient::new(config)?, config.overlay_enabled))
    }

    /// Relay one media URL and update the state it touches
    pub async fn analyze_media(
        &self,
        state: &mut RelayState,
        messenger: &mut dyn PageMessenger,
        tab_id: u32,
        media_url: &str,
    ) -> RelayOutcome {
        info!("Relaying {} to {}", media_url, self.client.endpoint());
        state.badge.show(Badge::LOADING);

        if !self.client.has_api_key() {
            warn!("API key required: set relay.api_key or FAKECHECK_API_KEY");
            state.badge.show(Badge::MISSING_KEY);
            return RelayOutcome::MissingKey;
        }

        match self.client.analyze_url(media_url).await {
            Ok(result) => {
                let verdict = result.verdict;
                state.slot.store(LastAnalysis::Completed(CompletedAnalysis {
                    result,
                    media_url: media_url.to_string(),
                }));
                state.badge.flash(Badge::for_verdict(verdict));

                if verdict.is_safe() && self.overlay_enabled {
                    let message = PageMessage::AddVerifiedBadge {
                        media_url: media_url.to_string(),
                    };
                    if let Err(e) = messenger.send(tab_id, &message) {
                        error!("Failed to send message to content script: {}", e);
                    }
                }

                info!("{} -> {}", media_url, verdict);
                RelayOutcome::Completed(verdict)
            }
            Err(e) => {
                let message = e.to_string();
                error!("FakeCheck analysis error: {}", message);
                state.slot.store(LastAnalysis::Failed(FailedAnalysis {
                    error: message.clone(),
                    media_url: media_url.to_string(),
                }));
                state.badge.show(Badge::ERROR);
                RelayOutcome::Failed(message)
            }
        }
    }
}
