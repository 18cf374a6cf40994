//! Extension relay against a live API

use crate::common::{api_state, spawn_api, spawn_media_host, CountingCapability};
use anyhow::Result;
use fakecheck::config::RelayConfig;
use fakecheck::errors::AppResult;
use fakecheck::relay::{
    Badge, LastAnalysis, LastAnalysisSlot, PageMessage, PageMessenger, PopupView, Relay,
    RelayOutcome, RelayState,
};
use fakecheck::types::Verdict;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Default)]
struct Recording(Vec<(u32, PageMessage)>);

impl PageMessenger for Recording {
    fn send(&mut self, tab_id: u32, message: &PageMessage) -> AppResult<()> {
        self.0.push((tab_id, message.clone()));
        Ok(())
    }
}

async fn relay_for(reply: &str) -> Result<Relay> {
    let api = spawn_api(api_state(CountingCapability::new(reply), 1024 * 1024)).await;
    Ok(Relay::from_config(&RelayConfig {
        endpoint: format!("{}/api/v1/analyze-url", api),
        api_key: "test-key".to_string(),
        ..RelayConfig::default()
    })?)
}

#[tokio::test]
async fn test_safe_verdict_badges_page_and_fills_slot() -> Result<()> {
    let host = spawn_media_host().await;
    let relay = relay_for(r#"{"confidenceScore":0.1,"report":"Looks real. No edits. Extra."}"#).await?;
    let mut state = RelayState::new(Duration::from_secs(5));
    let mut messenger = Recording::default();
    let media_url = host.url("/media/photo.png");

    let outcome = relay
        .analyze_media(&mut state, &mut messenger, 7, &media_url)
        .await;

    assert_eq!(outcome, RelayOutcome::Completed(Verdict::Safe));
    assert_eq!(state.badge.current(), Some(Badge::for_verdict(Verdict::Safe)));
    assert_eq!(
        messenger.0,
        vec![(
            7,
            PageMessage::AddVerifiedBadge {
                media_url: media_url.clone()
            }
        )]
    );

    match PopupView::from_slot(&state.slot) {
        PopupView::Result {
            media_url: shown,
            verdict,
            summary,
            ..
        } => {
            assert_eq!(shown, media_url);
            assert_eq!(verdict, "Safe");
            assert_eq!(summary, "Looks real. No edits.");
        }
        other => panic!("unexpected popup view {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_suspicious_verdict_sends_no_page_message() -> Result<()> {
    let host = spawn_media_host().await;
    let relay = relay_for(r#"{"confidenceScore":0.5}"#).await?;
    let mut state = RelayState::default();
    let mut messenger = Recording::default();

    let outcome = relay
        .analyze_media(&mut state, &mut messenger, 1, &host.url("/media/photo.png"))
        .await;

    assert_eq!(outcome, RelayOutcome::Completed(Verdict::Suspicious));
    assert_eq!(state.badge.current(), Some(Badge::for_verdict(Verdict::Suspicious)));
    assert!(messenger.0.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_api_error_is_stored_and_overwrites_previous_result() -> Result<()> {
    let host = spawn_media_host().await;
    let relay = relay_for(r#"{"confidenceScore":0.1}"#).await?;
    let mut state = RelayState::default();
    let mut messenger = Recording::default();

    relay
        .analyze_media(&mut state, &mut messenger, 1, &host.url("/media/photo.png"))
        .await;
    assert!(matches!(state.slot.get(), Some(LastAnalysis::Completed(_))));

    let outcome = relay
        .analyze_media(&mut state, &mut messenger, 1, &host.url("/media/missing.png"))
        .await;

    let message = match outcome {
        RelayOutcome::Failed(message) => message,
        other => panic!("unexpected outcome {:?}", other),
    };
    assert!(message.starts_with("API request failed: Bad Request - "), "{}", message);
    assert_eq!(state.badge.current(), Some(Badge::ERROR));

    match state.slot.get() {
        Some(LastAnalysis::Failed(failed)) => {
            assert_eq!(failed.media_url, host.url("/media/missing.png"));
            assert_eq!(failed.error, message);
        }
        other => panic!("slot not overwritten: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_slot_survives_save_and_load() -> Result<()> {
    let host = spawn_media_host().await;
    let relay = relay_for(r#"{"verdict":"Likely Manipulated","confidenceScore":0.95}"#).await?;
    let mut state = RelayState::default();

    relay
        .analyze_media(&mut state, &mut Recording::default(), 1, &host.url("/media/photo.png"))
        .await;

    let dir = TempDir::new()?;
    let path = dir.path().join("state").join("last.json");
    state.slot.save(&path)?;

    let loaded = LastAnalysisSlot::load(&path)?;
    assert_eq!(loaded, state.slot);
    match PopupView::from_slot(&loaded) {
        PopupView::Result { css_class, .. } => assert_eq!(css_class, Verdict::LikelyManipulated.css_class()),
        other => panic!("unexpected popup view {:?}", other),
    }
    Ok(())
}
