//! Extension-to-page messages and the content-side verified badge overlay

use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

/// Fire-and-forget message sent to a tab's content script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum PageMessage {
    #[serde(rename = "addVerifiedBadge")]
    AddVerifiedBadge {
        #[serde(rename = "mediaUrl")]
        media_url: String,
    },
}

/// Delivers messages to a tab
pub trait PageMessenger {
    fn send(&mut self, tab_id: u32, message: &PageMessage) -> AppResult<()>;
}

/// Messenger for headless use: writes each message to the log
#[derive(Debug, Default)]
pub struct LogMessenger;

impl PageMessenger for LogMessenger {
    fn send(&mut self, tab_id: u32, message: &PageMessage) -> AppResult<()> {
        info!("tab {} <- {}", tab_id, serde_json::to_string(message)?);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Img,
    Video,
    /// `<source>` inside a `<video>`; the badge goes on the parent
    Source { parent_video: Option<usize> },
}

/// A media element on the page, identified by its index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaElement {
    pub kind: ElementKind,
    pub src: String,
}

/// Tracks which page elements already carry a verified badge
#[derive(Debug, Default)]
pub struct ContentOverlay {
    badged: HashSet<usize>,
}

impl ContentOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one message; returns the element indices that received a new badge
    pub fn handle(&mut self, page: &[MediaElement], message: &PageMessage) -> Vec<usize> {
        match message {
            PageMessage::AddVerifiedBadge { media_url } => self.add_verified_badge(page, media_url),
        }
    }

    fn add_verified_badge(&mut self, page: &[MediaElement], media_url: &str) -> Vec<usize> {
        let mut added = Vec::new();

        for (index, element) in page.iter().enumerate() {
            if element.src != media_url {
                continue;
            }
            let target = match element.kind {
                ElementKind::Img | ElementKind::Video => Some(index),
                ElementKind::Source { parent_video } => parent_video,
            };
            let Some(target) = target else {
                continue;
            };

            if self.badged.insert(target) {
                debug!("Verified badge added to element {}", target);
                added.push(target);
            }
        }

        added
    }

    pub fn is_badged(&self, index: usize) -> bool {
        self.badged.contains(&index)
    }
}
