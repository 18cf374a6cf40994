//! Toolbar badge indicator

use crate::types::Verdict;
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub text: &'static str,
    pub color: &'static str,
}

impl Badge {
    pub const LOADING: Badge = Badge {
        text: "...",
        color: "#9A7BFF",
    };
    pub const ERROR: Badge = Badge {
        text: "ERR",
        color: "#F44336",
    };
    pub const MISSING_KEY: Badge = Badge {
        text: "!",
        color: "#FFC107",
    };

    pub fn for_verdict(verdict: Verdict) -> Badge {
        match verdict {
            Verdict::Safe => Badge {
                text: "\u{2713}",
                color: "#4CAF50",
            },
            Verdict::Suspicious => Badge {
                text: "?",
                color: "#FF9800",
            },
            Verdict::LikelyManipulated => Badge {
                text: "X",
                color: "#F44336",
            },
        }
    }
}

/// Current badge, with optional expiry for verdict badges
#[derive(Debug, Clone)]
pub struct BadgeIndicator {
    current: Option<Badge>,
    expires_at: Option<Instant>,
    clear_after: Duration,
}

impl BadgeIndicator {
    pub fn new(clear_after: Duration) -> Self {
        Self {
            current: None,
            expires_at: None,
            clear_after,
        }
    }

    /// Show a badge until replaced
    pub fn show(&mut self, badge: Badge) {
        self.current = Some(badge);
        self.expires_at = None;
    }

    /// Show a badge that clears itself after the configured delay
    pub fn flash(&mut self, badge: Badge) {
        self.flash_at(badge, Instant::now());
    }

    pub fn flash_at(&mut self, badge: Badge, now: Instant) {
        self.current = Some(badge);
        self.expires_at = Some(now + self.clear_after);
    }

    pub fn current(&self) -> Option<Badge> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<Badge> {
        match self.expires_at {
            Some(expiry) if now >= expiry => None,
            _ => self.current,
        }
    }
}

impl Default for BadgeIndicator {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}
