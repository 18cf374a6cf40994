//! Single-slot "last analysis" store
//!
//! Lifecycle: set on each relayed request, read when the popup opens,
//! overwritten by the next request. Persisted as `{ "lastAnalysis": ... }`.

use crate::errors::AppResult;
use crate::types::AnalysisResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const SLOT_KEY: &str = "lastAnalysis";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedAnalysis {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub media_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedAnalysis {
    pub error: String,
    pub media_url: String,
}

/// Contents of the slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LastAnalysis {
    Failed(FailedAnalysis),
    Completed(CompletedAnalysis),
    /// Stored data in neither shape, e.g. written by an older version
    Unrecognised(serde_json::Value),
}

impl LastAnalysis {
    pub fn media_url(&self) -> Option<&str> {
        match self {
            LastAnalysis::Failed(failed) => Some(&failed.media_url),
            LastAnalysis::Completed(completed) => Some(&completed.media_url),
            LastAnalysis::Unrecognised(value) => value.get("mediaUrl").and_then(|v| v.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LastAnalysisSlot {
    entry: Option<LastAnalysis>,
}

impl LastAnalysisSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever the slot held
    pub fn store(&mut self, entry: LastAnalysis) {
        self.entry = Some(entry);
    }

    pub fn get(&self) -> Option<&LastAnalysis> {
        self.entry.as_ref()
    }

    /// Load from a JSON file; a missing file is an empty slot
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!("No saved analysis at {}", path.display());
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)?;
        let mut stored: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)?;
        let entry = match stored.remove(SLOT_KEY) {
            Some(serde_json::Value::Null) | None => None,
            Some(value) => Some(serde_json::from_value(value)?),
        };
        Ok(Self { entry })
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut body = serde_json::Map::new();
        body.insert(SLOT_KEY.to_string(), serde_json::to_value(&self.entry)?);
        std::fs::write(path, serde_json::to_string_pretty(&body)?)?;
        debug!("Saved last analysis to {}", path.display());
        Ok(())
    }
}
