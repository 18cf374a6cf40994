//! Popup view model built from the last-analysis slot

use super::state::{LastAnalysis, LastAnalysisSlot};
use crate::report::summary;
use std::fmt;

const NO_RECENT: &str = "No recent analysis. Right-click media to start.";
const UNCLEAR: &str = "Analysis result was unclear. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum PopupView {
    NoRecent,
    Error {
        message: String,
        media_url: String,
    },
    Result {
        media_url: String,
        verdict: String,
        css_class: String,
        summary: String,
        report_link: Option<String>,
    },
    Unclear,
}

impl PopupView {
    pub fn from_slot(slot: &LastAnalysisSlot) -> Self {
        match slot.get() {
            None => PopupView::NoRecent,
            Some(LastAnalysis::Failed(failed)) => PopupView::Error {
                message: failed.error.clone(),
                media_url: failed.media_url.clone(),
            },
            Some(LastAnalysis::Completed(completed)) => PopupView::Result {
                media_url: completed.media_url.clone(),
                verdict: completed.result.verdict.label().to_string(),
                css_class: completed.result.verdict.css_class().to_string(),
                summary: summary(&completed.result.report),
                report_link: completed.result.report_artifact_ref.clone(),
            },
            Some(LastAnalysis::Unrecognised(_)) => PopupView::Unclear,
        }
    }
}

impl fmt::Display for PopupView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopupView::NoRecent => writeln!(f, "{}", NO_RECENT),
            PopupView::Unclear => writeln!(f, "{}", UNCLEAR),
            PopupView::Error { message, media_url } => {
                writeln!(f, "Media:   {}", media_url)?;
                writeln!(f, "Error:   {}", message)
            }
            PopupView::Result {
                media_url,
                verdict,
                css_class,
                summary,
                report_link,
            } => {
                writeln!(f, "Media:   {}", media_url)?;
                writeln!(f, "Verdict: {} [{}]", verdict, css_class)?;
                writeln!(f, "Summary: {}", summary)?;
                if let Some(link) = report_link {
                    writeln!(f, "Report:  {}", link)?;
                }
                Ok(())
            }
        }
    }
}
