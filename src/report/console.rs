//! Console and JSON output for the CLI

use super::display::{classify_report, to_display_markup, ReportLine};
use crate::errors::AppResult;
use crate::types::{AnalysisFailure, AnalysisResult};
use serde::Serialize;

/// Output format options for analysis results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable console output
    #[default]
    Console,
    /// JSON format for programmatic use
    Json,
}

impl OutputFormat {
    /// Parse a `--format` value; anything unrecognised is console output
    pub fn parse(format_str: &str) -> Self {
        match format_str.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Console,
        }
    }
}

/// Report formatter for analysis outcomes
pub struct ReportFormatter;

impl ReportFormatter {
    /// Format byte counts using conventional units (KB, MB, GB)
    ///
    /// ```
    /// # use fakecheck::report::ReportFormatter;
    /// assert_eq!(ReportFormatter::format_bytes(512), "512 B");
    /// assert_eq!(ReportFormatter::format_bytes(2048), "2.00 KB");
    /// ```
    pub fn format_bytes(bytes: u64) -> String {
        const KB: f64 = 1024.0;
        const MB: f64 = KB * 1024.0;
        const GB: f64 = MB * 1024.0;

        if bytes as f64 >= GB {
            format!("{:.2} GB", bytes as f64 / GB)
        } else if bytes as f64 >= MB {
            format!("{:.2} MB", bytes as f64 / MB)
        } else if bytes as f64 >= KB {
            format!("{:.2} KB", bytes as f64 / KB)
        } else {
            format!("{} B", bytes)
        }
    }

    /// Format a successful analysis
    ///
    /// `markup` swaps the plain-text report body for display markup.
    pub fn format_result(
        source: &str,
        result: &AnalysisResult,
        format: OutputFormat,
        markup: bool,
    ) -> AppResult<String> {
        match format {
            OutputFormat::Console => {
                let mut output = String::new();
                output.push_str(&format!("Source:     {}\n", source));
                output.push_str(&format!("Verdict:    {}\n", result.verdict));
                output.push_str(&format!(
                    "Confidence: {:.0}%\n",
                    result.confidence_score * 100.0
                ));
                if let Some(artifact) = &result.report_artifact_ref {
                    output.push_str(&format!("Report:     {}\n", artifact));
                }
                output.push_str(&format!("{}\n", "=".repeat(60)));

                if markup {
                    output.push_str(&to_display_markup(&result.report));
                    output.push('\n');
                } else {
                    for line in classify_report(&result.report) {
                        match line {
                            ReportLine::Heading(text) => {
                                output.push_str(&format!("\n{}\n", text.to_uppercase()))
                            }
                            ReportLine::Bullet(text) => output.push_str(&format!("  - {}\n", text)),
                            ReportLine::Plain(text) => output.push_str(&format!("{}\n", text)),
                        }
                    }
                }

                if !result.evidence_frames.is_empty() {
                    output.push_str("\nEvidence frames:\n");
                    for frame in &result.evidence_frames {
                        output.push_str(&format!(
                            "  frame {:>5} | score {:.2}{}\n",
                            frame.frame_index,
                            frame.score,
                            if frame.heatmap_ref.is_some() {
                                " | heatmap"
                            } else {
                                ""
                            }
                        ));
                    }
                }

                for (label, anomalies) in [
                    ("Document anomalies", &result.document_anomalies),
                    ("Audio anomalies", &result.audio_anomalies),
                ] {
                    if anomalies.is_empty() {
                        continue;
                    }
                    output.push_str(&format!("\n{}:\n", label));
                    for anomaly in anomalies {
                        output.push_str(&format!("  {} {}\n", anomaly.kind, anomaly.description));
                    }
                }

                Ok(output)
            }
            OutputFormat::Json => {
                if markup {
                    let mut value = serde_json::to_value(result)?;
                    value["reportMarkup"] = serde_json::Value::String(to_display_markup(&result.report));
                    Ok(serde_json::to_string_pretty(&value)?)
                } else {
                    Self::export_json(result)
                }
            }
        }
    }

    /// Format a failed analysis
    pub fn format_failure(failure: &AnalysisFailure, format: OutputFormat) -> AppResult<String> {
        match format {
            OutputFormat::Console => Ok(format!("Analysis failed: {}\n", failure.message)),
            OutputFormat::Json => Self::export_json(&serde_json::json!({ "error": failure.message })),
        }
    }

    /// Export data as JSON for programmatic use
    pub fn export_json<T: Serialize>(data: &T) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}
