//! Paginated export document
//!
//! The report is laid out onto fixed-size pages as a list of draw operations.
//! A renderer only has to replay the operations in order; all layout decisions
//! (wrapping, page breaks, re-applying the theme) are made here.

use super::display::{classify_report, ReportLine};
use crate::config::ExportConfig;
use crate::errors::{AppError, AppResult};
use crate::types::{AnalysisResult, EncodedMedia, MediaCategory};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Average glyph width as a fraction of the font size
const GLYPH_WIDTH_RATIO: f64 = 0.5;
const TITLE: &str = "FakeCheck Analysis Report";
const BULLET_MARKER: &str = "\u{2022} ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RRGGBB` (leading `#` optional)
    pub fn from_hex(hex: &str) -> AppResult<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AppError::Config(format!("Invalid hex colour: {}", hex)));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| AppError::Config(format!("Invalid hex colour {}: {}", hex, e)))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    Title,
    Heading,
    Body,
}

impl TextStyle {
    pub fn is_bold(&self) -> bool {
        !matches!(self, TextStyle::Body)
    }
}

/// One drawing instruction; coordinates are points from the top-left corner
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    FillBackground {
        color: Rgb,
    },
    SetTextColor {
        color: Rgb,
    },
    Text {
        x: f64,
        y: f64,
        size: f64,
        style: TextStyle,
        text: String,
    },
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mime_type: String,
        data_uri: String,
        /// Set for video media: the frame to render
        #[serde(skip_serializing_if = "Option::is_none")]
        frame: Option<u32>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportPage {
    pub number: usize,
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub file_name: String,
    pub page_width: f64,
    pub page_height: f64,
    pub pages: Vec<ExportPage>,
}

impl ExportDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text drawn in the document, in order
    pub fn text_lines(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|page| page.ops.iter())
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Resolved layout options
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    pub font_size: f64,
    pub heading_font_size: f64,
    pub line_height: f64,
    pub snapshot_height: f64,
    pub background: Rgb,
    pub text_color: Rgb,
}

impl ExportOptions {
    pub fn from_config(config: &ExportConfig) -> AppResult<Self> {
        if config.page_width <= 2.0 * config.margin || config.page_height <= 2.0 * config.margin {
            return Err(AppError::Config(
                "Export margins leave no room for content".to_string(),
            ));
        }
        if config.font_size <= 0.0 || config.line_height <= 0.0 {
            return Err(AppError::Config(
                "Export font size and line height must be positive".to_string(),
            ));
        }

        Ok(Self {
            page_width: config.page_width,
            page_height: config.page_height,
            margin: config.margin,
            font_size: config.font_size,
            heading_font_size: config.heading_font_size,
            line_height: config.line_height,
            snapshot_height: config.snapshot_height,
            background: Rgb::from_hex(&config.background)?,
            text_color: Rgb::from_hex(&config.text_color)?,
        })
    }

    fn content_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }

    fn bottom(&self) -> f64 {
        self.page_height - self.margin
    }

    fn chars_per_line(&self, size: f64) -> usize {
        ((self.content_width() / (size * GLYPH_WIDTH_RATIO)).floor() as usize).max(1)
    }
}

/// Suggested download name, e.g. `fakecheck-report-2024-05-01T12:00:00Z.pdf`
pub fn export_file_name(generated_at: DateTime<Utc>) -> String {
    format!(
        "fakecheck-report-{}.pdf",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

/// Greedy word wrap; words longer than a line are split
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

struct PageWriter<'a> {
    options: &'a ExportOptions,
    pages: Vec<ExportPage>,
    y: f64,
}

impl<'a> PageWriter<'a> {
    fn new(options: &'a ExportOptions) -> Self {
        let mut writer = Self {
            options,
            pages: Vec::new(),
            y: 0.0,
        };
        writer.new_page();
        writer
    }

    fn new_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(ExportPage {
            number,
            ops: vec![
                DrawOp::FillBackground {
                    color: self.options.background,
                },
                DrawOp::SetTextColor {
                    color: self.options.text_color,
                },
            ],
        });
        self.y = self.options.margin;
    }

    fn ensure_room(&mut self, height: f64) {
        let at_top = self.y <= self.options.margin;
        if self.y + height > self.options.bottom() && !at_top {
            self.new_page();
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn text_line(&mut self, text: String, size: f64, style: TextStyle, advance: f64) {
        self.ensure_room(advance);
        let op = DrawOp::Text {
            x: self.options.margin,
            y: self.y + size,
            size,
            style,
            text,
        };
        self.push(op);
        self.y += advance;
    }

    fn paragraph(&mut self, text: &str, prefix: &str, style: TextStyle) {
        let (size, advance) = match style {
            TextStyle::Body => (self.options.font_size, self.options.line_height),
            _ => {
                let size = self.options.heading_font_size;
                (size, self.options.line_height.max(size * 1.4))
            }
        };
        let indent = " ".repeat(prefix.chars().count());
        let width = self
            .options
            .chars_per_line(size)
            .saturating_sub(prefix.chars().count());

        for (i, line) in wrap_text(text, width).into_iter().enumerate() {
            let lead = if i == 0 { prefix } else { indent.as_str() };
            self.text_line(format!("{}{}", lead, line), size, style, advance);
        }
    }

    fn gap(&mut self, height: f64) {
        self.y += height;
    }

    fn image(&mut self, media: &EncodedMedia, frame: Option<u32>) {
        let height = self.options.snapshot_height;
        self.ensure_room(height);
        let op = DrawOp::Image {
            x: self.options.margin,
            y: self.y,
            width: self.options.content_width(),
            height,
            mime_type: media.mime_type().to_string(),
            data_uri: media.to_data_uri(),
            frame,
        };
        self.push(op);
        self.y += height;
    }

    fn finish(self) -> Vec<ExportPage> {
        self.pages
    }
}

/// Lay out a result, its media snapshot and the report onto pages
pub fn to_export_document(
    result: &AnalysisResult,
    media: &EncodedMedia,
    file_name: &str,
    options: &ExportOptions,
) -> ExportDocument {
    to_export_document_at(result, media, file_name, options, Utc::now())
}

pub fn to_export_document_at(
    result: &AnalysisResult,
    media: &EncodedMedia,
    file_name: &str,
    options: &ExportOptions,
    generated_at: DateTime<Utc>,
) -> ExportDocument {
    let mut writer = PageWriter::new(options);
    let title_size = options.heading_font_size + 4.0;

    writer.text_line(TITLE.to_string(), title_size, TextStyle::Title, title_size * 1.6);
    writer.paragraph(
        &format!(
            "Verdict: {}    Confidence: {:.0}%",
            result.verdict,
            result.confidence_score * 100.0
        ),
        "",
        TextStyle::Body,
    );
    writer.paragraph(
        &format!(
            "Generated: {}",
            generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        "",
        TextStyle::Body,
    );
    writer.gap(options.line_height);

    match media.category() {
        MediaCategory::Image => writer.image(media, None),
        MediaCategory::Video => writer.image(media, Some(0)),
        MediaCategory::Audio => {
            writer.paragraph(&format!("Audio file: {}", file_name), "", TextStyle::Body)
        }
    }
    writer.gap(options.line_height);

    for line in classify_report(&result.report) {
        match line {
            ReportLine::Heading(text) => writer.paragraph(text, "", TextStyle::Heading),
            ReportLine::Bullet(text) => writer.paragraph(text, BULLET_MARKER, TextStyle::Body),
            ReportLine::Plain(text) if text.trim().is_empty() => writer.gap(options.line_height),
            ReportLine::Plain(text) => writer.paragraph(text, "", TextStyle::Body),
        }
    }

    if !result.evidence_frames.is_empty() {
        writer.gap(options.line_height);
        writer.paragraph("Evidence Frames", "", TextStyle::Heading);
        for frame in &result.evidence_frames {
            writer.paragraph(
                &format!("Frame {}: score {:.2}", frame.frame_index, frame.score),
                BULLET_MARKER,
                TextStyle::Body,
            );
        }
    }

    let anomalies = result
        .document_anomalies
        .iter()
        .chain(result.audio_anomalies.iter());
    let mut wrote_heading = false;
    for anomaly in anomalies {
        if !wrote_heading {
            writer.gap(options.line_height);
            writer.paragraph("Anomalies", "", TextStyle::Heading);
            wrote_heading = true;
        }
        let detail = if anomaly.description.is_empty() {
            anomaly.kind.clone()
        } else {
            format!("{}: {}", anomaly.kind, anomaly.description)
        };
        writer.paragraph(&detail, BULLET_MARKER, TextStyle::Body);
    }

    ExportDocument {
        file_name: export_file_name(generated_at),
        page_width: options.page_width,
        page_height: options.page_height,
        pages: writer.finish(),
    }
}
