//! Line-oriented conversion of the markdown report into display markup
//!
//! Only two constructs are special: `### ` headings and `* ` bullets. Every
//! other line passes through untouched.

const HEADING_PREFIX: &str = "### ";
const BULLET_PREFIX: &str = "* ";

/// Classification of one report line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLine<'a> {
    Heading(&'a str),
    Bullet(&'a str),
    Plain(&'a str),
}

impl<'a> ReportLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim_start();
        if let Some(text) = trimmed.strip_prefix(HEADING_PREFIX) {
            ReportLine::Heading(text)
        } else if let Some(text) = trimmed.strip_prefix(BULLET_PREFIX) {
            ReportLine::Bullet(text)
        } else {
            ReportLine::Plain(line)
        }
    }

    /// The line's text with any structural prefix removed
    pub fn text(&self) -> &'a str {
        match self {
            ReportLine::Heading(text) | ReportLine::Bullet(text) | ReportLine::Plain(text) => text,
        }
    }

    pub fn to_markup(&self) -> String {
        match self {
            ReportLine::Heading(text) => format!("<h3>{}</h3>", text),
            ReportLine::Bullet(text) => format!("<li>{}</li>", text),
            ReportLine::Plain(text) => (*text).to_string(),
        }
    }
}

/// Split a report into classified lines
pub fn classify_report(report: &str) -> Vec<ReportLine<'_>> {
    report.split('\n').map(ReportLine::classify).collect()
}

/// Convert `### ` headings and `* ` bullets into markup, leaving all other text as is
///
/// ```
/// use fakecheck::report::to_display_markup;
///
/// assert_eq!(
///     to_display_markup("### Title\n* a\n* b"),
///     "<h3>Title</h3>\n<li>a</li>\n<li>b</li>"
/// );
/// ```
pub fn to_display_markup(report: &str) -> String {
    classify_report(report)
        .iter()
        .map(ReportLine::to_markup)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Short summary for the popup: the first two sentences of the report body, headings skipped
pub fn summary(report: &str) -> String {
    let text = classify_report(report)
        .iter()
        .filter(|line| !matches!(line, ReportLine::Heading(_)))
        .map(|line| line.text().trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        return "Analysis complete.".to_string();
    }

    let sentences: Vec<&str> = text
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(2)
        .collect();
    format!("{}.", sentences.join(". "))
}
