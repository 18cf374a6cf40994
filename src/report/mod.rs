//! Report rendering
//!
//! - **Display markup**: `### ` headings and `* ` bullets become `<h3>`/`<li>`
//! - **Export document**: fixed-size pages of draw operations
//! - **Console output**: text or JSON for the CLI

pub mod console;
pub mod display;
pub mod export;

pub use console::{OutputFormat, ReportFormatter};
pub use display::{classify_report, summary, to_display_markup, ReportLine};
pub use export::{
    export_file_name, to_export_document, to_export_document_at, DrawOp, ExportDocument,
    ExportOptions, ExportPage, Rgb, TextStyle,
};
