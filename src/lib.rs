//! FakeCheck deepfake-detection media analysis
//!
//! Media intake (file or URL) is encoded into a MIME-tagged payload, sent to an
//! external analysis capability through a single gateway, and normalised into a
//! verdict with a markdown report. The report renders to display markup or a
//! paginated export document. The HTTP API and the extension relay are two entry
//! points into the same gateway.

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod media;
pub mod relay;
pub mod report;
pub mod types;
