//! Unit tests for the pure pipeline contracts

pub mod content_type;
pub mod encoding;
pub mod outcome;
pub mod report_rendering;
pub mod verdict_banding;
