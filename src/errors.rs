use crate::types::AnalysisFailure;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Intake or analysis failures
    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    /// Analysis outcome was a failure
    #[error("{0}")]
    Failed(AnalysisFailure),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Outbound HTTP (relay, webhooks)
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP server startup or runtime failure
    #[error("Server error: {0}")]
    Server(String),

    /// Relay call to the analysis API failed; shown to the user verbatim
    #[error("{0}")]
    Relay(String),
}

/// Failure taxonomy of the intake and analysis pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Bad or missing URL, empty file, undecodable data URI
    #[error("{0}")]
    InvalidInput(String),

    /// MIME type is not image/video/audio after full resolution
    #[error("The URL does not point to a valid media file. Content-Type received: {0}")]
    UnsupportedMediaType(String),

    /// Payload exceeds the configured byte ceiling
    #[error("Media exceeds the {limit} byte limit (received at least {actual} bytes)")]
    PayloadTooLarge { limit: u64, actual: u64 },

    /// Network failure or timeout talking to a remote host
    #[error("{0}")]
    UpstreamUnreachable(String),

    /// Reply from the analysis capability did not match the expected shape
    #[error("The analysis service returned an unexpected reply: {0}")]
    UpstreamMalformed(String),

    /// Any other failure during analysis
    #[error("An error occurred during AI analysis: {0}")]
    AnalysisInternal(String),
}

impl AnalysisError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AnalysisError::InvalidInput(_) => FailureKind::InvalidInput,
            AnalysisError::UnsupportedMediaType(_) => FailureKind::UnsupportedMediaType,
            AnalysisError::PayloadTooLarge { .. } => FailureKind::PayloadTooLarge,
            AnalysisError::UpstreamUnreachable(_) => FailureKind::UpstreamUnreachable,
            AnalysisError::UpstreamMalformed(_) => FailureKind::UpstreamMalformed,
            AnalysisError::AnalysisInternal(_) => FailureKind::AnalysisInternal,
        }
    }
}

/// Discriminant of an [`AnalysisError`], carried on serialized failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidInput,
    UnsupportedMediaType,
    PayloadTooLarge,
    UpstreamUnreachable,
    UpstreamMalformed,
    AnalysisInternal,
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for intake and analysis operations
pub type AnalysisResultOf<T> = Result<T, AnalysisError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<AnalysisFailure> for AppError {
    fn from(failure: AnalysisFailure) -> Self {
        AppError::Failed(failure)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::Config(format!("TOML export failed: {}", err))
    }
}
