//! Transport-agnostic request handlers
//!
//! Handlers take the raw request body and return an [`ApiResponse`]; the axum
//! layer only moves bytes. This keeps status mapping testable without a socket.

use super::webhook::WebhookNotifier;
use crate::analysis::AnalysisGateway;
use crate::config::AppConfig;
use crate::errors::{AnalysisError, AppResult, FailureKind};
use crate::media::{is_http_url, MediaFetcher};
use crate::types::{AnalysisFailure, AnalysisRequest, AnalysisResult, EncodedMedia};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

const MISSING_URL: &str = "A valid URL must be provided.";
const MISSING_DATA_URI: &str = "A media data URI must be provided.";

/// Shared, immutable server state
pub struct AppState {
    pub fetcher: MediaFetcher,
    pub gateway: AnalysisGateway,
    pub webhook: WebhookNotifier,
}

impl AppState {
    pub fn new(fetcher: MediaFetcher, gateway: AnalysisGateway, webhook: WebhookNotifier) -> Self {
        Self {
            fetcher,
            gateway,
            webhook,
        }
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Ok(Self::new(
            MediaFetcher::new(&config.fetch)?,
            AnalysisGateway::from_config(&config.analysis)?,
            WebhookNotifier::new(config.fetch.timeout_seconds)?,
        ))
    }
}

/// Status code plus JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    /// Result fields flattened next to one echoed field
    fn success(result: &AnalysisResult, echo_key: &str, echo_value: Value) -> Self {
        let mut body = serde_json::to_value(result)
            .unwrap_or_else(|e| json!({ "error": format!("Failed to serialise result: {}", e) }));
        if let Some(object) = body.as_object_mut() {
            object.insert(echo_key.to_string(), echo_value);
        }
        Self { status: 200, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Where in the pipeline a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Body validation, fetch, MIME resolution
    Intake,
    /// Gateway and capability
    Analysis,
}

pub fn status_for(stage: Stage, kind: FailureKind) -> u16 {
    match (stage, kind) {
        (_, FailureKind::PayloadTooLarge) => 413,
        (Stage::Intake, _) => 400,
        (Stage::Analysis, FailureKind::InvalidInput) => 400,
        (Stage::Analysis, _) => 500,
    }
}

#[derive(Debug, Deserialize)]
struct AnalyzeUrlBody {
    url: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyBody {
    #[serde(alias = "media_data_uri")]
    media_data_uri: Option<String>,
    #[serde(alias = "callback_url")]
    callback_url: Option<String>,
    reference: Option<String>,
}

/// `POST /api/v1/analyze-url` with body `{ "url": "..." }`
pub async fn handle_analyze_url(state: &AppState, body: &[u8]) -> ApiResponse {
    let url = match serde_json::from_slice::<AnalyzeUrlBody>(body) {
        Ok(AnalyzeUrlBody {
            url: Some(Value::String(url)),
        }) if !url.trim().is_empty() => url.trim().to_string(),
        _ => return ApiResponse::error(400, MISSING_URL),
    };

    info!("analyze-url request for {}", url);

    let media = match state.fetcher.fetch_encoded(&url).await {
        Ok(media) => media,
        Err(err) => {
            warn!("Intake failed for {}: {}", url, err);
            return err.into();
        }
    };

    match state.gateway.analyze(AnalysisRequest::new(media)).await {
        Ok(result) => ApiResponse::success(&result, "mediaUrl", Value::String(url)),
        Err(failure) => failure_response(&failure),
    }
}

/// `POST /api/v1/verify` with body `{ "mediaDataUri", "callbackUrl"?, "reference"? }`
///
/// Once the callback URL is accepted, every outcome (including a missing or
/// undecodable data URI) is also POSTed to it.
pub async fn handle_verify(state: &AppState, body: &[u8]) -> ApiResponse {
    let body: VerifyBody = match serde_json::from_slice(body) {
        Ok(body) => body,
        Err(_) => return ApiResponse::error(400, MISSING_DATA_URI),
    };

    if let Some(callback) = &body.callback_url {
        if !is_http_url(callback) {
            return ApiResponse::error(400, "Invalid callback URL format.");
        }
    }

    let VerifyBody {
        media_data_uri,
        callback_url,
        reference,
    } = body;

    let mut response = verify_outcome(
        state,
        media_data_uri.as_deref(),
        callback_url.as_deref(),
        reference.clone(),
    )
    .await;
    if !response.is_success() {
        if let (Some(reference), Some(object)) = (reference, response.body.as_object_mut()) {
            object.insert("reference".to_string(), Value::String(reference));
        }
    }

    if let Some(url) = callback_url {
        state.webhook.dispatch(url, response.body.clone());
    }

    response
}

async fn verify_outcome(
    state: &AppState,
    data_uri: Option<&str>,
    callback_url: Option<&str>,
    reference: Option<String>,
) -> ApiResponse {
    let data_uri = match data_uri.map(str::trim) {
        Some(uri) if !uri.is_empty() => uri,
        _ => return ApiResponse::error(400, MISSING_DATA_URI),
    };

    let media = match EncodedMedia::from_data_uri(data_uri) {
        Ok(media) => media,
        Err(err) => {
            warn!("verify intake failed: {}", err);
            return err.into();
        }
    };

    let mut request = AnalysisRequest::new(media);
    if let Some(callback) = callback_url {
        request = request.with_callback_url(callback);
    }
    if let Some(reference) = &reference {
        request = request.with_reference(reference.clone());
    }

    let reference_value = reference.map(Value::String).unwrap_or(Value::Null);
    match state.gateway.analyze(request).await {
        Ok(result) => ApiResponse::success(&result, "reference", reference_value),
        Err(failure) => failure_response(&failure),
    }
}

fn failure_response(failure: &AnalysisFailure) -> ApiResponse {
    ApiResponse::error(status_for(Stage::Analysis, failure.kind), failure.message.clone())
}

/// Intake failures
impl From<AnalysisError> for ApiResponse {
    fn from(err: AnalysisError) -> Self {
        ApiResponse::error(status_for(Stage::Intake, err.kind()), err.to_string())
    }
}
