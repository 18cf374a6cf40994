//! Gemini `generateContent` provider (inline media, JSON response mode)

use super::capability::{http_client, rejected, transport_error, AnalysisCapability, CapabilityError};
use crate::config::AnalysisConfig;
use crate::errors::AnalysisResultOf;
use crate::types::EncodedMedia;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

pub struct GeminiCapability {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiCapability {
    pub fn new(config: &AnalysisConfig) -> AnalysisResultOf<Self> {
        Ok(Self {
            client: http_client(config)?,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn request_body(&self, media: &EncodedMedia, instruction: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "text": instruction },
                    {
                        "inline_data": {
                            "mime_type": media.mime_type(),
                            "data": media.base64_payload()
                        }
                    }
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "temperature": self.temperature,
                "maxOutputTokens": self.max_tokens
            }
        })
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: GenerateContentResponse) -> Result<String, CapabilityError> {
    let text: String = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(CapabilityError::Malformed(
            "Empty response from gemini".to_string(),
        ));
    }
    Ok(text)
}

#[async_trait]
impl AnalysisCapability for GeminiCapability {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(
        &self,
        media: &EncodedMedia,
        instruction: &str,
    ) -> Result<String, CapabilityError> {
        let url = format!("{}/{}:generateContent", self.endpoint, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(media, instruction))
            .send()
            .await
            .map_err(|e| transport_error(self.name(), e))?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            CapabilityError::Malformed(format!("Failed to parse response from gemini: {}", e))
        })?;

        let text = extract_text(parsed)?;
        debug!("Gemini reply: {} chars", text.len());
        Ok(text)
    }
}
