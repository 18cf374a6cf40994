//! OpenAI-compatible chat completions provider (image media only)

use super::capability::{http_client, rejected, transport_error, AnalysisCapability, CapabilityError};
use crate::config::AnalysisConfig;
use crate::errors::AnalysisResultOf;
use crate::types::{EncodedMedia, MediaCategory};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const SYSTEM_PROMPT: &str =
    "You are a media forensics analyst specialising in deepfake detection. Always respond with valid JSON.";

pub struct OpenAiCapability {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f64,
}

/// Response shape from OpenAI-compatible APIs
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<ChatChoice>>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiCapability {
    pub fn new(config: &AnalysisConfig) -> AnalysisResultOf<Self> {
        Ok(Self {
            client: http_client(config)?,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn request_body(&self, media: &EncodedMedia, instruction: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "response_format": { "type": "json_object" },
            "messages": [
                {
                    "role": "system",
                    "content": SYSTEM_PROMPT
                },
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": instruction },
                        { "type": "image_url", "image_url": { "url": media.to_data_uri() } }
                    ]
                }
            ]
        })
    }
}

#[async_trait]
impl AnalysisCapability for OpenAiCapability {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        media: &EncodedMedia,
        instruction: &str,
    ) -> Result<String, CapabilityError> {
        if media.category() != MediaCategory::Image {
            return Err(CapabilityError::Unsupported(format!(
                "The openai analysis provider only accepts images (received {})",
                media.mime_type()
            )));
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&self.request_body(media, instruction))
            .send()
            .await
            .map_err(|e| transport_error(self.name(), e))?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            CapabilityError::Malformed(format!("Failed to parse response from openai: {}", e))
        })?;

        let text = parsed
            .choices
            .and_then(|choices| choices.into_iter().next())
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| CapabilityError::Malformed("Empty response from openai".to_string()))?;

        debug!("OpenAI reply: {} chars", text.len());
        Ok(text)
    }
}
