//! Gemini `generateContent` client

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::{Value, json};
use shared::{ProcessId, process_debug};

use crate::config::GeneratorConfig;
use crate::error::{CopywriterError, CopywriterResult};
use crate::traits::TextProvider;
use crate::types::{ProviderError, ProviderRequest};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const MISSING_KEY_MESSAGE: &str = "Server missing GEMINI_API_KEY (or VITE_GEMINI_API_KEY). Add it to your .env file.";

/// Gemini REST provider
///
/// The HTTP client is built once and reused across invocations.
pub struct RealGeminiProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl RealGeminiProvider {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> CopywriterResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CopywriterError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &GeneratorConfig) -> CopywriterResult<Self> {
        Self::new(
            config.api_key.clone(),
            config.model.clone(),
            config.base_url.clone(),
            config.request_timeout,
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_body(request: &ProviderRequest) -> Value {
        json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": request.prompt }]
                }
            ],
            "systemInstruction": {
                "parts": [{ "text": request.system_instruction }]
            },
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema
            }
        })
    }
}

#[async_trait]
impl TextProvider for RealGeminiProvider {
    async fn generate(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::new(MISSING_KEY_MESSAGE))?;

        let request_start = Instant::now();

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&Self::build_body(request))
            .send()
            .await
            .map_err(|e| ProviderError::new(format!("Network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status.as_u16(), &body));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::new(format!("Failed to parse provider response: {}", e)))?;

        process_debug!(
            ProcessId::current(),
            "Gemini {} responded in {}ms",
            self.model,
            request_start.elapsed().as_millis()
        );

        extract_text(&response_json)
    }
}

/// Map a non-2xx body of the form `{"error":{"code","message","status"}}`
fn error_from_body(status: u16, body: &str) -> ProviderError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));

    let message = error
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| {
            let snippet: String = body.trim().chars().take(200).collect();
            if snippet.is_empty() {
                format!("Provider returned HTTP {}", status)
            } else {
                format!("Provider returned HTTP {}: {}", status, snippet)
            }
        });

    let mut failure = ProviderError::new(message).with_status(status);
    if let Some(code) = error.and_then(|e| e.get("status")).and_then(|s| s.as_str()) {
        failure = failure.with_code(code);
    }
    failure
}

/// Concatenate the text parts of the first candidate
fn extract_text(response_json: &Value) -> Result<String, ProviderError> {
    let text: Option<String> = response_json
        .get("candidates")
        .and_then(|candidates| candidates.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                .collect()
        });

    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => {
            let reason = response_json
                .get("promptFeedback")
                .and_then(|f| f.get("blockReason"))
                .or_else(|| {
                    response_json
                        .get("candidates")
                        .and_then(|c| c.get(0))
                        .and_then(|c| c.get("finishReason"))
                })
                .and_then(|r| r.as_str());

            Err(match reason {
                Some(reason) => ProviderError::new(format!("No content in provider response ({})", reason)),
                None => ProviderError::new("No content in provider response"),
            })
        }
    }
}
