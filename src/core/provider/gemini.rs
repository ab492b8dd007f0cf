//! Gemini provider (API key-based).
//!
//! Uses Google's Generative Language API with the `google_search` tool
//! enabled on every request, so replies arrive with grounding metadata.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{Citation, GroundedProvider, GroundedReply, ProviderError, Result};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default Gemini model, overridable via config.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub struct GeminiClient {
    /// `None` when no credential was present at startup; every call then
    /// fails with `NotConfigured` so callers can apply their own policy.
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        // Trim the key at construction to match the format validation.
        Self {
            api_key: api_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        }
    }

    pub fn flash(api_key: Option<String>) -> Self {
        Self::new(api_key, DEFAULT_MODEL)
    }

    /// Point the client at a different API root (used by HTTP-level tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Check if an API key has valid Google API key format.
    ///
    /// Google API keys start with "AIza". This is a pure format check and
    /// does not verify the key against the API.
    pub fn is_valid_api_key_format(key: &str) -> bool {
        let trimmed = key.trim();
        !trimmed.is_empty() && trimmed.starts_with("AIza")
    }

    fn request_body(prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "tools": [{ "google_search": {} }]
        })
    }

    /// Concatenated text parts of the first candidate.
    fn extract_text(json: &serde_json::Value) -> Option<String> {
        let parts = json["candidates"]
            .as_array()?
            .first()?["content"]["parts"]
            .as_array()?;

        let text: String = parts
            .iter()
            .filter_map(|p| p["text"].as_str())
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Grounding chunks of the first candidate, with whatever web fields
    /// each carries. Incomplete entries are kept; filtering happens later.
    fn extract_citations(json: &serde_json::Value) -> Vec<Citation> {
        json["candidates"]
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|c| c["groundingMetadata"]["groundingChunks"].as_array())
            .map(|chunks| {
                chunks
                    .iter()
                    .map(|chunk| Citation {
                        uri: chunk["web"]["uri"].as_str().map(str::to_string),
                        title: chunk["web"]["title"].as_str().map(str::to_string),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl GroundedProvider for GeminiClient {
    fn id(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedReply> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::NotConfigured(
                "no API key in environment".to_string(),
            ));
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let start = std::time::Instant::now();
        let resp = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", api_key)
            .json(&Self::request_body(prompt))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let json: serde_json::Value = resp.json().await?;

        let text = Self::extract_text(&json)
            .ok_or_else(|| ProviderError::InvalidResponse("Missing content".to_string()))?;
        let citations = Self::extract_citations(&json);

        log::debug!(
            "gemini reply: {} chars, {} citations, {}ms",
            text.len(),
            citations.len(),
            start.elapsed().as_millis()
        );

        Ok(GroundedReply { text, citations })
    }
}
