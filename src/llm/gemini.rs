//! Gemini `generateContent` client.
//!
//! The key travels in the `key` query parameter, matching the public REST
//! surface. Non-2xx replies are returned as data, not errors, so the proxy
//! can relay them unchanged.

use std::time::Duration;

use serde_json::Value;

use super::config::LlmConfig;
use super::types::{GenerateContentRequest, LlmError, Upstream, UpstreamReply};

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    /// Build a client for the configured model.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client fails to build.
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self, LlmError> {
        if api_key.trim().is_empty() {
            return Err(LlmError::ConfigParse("empty API key".into()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, endpoint: config.endpoint() })
    }

    /// Endpoint URL without the credential, safe to log.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, prompt: &str) -> Result<UpstreamReply, LlmError> {
        let body = GenerateContentRequest::from_prompt(prompt);
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.without_url().to_string()))?;
        let body = parse_reply_body(&text)?;
        Ok(UpstreamReply { status, body })
    }
}

#[async_trait::async_trait]
impl Upstream for GeminiClient {
    async fn generate_content(&self, prompt: &str) -> Result<UpstreamReply, LlmError> {
        self.send(prompt).await
    }
}

pub(crate) fn parse_reply_body(text: &str) -> Result<Value, LlmError> {
    serde_json::from_str(text).map_err(|e| LlmError::ApiParse(e.to_string()))
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
