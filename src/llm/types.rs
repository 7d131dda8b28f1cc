//! LLM types: wire shapes for the `generateContent` API and errors.
//!
//! Only the request side is strongly typed. Responses stay as raw
//! `serde_json::Value` because the proxy relays them verbatim and the
//! client extracts a single field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by upstream generation API operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the upstream API failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The upstream response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// REQUEST
// =============================================================================

/// Body of a `generateContent` call: one user turn with one text part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestPart {
    pub text: String,
}

impl GenerateContentRequest {
    #[must_use]
    pub fn from_prompt(prompt: &str) -> Self {
        Self { contents: vec![RequestContent { parts: vec![RequestPart { text: prompt.to_owned() }] }] }
    }
}

// =============================================================================
// REPLY
// =============================================================================

/// Status and parsed JSON body of an upstream call.
///
/// Status interpretation is left to the caller: the proxy relays any parsed
/// body, the direct transport rejects non-2xx.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

impl UpstreamReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// =============================================================================
// UPSTREAM TRAIT
// =============================================================================

/// Provider-neutral async trait for one-shot content generation. Enables
/// mocking in tests.
#[async_trait::async_trait]
pub trait Upstream: Send + Sync {
    /// Send `prompt` as a single-turn generation request.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request cannot be sent or the response
    /// body is not JSON.
    async fn generate_content(&self, prompt: &str) -> Result<UpstreamReply, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
