//! Transports: how a combined prompt reaches the generation API.
//!
//! DESIGN
//! ======
//! `Direct` calls the upstream API with a locally held key. `Proxied` posts
//! the prompt to the same-origin `/api/generate` endpoint, which attaches
//! the server-held key. Which one runs is decided once at startup from
//! `SiteConfig` and injected; nothing here inspects the environment.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::GenerateError;
use crate::llm::Upstream;
use crate::llm::config::LlmTimeouts;

/// Transport selection resolved at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Direct,
    Proxied,
}

impl TransportKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Proxied => "proxied",
        }
    }
}

/// One-shot delivery of a fully assembled prompt. Returns the raw upstream
/// JSON body on a successful status.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send `prompt` and return the upstream JSON body.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] on network failure, non-success status, or
    /// an unparseable body.
    async fn send(&self, prompt: &str) -> Result<Value, GenerateError>;

    fn kind(&self) -> TransportKind;
}

// =============================================================================
// DIRECT
// =============================================================================

/// Calls the upstream API directly with a local credential.
pub struct DirectTransport {
    upstream: Arc<dyn Upstream>,
}

impl DirectTransport {
    #[must_use]
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self { upstream }
    }
}

#[async_trait::async_trait]
impl Transport for DirectTransport {
    async fn send(&self, prompt: &str) -> Result<Value, GenerateError> {
        let reply = self.upstream.generate_content(prompt).await?;
        if !reply.is_success() {
            return Err(GenerateError::Status(reply.status));
        }
        Ok(reply.body)
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Direct
    }
}

// =============================================================================
// PROXIED
// =============================================================================

#[derive(Serialize)]
struct ProxyRequest<'a> {
    prompt: &'a str,
}

/// Posts `{"prompt": ...}` to the first-party proxy.
pub struct ProxyTransport {
    http: reqwest::Client,
    url: String,
}

impl ProxyTransport {
    /// Build a transport aimed at `{base_url}/api/generate`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: &str, timeouts: LlmTimeouts) -> Result<Self, GenerateError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| GenerateError::ProxyRequest(e.to_string()))?;
        Ok(Self { http, url: proxy_url(base_url) })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl Transport for ProxyTransport {
    async fn send(&self, prompt: &str) -> Result<Value, GenerateError> {
        let response = self
            .http
            .post(&self.url)
            .json(&ProxyRequest { prompt })
            .send()
            .await
            .map_err(|e| GenerateError::ProxyRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::Status(status.as_u16()));
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| GenerateError::ProxyRequest(e.to_string()))
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Proxied
    }
}

pub(crate) fn proxy_url(base_url: &str) -> String {
    format!("{}/api/generate", base_url.trim_end_matches('/'))
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
