//! Generation client: prompt in, display-ready text (or nothing) out.
//!
//! DESIGN
//! ======
//! `GenerationClient::generate` never fails. It assembles the prompt, hands
//! it to the injected `Transport`, extracts and normalizes the first text
//! part, and on any failure applies the startup `FallbackPolicy`. Each call
//! is a single attempt: no retries, no cancellation, no client-side timeout
//! beyond what the HTTP client enforces.
//!
//! Features depend on the `Generate` trait rather than the concrete client
//! so their state machines can be tested with scripted results.

pub mod fallback;
pub mod normalize;
pub mod prompts;
pub mod transport;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{LOCAL_KEY_VAR, SiteConfig};
use crate::llm::{GeminiClient, LlmError};
use transport::{DirectTransport, ProxyTransport, Transport, TransportKind};

// =============================================================================
// ERROR
// =============================================================================

/// Failures inside a generation attempt. Absorbed by [`GenerationClient`].
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("upstream error: {0}")]
    Llm(#[from] LlmError),

    #[error("proxy request failed: {0}")]
    ProxyRequest(String),

    #[error("non-success status {0}")]
    Status(u16),

    #[error("response carried no text")]
    MissingText,
}

// =============================================================================
// PROMPT
// =============================================================================

/// A prompt plus optional system context. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    system_context: Option<String>,
    text: String,
}

impl Prompt {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { system_context: None, text: text.into() }
    }

    #[must_use]
    pub fn with_context(system_context: impl Into<String>, text: impl Into<String>) -> Self {
        Self { system_context: Some(system_context.into()), text: text.into() }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn system_context(&self) -> Option<&str> {
        self.system_context.as_deref()
    }

    /// `{context}\n\n{text}`, or just `text` without a context.
    #[must_use]
    pub fn full_text(&self) -> String {
        match self.system_context.as_deref() {
            Some(ctx) if !ctx.trim().is_empty() => format!("{ctx}\n\n{}", self.text),
            _ => self.text.clone(),
        }
    }
}

// =============================================================================
// FALLBACK POLICY
// =============================================================================

/// What a failed attempt resolves to. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Resolve to `None`; the caller surfaces an error and stays retriable.
    #[default]
    None,
    /// Resolve to deterministic canned text picked from the prompt.
    Canned,
}

impl FallbackPolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Canned => "canned",
        }
    }
}

// =============================================================================
// GENERATE TRAIT
// =============================================================================

/// Infallible text generation as seen by the features.
#[async_trait::async_trait]
pub trait Generate: Send + Sync {
    /// Returns non-empty trimmed text, or `None` when generation failed and
    /// no fallback applies.
    async fn generate(&self, prompt: &Prompt) -> Option<String>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct GenerationClient {
    transport: Arc<dyn Transport>,
    fallback: FallbackPolicy,
}

impl GenerationClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, fallback: FallbackPolicy) -> Self {
        Self { transport, fallback }
    }

    /// Wire the transport chosen at startup.
    ///
    /// # Errors
    ///
    /// Returns an error if a direct transport has no local key or an HTTP
    /// client cannot be built.
    pub fn from_config(config: &SiteConfig) -> Result<Self, GenerateError> {
        let transport: Arc<dyn Transport> = match config.transport {
            TransportKind::Direct => {
                let key = config
                    .local_api_key
                    .clone()
                    .ok_or_else(|| LlmError::MissingApiKey { var: LOCAL_KEY_VAR.to_owned() })?;
                let upstream = GeminiClient::new(&config.llm, key)?;
                Arc::new(DirectTransport::new(Arc::new(upstream)))
            }
            TransportKind::Proxied => Arc::new(ProxyTransport::new(&config.proxy_base_url, config.llm.timeouts)?),
        };
        Ok(Self::new(transport, config.fallback))
    }

    #[must_use]
    pub fn transport_kind(&self) -> TransportKind {
        self.transport.kind()
    }

    #[must_use]
    pub fn fallback_policy(&self) -> FallbackPolicy {
        self.fallback
    }

    /// One attempt, errors surfaced. `generate` wraps this.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] if the transport fails or the reply holds
    /// no usable text.
    pub async fn try_generate(&self, prompt: &Prompt) -> Result<String, GenerateError> {
        let body = self.transport.send(&prompt.full_text()).await?;
        normalize::extract_text(&body)
            .and_then(normalize::normalize)
            .ok_or(GenerateError::MissingText)
    }

    fn apply_fallback(&self, prompt: &Prompt) -> Option<String> {
        match self.fallback {
            FallbackPolicy::None => None,
            FallbackPolicy::Canned => Some(fallback::canned_for(&prompt.full_text()).to_owned()),
        }
    }
}

#[async_trait::async_trait]
impl Generate for GenerationClient {
    async fn generate(&self, prompt: &Prompt) -> Option<String> {
        match self.try_generate(prompt).await {
            Ok(text) => {
                debug!(transport = self.transport.kind().as_str(), len = text.len(), "generate: ok");
                Some(text)
            }
            Err(e) => {
                warn!(
                    transport = self.transport.kind().as_str(),
                    fallback = self.fallback.as_str(),
                    error = %e,
                    "generate: attempt failed"
                );
                self.apply_fallback(prompt)
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
