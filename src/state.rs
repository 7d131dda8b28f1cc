//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the only thing the proxy needs: an upstream client carrying the
//! server-held credential, or `None` when no credential is configured, in
//! which case the proxy fails closed.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{SERVER_KEY_VAR, SiteConfig};
use crate::llm::{GeminiClient, LlmError, Upstream};

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Option<Arc<dyn Upstream>>,
}

impl AppState {
    #[must_use]
    pub fn new(upstream: Option<Arc<dyn Upstream>>) -> Self {
        Self { upstream }
    }

    /// Build the upstream client from the server credential, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &SiteConfig) -> Result<Self, LlmError> {
        let Some(key) = config.server_api_key.clone() else {
            warn!(var = SERVER_KEY_VAR, "server API key not set; /api/generate will fail closed");
            return Ok(Self::new(None));
        };
        let client = GeminiClient::new(&config.llm, key)?;
        info!(endpoint = client.endpoint(), "upstream client initialized");
        Ok(Self::new(Some(Arc::new(client))))
    }
}
