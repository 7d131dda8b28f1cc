//! Site configuration, read once at startup.
//!
//! DESIGN
//! ======
//! Everything environment-dependent is resolved here, including which
//! transport the generation client uses, and then passed down explicitly.
//! Parsing goes through a lookup closure so tests never touch the process
//! environment.

use std::time::Duration;

use crate::generate::FallbackPolicy;
use crate::generate::transport::TransportKind;
use crate::llm::config::LlmConfig;
use crate::notify::DEFAULT_NOTICE_TTL;

pub const DEFAULT_PROXY_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_SITE_OWNER: &str = "Abdala";
pub const DEFAULT_PORT: u16 = 3000;

pub const SERVER_KEY_VAR: &str = "GEMINI_API_KEY";
pub const LOCAL_KEY_VAR: &str = "GEMINI_LOCAL_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown GENERATE_TRANSPORT: {0} (expected 'direct' or 'proxied')")]
    UnknownTransport(String),
    #[error("unknown GENERATE_FALLBACK: {0} (expected 'canned' or 'none')")]
    UnknownFallback(String),
    #[error("GENERATE_TRANSPORT=direct requires GEMINI_LOCAL_API_KEY")]
    DirectWithoutKey,
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
}

#[derive(Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub llm: LlmConfig,
    /// Server-held credential. `None` makes the proxy fail closed.
    pub server_api_key: Option<String>,
    /// Local-development credential for direct calls.
    pub local_api_key: Option<String>,
    pub transport: TransportKind,
    pub fallback: FallbackPolicy,
    pub proxy_base_url: String,
    pub form_endpoint: Option<String>,
    pub notice_ttl: Duration,
    pub site_owner: String,
    pub port: u16,
}

impl std::fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteConfig")
            .field("llm", &self.llm)
            .field("server_api_key", &self.server_api_key.as_ref().map(|_| "<redacted>"))
            .field("local_api_key", &self.local_api_key.as_ref().map(|_| "<redacted>"))
            .field("transport", &self.transport)
            .field("fallback", &self.fallback)
            .field("proxy_base_url", &self.proxy_base_url)
            .field("form_endpoint", &self.form_endpoint)
            .field("notice_ttl", &self.notice_ttl)
            .field("site_owner", &self.site_owner)
            .field("port", &self.port)
            .finish()
    }
}

impl SiteConfig {
    /// Build from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for unknown enum values, an invalid port,
    /// or a direct transport without a local key.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`SiteConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let server_api_key = get(SERVER_KEY_VAR);
        let local_api_key = get(LOCAL_KEY_VAR);
        let transport = parse_transport(get("GENERATE_TRANSPORT").as_deref(), local_api_key.is_some())?;
        let fallback = parse_fallback(get("GENERATE_FALLBACK").as_deref())?;
        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let notice_ttl = get("NOTICE_TTL_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .map_or(DEFAULT_NOTICE_TTL, Duration::from_millis);

        let llm = LlmConfig::from_lookup(&lookup);

        Ok(Self {
            llm,
            server_api_key,
            local_api_key,
            transport,
            fallback,
            proxy_base_url: get("PROXY_BASE_URL").unwrap_or_else(|| DEFAULT_PROXY_BASE_URL.to_owned()),
            form_endpoint: get("FORM_ENDPOINT"),
            notice_ttl,
            site_owner: get("SITE_OWNER").unwrap_or_else(|| DEFAULT_SITE_OWNER.to_owned()),
            port,
        })
    }
}

fn parse_transport(raw: Option<&str>, has_local_key: bool) -> Result<TransportKind, ConfigError> {
    match raw {
        None if has_local_key => Ok(TransportKind::Direct),
        None => Ok(TransportKind::Proxied),
        Some("direct") if has_local_key => Ok(TransportKind::Direct),
        Some("direct") => Err(ConfigError::DirectWithoutKey),
        Some("proxied") => Ok(TransportKind::Proxied),
        Some(other) => Err(ConfigError::UnknownTransport(other.to_owned())),
    }
}

fn parse_fallback(raw: Option<&str>) -> Result<FallbackPolicy, ConfigError> {
    match raw.unwrap_or("none") {
        "none" => Ok(FallbackPolicy::None),
        "canned" => Ok(FallbackPolicy::Canned),
        other => Err(ConfigError::UnknownFallback(other.to_owned())),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
