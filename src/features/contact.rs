//! Contact form submission to a third-party form backend.
//!
//! Validation happens before any request. The outcome reaches the user only
//! as a notice.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use serde::Serialize;
use tracing::{info, warn};

use crate::context::SiteContext;
use crate::llm::config::LlmTimeouts;

pub const SENT_NOTICE: &str = "Message sent! I'll get back to you soon.";
pub const SEND_FAILED_NOTICE: &str = "Something went wrong sending your message. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("{0} is required")]
    EmptyField(&'static str),
    #[error("email address looks invalid")]
    InvalidEmail,
    #[error("form endpoint not configured")]
    NotConfigured,
    #[error("form request failed: {0}")]
    Request(String),
    #[error("form backend returned status {0}")]
    Status(u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    /// Trimmed copy, or the first validation failure.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::EmptyField`] or [`ContactError::InvalidEmail`].
    pub fn validated(&self) -> Result<Self, ContactError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();
        if name.is_empty() {
            return Err(ContactError::EmptyField("name"));
        }
        if email.is_empty() {
            return Err(ContactError::EmptyField("email"));
        }
        if message.is_empty() {
            return Err(ContactError::EmptyField("message"));
        }
        let valid_email = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'));
        if !valid_email {
            return Err(ContactError::InvalidEmail);
        }
        Ok(Self { name: name.to_owned(), email: email.to_owned(), message: message.to_owned() })
    }
}

// =============================================================================
// BACKEND
// =============================================================================

#[async_trait::async_trait]
pub trait FormBackend: Send + Sync {
    /// Deliver one validated submission.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError`] on transport failure or non-success status.
    async fn submit(&self, submission: &ContactSubmission) -> Result<(), ContactError>;
}

/// Posts JSON to a hosted form endpoint.
pub struct HttpFormBackend {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpFormBackend {
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(endpoint: impl Into<String>, timeouts: LlmTimeouts) -> Result<Self, ContactError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ContactError::Request(e.to_string()))?;
        Ok(Self { http, endpoint: endpoint.into() })
    }
}

#[async_trait::async_trait]
impl FormBackend for HttpFormBackend {
    async fn submit(&self, submission: &ContactSubmission) -> Result<(), ContactError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(submission)
            .send()
            .await
            .map_err(|e| ContactError::Request(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContactError::Status(status.as_u16()));
        }
        Ok(())
    }
}

// =============================================================================
// FORM
// =============================================================================

pub struct ContactForm {
    backend: Option<Arc<dyn FormBackend>>,
    ctx: SiteContext,
}

impl ContactForm {
    #[must_use]
    pub fn new(backend: Option<Arc<dyn FormBackend>>, ctx: SiteContext) -> Self {
        Self { backend, ctx }
    }

    /// Validate and send. Raises exactly one notice either way.
    ///
    /// # Errors
    ///
    /// Returns the failure that the notice reported.
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<(), ContactError> {
        let result = self.try_submit(submission).await;
        match &result {
            Ok(()) => {
                info!("contact: submission delivered");
                self.ctx.notifier.success(SENT_NOTICE);
            }
            Err(e @ (ContactError::EmptyField(_) | ContactError::InvalidEmail)) => {
                let mut message = e.to_string();
                if let Some(first) = message.get_mut(..1) {
                    first.make_ascii_uppercase();
                }
                self.ctx.notifier.error(format!("{message}."));
            }
            Err(e) => {
                warn!(error = %e, "contact: submission failed");
                self.ctx.notifier.error(SEND_FAILED_NOTICE);
            }
        }
        result
    }

    async fn try_submit(&self, submission: &ContactSubmission) -> Result<(), ContactError> {
        let clean = submission.validated()?;
        let backend = self.backend.as_ref().ok_or(ContactError::NotConfigured)?;
        backend.submit(&clean).await
    }
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;
