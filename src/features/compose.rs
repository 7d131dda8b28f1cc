//! Compose-assist: rewrite the contact-form draft in place.
//!
//! Not cached: every trigger sends the current draft. An empty draft is
//! rejected before any request. The draft is only ever replaced wholesale,
//! and only by a successful result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::context::SiteContext;
use crate::generate::Generate;
use crate::generate::prompts::polish_prompt;

pub const EMPTY_DRAFT_NOTICE: &str = "Write a message first, then polish it.";
pub const POLISH_FAILED_NOTICE: &str = "Couldn't polish your message right now. Please try again.";
pub const POLISHED_NOTICE: &str = "Message polished.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeOutcome {
    /// Draft was empty or whitespace; nothing sent.
    Rejected,
    /// A rewrite is already in flight.
    Busy,
    /// The draft now holds this text.
    Replaced(String),
    /// Generation produced nothing; the draft is unchanged.
    Failed,
}

pub struct ComposeAssist {
    generator: Arc<dyn Generate>,
    ctx: SiteContext,
    owner: String,
    draft: Mutex<String>,
    pending: AtomicBool,
}

impl ComposeAssist {
    #[must_use]
    pub fn new(generator: Arc<dyn Generate>, ctx: SiteContext, owner: impl Into<String>) -> Self {
        Self {
            generator,
            ctx,
            owner: owner.into(),
            draft: Mutex::new(String::new()),
            pending: AtomicBool::new(false),
        }
    }

    /// Direct user input.
    pub fn set_draft(&self, text: impl Into<String>) {
        *self.lock() = text.into();
    }

    #[must_use]
    pub fn draft(&self) -> String {
        self.lock().clone()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Whether the trigger should be enabled.
    #[must_use]
    pub fn can_polish(&self) -> bool {
        !self.is_pending() && !self.lock().trim().is_empty()
    }

    /// Rewrite the current draft.
    pub async fn polish(&self) -> ComposeOutcome {
        let draft = self.draft();
        if draft.trim().is_empty() {
            self.ctx.notifier.error(EMPTY_DRAFT_NOTICE);
            return ComposeOutcome::Rejected;
        }
        if self.pending.swap(true, Ordering::SeqCst) {
            return ComposeOutcome::Busy;
        }

        let guard = PendingGuard(&self.pending);
        info!(len = draft.len(), "compose: polishing draft");
        let result = self.generator.generate(&polish_prompt(&self.owner, &draft)).await;
        drop(guard);

        if let Some(text) = result {
            self.set_draft(text.clone());
            self.ctx.notifier.success(POLISHED_NOTICE);
            ComposeOutcome::Replaced(text)
        } else {
            self.ctx.notifier.error(POLISH_FAILED_NOTICE);
            ComposeOutcome::Failed
        }
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "compose_test.rs"]
mod tests;
