//! Insight feature: one lazily generated "deep dive" per project card.
//!
//! DESIGN
//! ======
//! Per card: `Idle -> Pending -> Shown`, then `Shown <-> Hidden` on every
//! later trigger without touching the network. A failed first attempt goes
//! back to `Idle`, raises an error notice, and may be retried. Triggering
//! while `Pending` does nothing.
//!
//! Generated text lives in the injected `InsightCache`; this module keeps
//! only the visibility and busy flags. A card has text iff the cache has
//! its key, so one successful call per card is the most that can happen.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::cache::InsightCache;
use crate::context::SiteContext;
use crate::generate::Generate;
use crate::generate::prompts::{ProjectCard, insight_prompt};

pub const INSIGHT_FAILED_NOTICE: &str = "Couldn't generate an insight right now. Please try again.";

/// What a trigger did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightOutcome {
    /// A request for this card is already in flight.
    Busy,
    /// First successful fetch; the text is now visible.
    Shown(String),
    /// Text was already cached; only visibility changed.
    Toggled { visible: bool },
    /// Generation produced nothing; an error notice was raised.
    Failed,
}

/// Observable per-card state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsightState {
    pub text: Option<String>,
    pub visible: bool,
    pub pending: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct CardFlags {
    visible: bool,
    pending: bool,
}

pub struct InsightFeature {
    generator: Arc<dyn Generate>,
    cache: Arc<dyn InsightCache>,
    ctx: SiteContext,
    flags: Mutex<HashMap<String, CardFlags>>,
}

impl InsightFeature {
    #[must_use]
    pub fn new(generator: Arc<dyn Generate>, cache: Arc<dyn InsightCache>, ctx: SiteContext) -> Self {
        Self { generator, cache, ctx, flags: Mutex::new(HashMap::new()) }
    }

    /// Handle one user trigger on `card`.
    pub async fn trigger(&self, card: &ProjectCard) -> InsightOutcome {
        {
            let mut flags = self.lock();
            let entry = flags.entry(card.id.clone()).or_default();
            if entry.pending {
                return InsightOutcome::Busy;
            }
            if self.cache.has(&card.id) {
                entry.visible = !entry.visible;
                return InsightOutcome::Toggled { visible: entry.visible };
            }
            entry.pending = true;
        }

        let guard = PendingGuard { feature: self, key: &card.id };
        info!(card = %card.id, "insight: requesting");
        let result = self.generator.generate(&insight_prompt(card)).await;

        let Some(text) = result else {
            drop(guard);
            self.ctx.notifier.error(INSIGHT_FAILED_NOTICE);
            return InsightOutcome::Failed;
        };

        // Text lands in the cache before `pending` clears, under the same
        // lock the entry check takes.
        {
            let mut flags = self.lock();
            self.cache.set(&card.id, text.clone());
            let entry = flags.entry(card.id.clone()).or_default();
            entry.visible = true;
            entry.pending = false;
        }
        guard.disarm();
        InsightOutcome::Shown(text)
    }

    #[must_use]
    pub fn state(&self, card_id: &str) -> InsightState {
        let flags = self.lock().get(card_id).copied().unwrap_or_default();
        InsightState { text: self.cache.get(card_id), visible: flags.visible, pending: flags.pending }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CardFlags>> {
        self.flags.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the busy flag even if the trigger future is dropped mid-flight.
struct PendingGuard<'a> {
    feature: &'a InsightFeature,
    key: &'a str,
}

impl PendingGuard<'_> {
    /// The success path already cleared the flag.
    fn disarm(self) {
        std::mem::forget(self);
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if let Some(flags) = self.feature.lock().get_mut(self.key) {
            flags.pending = false;
        }
    }
}

#[cfg(test)]
#[path = "insight_test.rs"]
mod tests;
