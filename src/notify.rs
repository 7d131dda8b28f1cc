//! Notification sink: ordered, self-expiring user-facing notices.
//!
//! DESIGN
//! ======
//! `Notifier` is a cloneable handle over one shared `Vec<Notice>`. `notify`
//! appends and spawns a task that sleeps until the notice's deadline, then
//! removes it by id. Append order is display order; identical messages are
//! never merged. The lock is never held across an await.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, SystemTime};

use serde::Serialize;
use tokio::runtime::Handle;
use tokio::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// One timed status message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub id: Uuid,
    pub message: String,
    pub kind: NoticeKind,
    pub created_at: SystemTime,
}

#[derive(Clone)]
pub struct Notifier {
    notices: Arc<Mutex<Vec<Notice>>>,
    ttl: Duration,
}

impl Notifier {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { notices: Arc::new(Mutex::new(Vec::new())), ttl }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Append a notice and schedule its removal after the TTL.
    ///
    /// Outside a tokio runtime nothing can schedule the expiry; the notice
    /// then stays until dismissed.
    pub fn notify(&self, message: impl Into<String>, kind: NoticeKind) -> Notice {
        let notice = Notice { id: Uuid::new_v4(), message: message.into(), kind, created_at: SystemTime::now() };
        debug!(id = %notice.id, kind = kind.as_str(), message = %notice.message, "notice");
        self.lock().push(notice.clone());

        let Ok(runtime) = Handle::try_current() else {
            warn!(id = %notice.id, "notice raised outside a runtime; it will not expire");
            return notice;
        };
        let deadline = Instant::now() + self.ttl;
        let sink = self.clone();
        let id = notice.id;
        runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            sink.remove(id);
        });

        notice
    }

    pub fn success(&self, message: impl Into<String>) -> Notice {
        self.notify(message, NoticeKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> Notice {
        self.notify(message, NoticeKind::Error)
    }

    /// Remove a notice before it expires. Returns whether it was present.
    pub fn dismiss(&self, id: Uuid) -> bool {
        self.remove(id)
    }

    /// Current notices in display order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notice> {
        self.lock().clone()
    }

    fn remove(&self, id: Uuid) -> bool {
        let mut notices = self.lock();
        let before = notices.len();
        notices.retain(|n| n.id != id);
        notices.len() != before
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notice>> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;
