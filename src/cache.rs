//! Insight cache: one generated blurb per card identity.
//!
//! The "at most one request per card" rule lives in `features::insight`;
//! this module only stores what a successful request produced.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

pub trait InsightCache: Send + Sync {
    fn has(&self, key: &str) -> bool;
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` for `key`. The first write wins; later writes are
    /// ignored and return `false`.
    fn set(&self, key: &str, value: String) -> bool;
}

#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl InsightCache for MemoryCache {
    fn has(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) -> bool {
        let mut entries = self.lock();
        if entries.contains_key(key) {
            return false;
        }
        entries.insert(key.to_owned(), value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cache_has_nothing() {
        let cache = MemoryCache::new();
        assert!(!cache.has("card"));
        assert_eq!(cache.get("card"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn first_write_wins() {
        let cache = MemoryCache::new();
        assert!(cache.set("card", "one".into()));
        assert!(!cache.set("card", "two".into()));
        assert_eq!(cache.get("card").as_deref(), Some("one"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_are_independent() {
        let cache = MemoryCache::new();
        cache.set("a", "alpha".into());
        cache.set("b", "beta".into());
        assert!(cache.has("a"));
        assert_eq!(cache.get("b").as_deref(), Some("beta"));
    }
}
