//! Dark/light theme flag shared by every view.
//!
//! Presentation-only state; nothing in the generation pipeline reads it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug)]
pub struct Theme {
    dark: Arc<AtomicBool>,
}

impl Theme {
    #[must_use]
    pub fn new(dark: bool) -> Self {
        Self { dark: Arc::new(AtomicBool::new(dark)) }
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.dark.load(Ordering::Relaxed)
    }

    pub fn set(&self, dark: bool) {
        self.dark.store(dark, Ordering::Relaxed);
    }

    /// Flip the theme and return the new value.
    pub fn toggle(&self) -> bool {
        !self.dark.fetch_xor(true, Ordering::Relaxed)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        if self.is_dark() { "dark" } else { "light" }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_dark() {
        assert!(Theme::default().is_dark());
        assert_eq!(Theme::default().as_str(), "dark");
    }

    #[test]
    fn toggle_returns_new_value_and_is_shared() {
        let theme = Theme::default();
        let other = theme.clone();
        assert!(!theme.toggle());
        assert!(!other.is_dark());
        assert!(other.toggle());
        assert!(theme.is_dark());
    }

    #[test]
    fn set_overrides() {
        let theme = Theme::new(true);
        theme.set(false);
        assert_eq!(theme.as_str(), "light");
    }
}
