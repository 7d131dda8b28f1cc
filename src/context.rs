//! Handles passed explicitly into every feature.

use crate::notify::Notifier;
use crate::theme::Theme;

/// The notification sink and theme flag, shared by clone.
#[derive(Clone, Default)]
pub struct SiteContext {
    pub notifier: Notifier,
    pub theme: Theme,
}

impl SiteContext {
    #[must_use]
    pub fn new(notifier: Notifier, theme: Theme) -> Self {
        Self { notifier, theme }
    }
}
