//! Canned fallback text, chosen by looking at what the prompt asked for.

/// Marker the insight prompt always carries.
pub const INSIGHT_MARKER: &str = "technical deep dive";

const REWRITE_MARKERS: &[&str] = &["rewrite", "polite"];

pub const INSIGHT_FALLBACK: &str = "This project pairs a component-driven frontend with a thin, \
stateless API layer, so each piece can be scaled and deployed on its own. The stack was chosen \
for fast iteration and strong typing end to end, keeping the data flow predictable and the \
codebase easy to extend as requirements grow.";

pub const REWRITE_FALLBACK: &str = "Hello, I came across your portfolio and would love to talk \
about a potential project. Please let me know a good time to connect. Thank you!";

pub const UNAVAILABLE_FALLBACK: &str = "The AI service is currently unavailable. Please try again later.";

/// Which canned text a prompt maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    Insight,
    Rewrite,
    Unavailable,
}

impl FallbackKind {
    #[must_use]
    pub fn for_prompt(prompt: &str) -> Self {
        let lower = prompt.to_lowercase();
        if lower.contains(INSIGHT_MARKER) {
            Self::Insight
        } else if REWRITE_MARKERS.iter().any(|m| lower.contains(m)) {
            Self::Rewrite
        } else {
            Self::Unavailable
        }
    }

    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::Insight => INSIGHT_FALLBACK,
            Self::Rewrite => REWRITE_FALLBACK,
            Self::Unavailable => UNAVAILABLE_FALLBACK,
        }
    }
}

/// Deterministic canned text for `prompt`.
#[must_use]
pub fn canned_for(prompt: &str) -> &'static str {
    FallbackKind::for_prompt(prompt).text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insight_marker_wins_over_rewrite_words() {
        let prompt = "Write a polite \"Technical Deep Dive\" for this project";
        assert_eq!(FallbackKind::for_prompt(prompt), FallbackKind::Insight);
    }

    #[test]
    fn rewrite_prompts_get_polite_reply() {
        assert_eq!(canned_for("Rewrite the following message"), REWRITE_FALLBACK);
        assert_eq!(canned_for("make this more POLITE"), REWRITE_FALLBACK);
    }

    #[test]
    fn anything_else_is_unavailable() {
        assert_eq!(canned_for("tell me a joke"), UNAVAILABLE_FALLBACK);
        assert_eq!(canned_for(""), UNAVAILABLE_FALLBACK);
    }

    #[test]
    fn canned_texts_are_trimmed_and_non_empty() {
        for kind in [FallbackKind::Insight, FallbackKind::Rewrite, FallbackKind::Unavailable] {
            let text = kind.text();
            assert!(!text.is_empty());
            assert_eq!(text, text.trim());
        }
    }
}
