//! Prompt builders for the two AI-assisted features.

use super::Prompt;

/// The project a card presents. `id` is the card identity used for caching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl ProjectCard {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        }
    }
}

const INSIGHT_CONTEXT: &str = "You are a senior developer reviewing a portfolio.";

/// Ask for a short "Technical Deep Dive" about `card`.
#[must_use]
pub fn insight_prompt(card: &ProjectCard) -> Prompt {
    let text = format!(
        "Write a short, exciting 50-word \"Technical Deep Dive\" for a project named \"{}\".\n\
         The project is described as: \"{}\".\n\
         The tech stack is: {}.\n\
         Focus on WHY this stack was chosen or the engineering value provided.",
        card.title,
        card.description,
        card.tags.join(", ")
    );
    Prompt::with_context(INSIGHT_CONTEXT, text)
}

/// Ask for `draft` to be rewritten for a contact form addressed to `owner`.
#[must_use]
pub fn polish_prompt(owner: &str, draft: &str) -> Prompt {
    Prompt::new(format!(
        "Rewrite the following message to be more professional, polite, and concise.\n\
         It is intended for a developer named {owner} via a contact form.\n\
         Original message: \"{draft}\""
    ))
}
