//! User-facing features built on the generation client and the site context.

pub mod compose;
pub mod contact;
pub mod insight;

// =============================================================================
// TEST HELPERS
// =============================================================================
