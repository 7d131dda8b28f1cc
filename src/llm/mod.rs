//! LLM: upstream adapter for the generative-language API.
//!
//! DESIGN
//! ======
//! One provider, one call shape: a single user turn in, raw JSON out. The
//! `Upstream` trait is the seam the proxy handler and the direct transport
//! both sit on, so either can be tested without the network.

pub mod config;
pub mod gemini;
pub mod types;

pub use config::LlmConfig;
pub use gemini::GeminiClient;
pub use types::{LlmError, Upstream, UpstreamReply};

// =============================================================================
// TEST HELPERS
// =============================================================================
