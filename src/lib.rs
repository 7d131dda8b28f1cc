//! folio: portfolio site backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two halves share this crate. The server half is a stateless proxy that
//! injects a server-held credential into calls to the hosted generation API.
//! The client half is the generation pipeline the page drives: prompt
//! assembly, transport selection, reply normalization and fallback, plus the
//! features built on it (project insights, message polishing, the contact
//! form) and the notices they raise.

pub mod cache;
pub mod config;
pub mod context;
pub mod features;
pub mod generate;
pub mod llm;
pub mod notify;
pub mod routes;
pub mod state;
pub mod theme;
