//! # tutor-relay
//!
//! A stateless HTTP relay for a student tutoring frontend. Each request
//! carries a chat message plus two mode selectors; the relay builds a
//! system prompt from fixed templates, forwards the combined prompt to an
//! OpenRouter-compatible chat-completion API, and returns the model's
//! reply in a uniform envelope.
//!
//! There is no conversation history, no streaming, and no caching — every
//! value lives and dies within a single request/response cycle.

pub mod config;
pub mod error;
pub mod prompt;
pub mod provider;
pub mod server;
pub mod types;

pub use config::RelayConfig;
pub use error::RelayError;
pub use prompt::{build_system_prompt, ExplanationMode, ResponseMode};
pub use provider::{ProviderClient, ProviderError};
pub use server::{app_router, AppState};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
