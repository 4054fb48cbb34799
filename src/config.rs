//! Startup configuration for the relay.
//!
//! Everything is read from the environment once at startup and handed to
//! the router state as an explicitly constructed value; nothing here is a
//! process-wide singleton.

use std::time::Duration;

use thiserror::Error;

/// Default OpenRouter API base URL.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model identifier sent with every completion request.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";

/// Default outbound call timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Maximum output tokens requested from the provider.
pub const MAX_TOKENS: u32 = 800;

/// Errors raised while reading configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The provider credential is missing or empty.
    #[error("OPENROUTER_API_KEY is not set. Export it before starting the relay.")]
    MissingApiKey,

    /// An environment variable is present but not parseable.
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },
}

/// Relay configuration, resolved from the environment at startup.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Bearer credential for the provider API.
    pub api_key: String,
    /// Provider API base URL (no trailing slash).
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Timeout applied to the outbound completion call.
    pub timeout: Duration,
    /// Maximum output tokens requested from the provider.
    pub max_tokens: u32,
    /// HTTP listen port for the server binary.
    pub port: u16,
    /// Optional `HTTP-Referer` attribution header for OpenRouter.
    pub referer: Option<String>,
}

impl RelayConfig {
    /// Read configuration from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `OPENROUTER_API_KEY` — provider credential (required)
    /// - `OPENROUTER_BASE_URL` — provider base URL (default OpenRouter)
    /// - `RELAY_MODEL` — model identifier (default "openai/gpt-4o")
    /// - `RELAY_TIMEOUT_SECS` — outbound timeout in seconds (default 30)
    /// - `PORT` — listen port (default 5000)
    /// - `RELAY_HTTP_REFERER` — optional OpenRouter attribution header
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = std::env::var("OPENROUTER_BASE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model =
            std::env::var("RELAY_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let timeout_secs = match std::env::var("RELAY_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: "RELAY_TIMEOUT_SECS".to_string(),
                value: raw,
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: "PORT".to_string(),
                value: raw,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            base_url,
            model,
            timeout: Duration::from_secs(timeout_secs),
            max_tokens: MAX_TOKENS,
            port,
            referer: std::env::var("RELAY_HTTP_REFERER").ok(),
        })
    }

    /// Construct a config directly, for tests and embedding.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_tokens: MAX_TOKENS,
            port: DEFAULT_PORT,
            referer: None,
        }
    }
}
