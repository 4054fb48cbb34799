//! Chat-completion provider client.
//!
//! One outbound POST per relay request against an OpenRouter-compatible
//! `/chat/completions` endpoint (OpenAI wire schema: messages array,
//! temperature, max_tokens; reply at `choices[0].message.content`).
//!
//! There is deliberately no retry loop: every failure is terminal for the
//! current request and is normalized into a [`ProviderError`] for the
//! handler to map onto an HTTP response.

use serde_json::Value;
use thiserror::Error;

use crate::config::RelayConfig;

/// Failure categories for the outbound completion call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never completed: connection failure, DNS, timeout.
    #[error("Failed to communicate with provider API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("API returned status code {status}")]
    Api { status: u16, body: String },

    /// The provider answered 200 but the payload is not usable.
    #[error("Invalid response structure from API")]
    Structure(String),
}

/// HTTP client for the chat-completion provider.
///
/// Owns a `reqwest::Client` built once with the configured timeout; the
/// client is cheap to clone and safe to share across requests.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    referer: Option<String>,
}

impl ProviderClient {
    /// Build a client from the relay configuration.
    pub fn new(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            referer: config.referer.clone(),
        })
    }

    /// Build the JSON request body for a completion call.
    pub fn build_request_body(
        &self,
        system_prompt: &str,
        user_message: &str,
        temperature: f64,
    ) -> Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_message},
            ],
            "temperature": temperature,
            "max_tokens": self.max_tokens,
        })
    }

    /// Issue one completion call and extract the reply text.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
        temperature: f64,
    ) -> Result<String, ProviderError> {
        let body = self.build_request_body(system_prompt, user_message, temperature);

        log::debug!(
            "ProviderClient.complete: model={}, temperature={}, endpoint={}",
            self.model,
            temperature,
            self.endpoint,
        );

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key));

        if let Some(ref referer) = self.referer {
            request = request.header("HTTP-Referer", referer);
        }

        let response = request.json(&body).send().await?;
        let status = response.status();

        // Capture the body as text first so provider errors can carry it
        // verbatim even when it is not JSON.
        let response_text = response.text().await?;

        if !status.is_success() {
            log::error!(
                "Provider returned status {}: {}",
                status,
                truncate(&response_text, 500)
            );
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body: response_text,
            });
        }

        let response_json: Value = serde_json::from_str(&response_text).map_err(|e| {
            ProviderError::Structure(format!(
                "Failed to parse provider response: {} - Body: {}",
                e,
                truncate(&response_text, 500)
            ))
        })?;

        extract_reply(&response_json)
    }
}

/// Truncate text for diagnostics without splitting a UTF-8 boundary.
///
/// Provider bodies are arbitrary bytes; slicing at a raw byte index would
/// panic when the cut lands inside a multi-byte character.
pub(crate) fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Pull the reply text out of a decoded completion response.
fn extract_reply(response: &Value) -> Result<String, ProviderError> {
    let choice = response
        .get("choices")
        .and_then(|c| c.get(0))
        .ok_or_else(|| ProviderError::Structure("No choices in provider response".to_string()))?;

    let content = choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| {
            ProviderError::Structure("No message content in provider choice".to_string())
        })?;

    Ok(content.to_string())
}
