//! Request-level error taxonomy.
//!
//! Every failure on the `/chat` path maps to exactly one variant here, and
//! every variant maps to exactly one timestamped JSON error body. Mode
//! selector problems are not errors — they resolve silently to defaults in
//! [`crate::prompt`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use thiserror::Error;

use crate::provider::ProviderError;

/// Errors surfaced to the caller of `POST /chat`.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The trimmed user message was empty; no outbound call was attempted.
    #[error("Message cannot be empty")]
    EmptyMessage,

    /// Transport failure reaching the provider (connect error, timeout).
    #[error("Failed to communicate with provider API: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("API returned status code {status}")]
    Provider { status: u16, body: String },

    /// The provider answered success but the payload was unusable.
    #[error("Invalid response structure from API")]
    Structure,

    /// Catch-all for any other failure during processing.
    ///
    /// No typed path on the request pipeline produces this today; the
    /// variant pins the wire contract (status and body shape) so that new
    /// failure sources have a category to land in without changing what
    /// clients see.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl RelayError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::EmptyMessage => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProviderError> for RelayError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Transport(e) => Self::Transport(e.to_string()),
            ProviderError::Api { status, body } => Self::Provider { status, body },
            ProviderError::Structure(detail) => {
                log::error!("Provider structure error: {detail}");
                Self::Structure
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({
            "error": self.to_string(),
            "timestamp": Utc::now(),
        });
        if let Self::Provider { body: ref raw, .. } = self {
            body["details"] = serde_json::Value::String(raw.clone());
        }
        (self.status(), Json(body)).into_response()
    }
}
