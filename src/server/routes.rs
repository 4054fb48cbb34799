//! Axum route handlers for the relay.
//!
//! # Routes
//!
//! - `GET  /health` — Returns `{"status": "healthy", "timestamp": ...}`
//! - `POST /chat`   — Accepts a `ChatRequest`, relays to the provider
//!
//! The chat handler walks one fixed pipeline per request: validate the
//! message, resolve the modes, build the system prompt, make a single
//! provider call, and map the outcome onto exactly one outbound response.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::prompt::{build_system_prompt, ExplanationMode, ResponseMode};
use crate::provider::{truncate, ProviderClient};
use crate::types::{ChatRequest, ChatResponse, HealthResponse, ModeInfo};

/// Shared application state for the HTTP server.
///
/// Both fields are immutable after startup; requests only read them.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub provider: Arc<ProviderClient>,
}

impl AppState {
    /// Build state from a resolved configuration.
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let provider = ProviderClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            provider: Arc::new(provider),
        })
    }
}

/// Build the axum router with all routes.
///
/// CORS is fully permissive: the caller is a browser client served from a
/// different origin/port during development.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health — liveness probe.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    })
}

/// POST /chat — relay one chat message to the provider.
///
/// Pipeline: validate message → resolve modes → build prompt → one
/// provider call → map result. Every path ends in exactly one response;
/// mode-selector problems never reject the request.
async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, RelayError> {
    let message = request.message.trim();
    tracing::info!(
        message_preview = %truncate(message, 50),
        "Received chat request"
    );

    if message.is_empty() {
        tracing::warn!("Rejected chat request with empty message");
        return Err(RelayError::EmptyMessage);
    }

    let explanation = ExplanationMode::resolve(&request.explanation_mode);
    let response_mode = ResponseMode::resolve(&request.response_mode);
    let temperature = response_mode.temperature();

    let system_prompt = build_system_prompt(explanation, response_mode);
    tracing::info!(
        explanation = explanation.as_str(),
        response = response_mode.as_str(),
        temperature,
        "Prompt built, calling provider"
    );

    let reply = state
        .provider
        .complete(&system_prompt, message, temperature)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Provider call failed");
            RelayError::from(e)
        })?;

    tracing::info!("Successfully processed chat request");
    Ok(Json(ChatResponse {
        success: true,
        response: reply,
        timestamp: Utc::now(),
        modes: ModeInfo {
            explanation: explanation.as_str().to_string(),
            response: response_mode.as_str().to_string(),
            temperature,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_app(base_url: &str) -> Router {
        let config = RelayConfig::new("sk-test", base_url);
        app_router(AppState::new(config).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app("http://127.0.0.1:1");

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_chat_rejects_whitespace_message() {
        // Unroutable base URL: a 400 here proves no outbound call happened.
        let app = test_app("http://127.0.0.1:1");

        let request = Request::builder()
            .method("POST")
            .uri("/chat")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"message": "  "}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Message cannot be empty");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_chat_rejects_missing_message() {
        let app = test_app("http://127.0.0.1:1");

        let request = Request::builder()
            .method("POST")
            .uri("/chat")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"explanationMode": "friendly"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
