//! tutor-relay HTTP server binary.
//!
//! Starts an axum HTTP server that relays chat messages to an
//! OpenRouter-compatible chat-completion API.
//!
//! # Environment Variables
//!
//! - `OPENROUTER_API_KEY` — provider credential (required)
//! - `OPENROUTER_BASE_URL` — provider base URL (default: OpenRouter)
//! - `RELAY_MODEL` — model identifier (default: "openai/gpt-4o")
//! - `RELAY_TIMEOUT_SECS` — outbound timeout in seconds (default: 30)
//! - `PORT` — HTTP port (default: 5000)
//! - `RUST_LOG` — Tracing filter (default: "info,tutor_relay=debug")
//!
//! # Usage
//!
//! ```bash
//! OPENROUTER_API_KEY=sk-... cargo run --bin server
//! ```

use tutor_relay::server::{app_router, AppState};
use tutor_relay::RelayConfig;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tutor_relay=debug".into()),
        )
        .init();

    let config = match RelayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let model = config.model.clone();

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let app = app_router(state);

    tracing::info!("tutor-relay starting on {} (model: {})", bind_addr, model);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health — liveness probe");
    tracing::info!("  POST /chat   — relay a chat message");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
