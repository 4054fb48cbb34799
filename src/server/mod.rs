//! HTTP server for the tutoring relay.
//!
//! # Endpoints
//!
//! - `GET  /health` — liveness probe
//! - `POST /chat`   — build prompt, call provider, relay the reply

pub mod routes;

pub use routes::{app_router, AppState};
