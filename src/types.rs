//! Wire shapes for the relay's HTTP surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound body for `POST /chat`.
///
/// The mode fields stay as raw JSON values so that non-string input (a
/// number, an array, an explicit null) falls back to the default mode
/// instead of failing deserialization — mode problems must never reject a
/// request.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// The user's chat message. Missing is treated as empty and rejected
    /// by validation, not by the decoder.
    #[serde(default)]
    pub message: String,
    /// Raw explanation-mode selector ("normal" or "friendly").
    #[serde(default, rename = "explanationMode")]
    pub explanation_mode: Value,
    /// Raw response-mode selector ("accurate", "normal" or "creative").
    #[serde(default, rename = "responseMode")]
    pub response_mode: Value,
}

/// Echo of the resolved modes in a successful response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeInfo {
    /// Resolved explanation mode.
    pub explanation: String,
    /// Resolved response mode.
    pub response: String,
    /// Sampling temperature derived from the response mode.
    pub temperature: f64,
}

/// Successful outbound body for `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    /// The model's reply text.
    pub response: String,
    pub timestamp: DateTime<Utc>,
    /// The modes the reply was generated under.
    pub modes: ModeInfo,
}

/// Body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_request_decodes_with_all_fields() {
        let req: ChatRequest = serde_json::from_value(json!({
            "message": "Explain photosynthesis",
            "explanationMode": "friendly",
            "responseMode": "creative",
        }))
        .unwrap();
        assert_eq!(req.message, "Explain photosynthesis");
        assert_eq!(req.explanation_mode, json!("friendly"));
        assert_eq!(req.response_mode, json!("creative"));
    }

    #[test]
    fn chat_request_tolerates_missing_fields() {
        let req: ChatRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.message, "");
        assert!(req.explanation_mode.is_null());
        assert!(req.response_mode.is_null());
    }

    #[test]
    fn chat_request_tolerates_non_string_modes() {
        let req: ChatRequest = serde_json::from_value(json!({
            "message": "hi",
            "explanationMode": 7,
            "responseMode": ["creative"],
        }))
        .unwrap();
        assert_eq!(req.explanation_mode, json!(7));
        assert_eq!(req.response_mode, json!(["creative"]));
    }
}
