//! System prompt construction for the tutoring relay.
//!
//! The two mode selectors arrive as untrusted free-form JSON from a browser
//! client. Resolution is total: any value that is not a recognized member
//! of the allowed set silently falls back to the default, logging a
//! warning, so prompt construction can never fail on bad input.

use serde_json::Value;

// ---------------------------------------------------------------------------
// Prompt clause table
// ---------------------------------------------------------------------------

const BASE_CLAUSE: &str = "You are a helpful AI tutor designed specifically for students. ";

const EXPLANATION_FRIENDLY: &str = "Explain concepts in simple terms that a 10 year old child \
     can understand. Use analogies and examples from everyday life. ";

const EXPLANATION_NORMAL: &str =
    "Provide clear, well-structured explanations suitable for students. ";

const RESPONSE_CREATIVE: &str = "Be creative and imaginative in your responses, exploring \
     different possibilities and perspectives. ";

const RESPONSE_ACCURATE: &str = "Focus on accuracy and precision, providing factual and \
     well-researched information. ";

const RESPONSE_NORMAL: &str = "Maintain a balance between accuracy and creativity, providing \
     informative yet engaging responses. ";

const CLOSING_CLAUSE: &str =
    "Break down complex topics into digestible parts and encourage critical thinking.";

// ---------------------------------------------------------------------------
// Mode selectors
// ---------------------------------------------------------------------------

/// Pedagogical tone selector for the system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExplanationMode {
    #[default]
    Normal,
    Friendly,
}

impl ExplanationMode {
    const ALLOWED: &'static [&'static str] = &["normal", "friendly"];

    /// Resolve an untrusted JSON value into a mode, falling back to
    /// [`ExplanationMode::Normal`] on anything unrecognized.
    pub fn resolve(raw: &Value) -> Self {
        match validate(raw, Self::ALLOWED, "normal") {
            "friendly" => Self::Friendly,
            _ => Self::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Friendly => "friendly",
        }
    }
}

/// Selector controlling both a prompt clause and the sampling temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    Accurate,
    #[default]
    Normal,
    Creative,
}

impl ResponseMode {
    const ALLOWED: &'static [&'static str] = &["accurate", "normal", "creative"];

    /// Resolve an untrusted JSON value into a mode, falling back to
    /// [`ResponseMode::Normal`] on anything unrecognized.
    pub fn resolve(raw: &Value) -> Self {
        match validate(raw, Self::ALLOWED, "normal") {
            "accurate" => Self::Accurate,
            "creative" => Self::Creative,
            _ => Self::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accurate => "accurate",
            Self::Normal => "normal",
            Self::Creative => "creative",
        }
    }

    /// Sampling temperature for this mode.
    pub fn temperature(&self) -> f64 {
        temperature_for(self.as_str())
    }
}

/// Temperature table keyed by response mode name.
///
/// Case-insensitive; unknown keys yield the balanced default of 0.7. The
/// enum path cannot produce an unknown key, but the lookup stays defensive
/// for callers holding raw strings.
pub fn temperature_for(response_mode: &str) -> f64 {
    let temp = match response_mode.trim().to_lowercase().as_str() {
        "accurate" => 0.2,
        "creative" => 1.2,
        "normal" => 0.7,
        _ => 0.7,
    };
    log::debug!("Temperature for mode {response_mode}: {temp}");
    temp
}

/// Validate an untrusted mode value against an allowed set.
///
/// Total over all JSON values: non-strings, empty strings, and unknown
/// names all resolve to `default`. The returned slice is always a member
/// of `allowed` or `default` itself.
fn validate<'a>(raw: &Value, allowed: &[&'a str], default: &'a str) -> &'a str {
    let Some(s) = raw.as_str() else {
        if !raw.is_null() {
            log::warn!("Invalid mode type: {raw}, using default: {default}");
        }
        return default;
    };

    let normalized = s.trim().to_lowercase();
    if normalized.is_empty() {
        log::warn!("Empty mode provided, using default: {default}");
        return default;
    }

    match allowed.iter().copied().find(|m| *m == normalized) {
        Some(m) => m,
        None => {
            log::warn!("Invalid mode: {normalized}, using default: {default}");
            default
        }
    }
}

// ---------------------------------------------------------------------------
// Prompt builder
// ---------------------------------------------------------------------------

/// Build the system prompt for the given modes.
///
/// Pure and deterministic: a fixed base clause, one explanation clause, one
/// response clause, and a fixed closing clause, concatenated in that exact
/// order. Identical inputs always produce byte-identical output.
pub fn build_system_prompt(explanation: ExplanationMode, response: ResponseMode) -> String {
    let mut prompt = String::from(BASE_CLAUSE);

    prompt.push_str(match explanation {
        ExplanationMode::Friendly => EXPLANATION_FRIENDLY,
        ExplanationMode::Normal => EXPLANATION_NORMAL,
    });

    prompt.push_str(match response {
        ResponseMode::Creative => RESPONSE_CREATIVE,
        ResponseMode::Accurate => RESPONSE_ACCURATE,
        ResponseMode::Normal => RESPONSE_NORMAL,
    });

    prompt.push_str(CLOSING_CLAUSE);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_accepts_valid_modes() {
        assert_eq!(
            ExplanationMode::resolve(&json!("friendly")),
            ExplanationMode::Friendly
        );
        assert_eq!(
            ResponseMode::resolve(&json!("accurate")),
            ResponseMode::Accurate
        );
        assert_eq!(
            ResponseMode::resolve(&json!("creative")),
            ResponseMode::Creative
        );
    }

    #[test]
    fn resolve_normalizes_case_and_whitespace() {
        assert_eq!(
            ExplanationMode::resolve(&json!("  FRIENDLY  ")),
            ExplanationMode::Friendly
        );
        assert_eq!(
            ResponseMode::resolve(&json!("Creative")),
            ResponseMode::Creative
        );
    }

    #[test]
    fn resolve_is_total_over_arbitrary_json() {
        for raw in [
            json!(null),
            json!(42),
            json!(1.5),
            json!(true),
            json!(""),
            json!("   "),
            json!("bogus"),
            json!(["friendly"]),
            json!({"mode": "friendly"}),
        ] {
            assert_eq!(ExplanationMode::resolve(&raw), ExplanationMode::Normal);
            assert_eq!(ResponseMode::resolve(&raw), ResponseMode::Normal);
        }
    }

    #[test]
    fn temperature_table() {
        assert_eq!(temperature_for("accurate"), 0.2);
        assert_eq!(temperature_for("NORMAL"), 0.7);
        assert_eq!(temperature_for("Creative"), 1.2);
        assert_eq!(temperature_for("bogus"), 0.7);
        assert_eq!(ResponseMode::Creative.temperature(), 1.2);
    }

    #[test]
    fn prompt_contains_selected_clauses() {
        let prompt =
            build_system_prompt(ExplanationMode::Friendly, ResponseMode::Creative);
        assert!(prompt.starts_with("You are a helpful AI tutor"));
        assert!(prompt.contains("10 year old child"));
        assert!(prompt.contains("creative and imaginative"));
        assert!(prompt.ends_with("encourage critical thinking."));
    }

    #[test]
    fn accurate_clause_selected_for_accurate_mode() {
        let prompt =
            build_system_prompt(ExplanationMode::Normal, ResponseMode::Accurate);
        assert!(prompt.contains("accuracy and precision"));
        assert!(prompt.contains("well-structured explanations"));
    }

    #[test]
    fn unknown_explanation_mode_matches_normal() {
        let via_bogus = build_system_prompt(
            ExplanationMode::resolve(&json!("enthusiastic")),
            ResponseMode::Normal,
        );
        let via_normal =
            build_system_prompt(ExplanationMode::Normal, ResponseMode::Normal);
        assert_eq!(via_bogus, via_normal);
    }

    #[test]
    fn prompt_is_deterministic() {
        let a = build_system_prompt(ExplanationMode::Friendly, ResponseMode::Accurate);
        let b = build_system_prompt(ExplanationMode::Friendly, ResponseMode::Accurate);
        assert_eq!(a, b);
    }
}
