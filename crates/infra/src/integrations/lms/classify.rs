//! Response classification for the remote LMS
//!
//! The platform is known to emit HTML error/login pages with a 200 status
//! when misconfigured. Treating those as success is the dominant real-world
//! failure mode this module guards against: markup detection runs before
//! any status-code interpretation.

use edulink_domain::{EdulinkError, Result};
use reqwest::StatusCode;
use serde_json::Value;

/// Outcome of inspecting a raw response body and status.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Structured, parseable, successful payload.
    Success(Value),
    /// The upstream answered with a structured error payload.
    StructuredError { code: String, message: String },
    /// The body is not API output: HTML page, truncated or unparsable text.
    Malformed(&'static str),
    /// 401/403: credentials were rejected.
    AuthFailure,
}

impl Classification {
    /// Collapse the classification into the domain error taxonomy, keeping
    /// the parsed payload on success.
    pub fn into_result(self) -> Result<Value> {
        match self {
            Self::Success(value) => Ok(value),
            Self::StructuredError { code, message } => {
                Err(EdulinkError::Upstream(format!("{code}: {message}")))
            }
            Self::Malformed(reason) => Err(EdulinkError::MalformedResponse(reason.to_string())),
            Self::AuthFailure => {
                Err(EdulinkError::Auth("credentials rejected by the LMS".to_string()))
            }
        }
    }
}

/// Classify a raw response. Rules apply in order:
///
/// 1. Empty or whitespace-only body is an empty-but-valid result; the
///    upstream returns empty 200 bodies for no-op operations.
/// 2. Recognizable markup means the platform served a web page instead of
///    API output, regardless of status code.
/// 3. 401/403 is an authentication failure.
/// 4. A body that fails to parse as JSON is malformed.
/// 5. Anything else parses: success for 2xx, structured error otherwise.
pub fn classify(body: &str, status: StatusCode) -> Classification {
    let trimmed = body.trim();

    if trimmed.is_empty() {
        return Classification::Success(Value::Object(serde_json::Map::new()));
    }

    if looks_like_html(trimmed) {
        return Classification::Malformed("html-response");
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Classification::AuthFailure;
    }

    let parsed: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(_) => return Classification::Malformed("invalid-json"),
    };

    if status.is_success() {
        Classification::Success(parsed)
    } else {
        let (code, message) = extract_error(&parsed, status);
        Classification::StructuredError { code, message }
    }
}

/// Markup fragments that identify a served web page. Only the first ~512
/// bytes are probed; the window is shrunk to the nearest char boundary so
/// multi-byte text straddling the cutoff cannot split a character.
fn looks_like_html(body: &str) -> bool {
    let mut window = body.len().min(512);
    while !body.is_char_boundary(window) {
        window -= 1;
    }
    let lowered = body[..window].to_lowercase();
    ["<!doctype", "<html", "<head", "<body"].iter().any(|marker| lowered.contains(marker))
}

/// Pull a code/message pair out of the known upstream error envelopes:
/// `{"error": {"code", "message"}}`, `{"error": "..."}` or `{"message": "..."}`.
fn extract_error(parsed: &Value, status: StatusCode) -> (String, String) {
    let fallback_code = status.as_u16().to_string();

    match parsed.get("error") {
        Some(Value::Object(inner)) => {
            let code = inner
                .get("code")
                .map(value_to_string)
                .unwrap_or_else(|| fallback_code.clone());
            let message = inner
                .get("message")
                .map(value_to_string)
                .unwrap_or_else(|| "unspecified upstream error".to_string());
            (code, message)
        }
        Some(Value::String(message)) => (fallback_code, message.clone()),
        _ => {
            let message = parsed
                .get("message")
                .map(value_to_string)
                .unwrap_or_else(|| "unspecified upstream error".to_string());
            (fallback_code, message)
        }
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
