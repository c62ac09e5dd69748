//! Invoicing backend client error types.

use serde_json::Value;

/// Fallback message when a rejected submission carries nothing usable.
const GENERIC_SAVE_FAILURE: &str = "Failed to save invoice";

/// Errors from invoicing backend API calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Backend returned a non-2xx status.
    #[error("backend {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Client construction / configuration error.
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

impl ClientError {
    /// Decode this failure into the single user-visible message.
    ///
    /// For server rejections the body is decoded in priority order:
    /// plain string body, then a JSON `message` field, then a JSON
    /// `title` field. Transport errors surface their own description.
    /// Everything else falls back to a generic save-failure message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { body, .. } => decode_body(body),
            Self::Http { source, .. } => source.to_string(),
            Self::Deserialization { .. } | Self::Config { .. } => {
                GENERIC_SAVE_FAILURE.to_string()
            }
        }
    }
}

/// Body decoding priority: JSON string > `message` > `title` > raw text.
fn decode_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(s)) if !s.trim().is_empty() => s,
        Ok(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| map.get("title").and_then(Value::as_str))
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_SAVE_FAILURE.to_string()),
        // Not JSON at all: a plain-text body is still a server message.
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        _ => GENERIC_SAVE_FAILURE.to_string(),
    }
}
